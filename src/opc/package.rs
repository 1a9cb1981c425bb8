//! Presentation package: the ZIP container and its parts

use crate::error::{Error, Result};
use crate::opc::content_types::PML_SLIDE;
use crate::opc::relationships::rel_types;
use crate::opc::{well_known, ContentTypes, Part, PartUri, Relationships};
use crate::xml::{Element, Tag, R};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek, Write};
use std::path::Path;
use zip::read::ZipArchive;
use zip::write::{FileOptions, ZipWriter};
use zip::CompressionMethod;

/// An OPC package, typically a `.pptx` file.
///
/// Parts are kept by partname, so iteration is in partname order.
#[derive(Debug)]
pub struct Package {
    parts: BTreeMap<PartUri, Part>,
    relationships: Relationships,
    content_types: ContentTypes,
}

impl Package {
    pub fn new() -> Self {
        Self {
            parts: BTreeMap::new(),
            relationships: Relationships::new(),
            content_types: ContentTypes::new(),
        }
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("opening package {}", path.display());
        Self::from_reader(BufReader::new(File::open(path)?))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_reader(Cursor::new(bytes))
    }

    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut archive = ZipArchive::new(reader)?;

        let content_types_uri = well_known::content_types();
        let content_types = ContentTypes::from_xml(
            &read_entry(&mut archive, content_types_uri.zip_name())?
                .ok_or_else(|| Error::MissingPart(content_types_uri.to_string()))?,
        )?;
        let relationships = match read_entry(&mut archive, well_known::package_rels().zip_name())? {
            Some(xml) => Relationships::from_xml(&xml)?,
            None => Relationships::new(),
        };

        let mut package = Self {
            parts: BTreeMap::new(),
            relationships,
            content_types,
        };
        package.read_parts(&mut archive)?;
        package.read_part_relationships(&mut archive)?;

        log::debug!(
            "loaded package: {} parts, {} package relationships",
            package.parts.len(),
            package.relationships.len()
        );
        Ok(package)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        log::debug!("saving package to {}", path.display());
        self.write_to(File::create(path)?)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.write_to(Cursor::new(&mut buf))?;
        Ok(buf)
    }

    /// Write every part, deflated, plus content types and relationships
    pub fn write_to<W: Write + Seek>(&self, writer: W) -> Result<()> {
        let mut zip = ZipWriter::new(writer);
        let options: FileOptions<()> =
            FileOptions::default().compression_method(CompressionMethod::Deflated);

        zip.start_file(well_known::content_types().zip_name(), options)?;
        self.content_types.write_to(&mut zip)?;

        if !self.relationships.is_empty() {
            zip.start_file(well_known::package_rels().zip_name(), options)?;
            self.relationships.write_to(&mut zip)?;
        }

        for (partname, part) in &self.parts {
            zip.start_file(partname.zip_name(), options)?;
            zip.write_all(part.blob())?;

            if !part.relationships().is_empty() {
                zip.start_file(partname.relationships_uri().zip_name(), options)?;
                part.relationships().write_to(&mut zip)?;
            }
        }

        zip.finish()?;
        log::debug!("wrote package with {} parts", self.parts.len());
        Ok(())
    }

    pub fn part(&self, partname: &PartUri) -> Option<&Part> {
        self.parts.get(partname)
    }

    pub fn part_mut(&mut self, partname: &PartUri) -> Option<&mut Part> {
        self.parts.get_mut(partname)
    }

    /// Add (or replace) a part and record its content type
    pub fn add_part(&mut self, part: Part) {
        let partname = part.partname().clone();
        log::trace!("adding part {} ({})", partname, part.content_type());
        self.content_types.register(&partname, part.content_type());
        self.parts.insert(partname, part);
    }

    pub fn remove_part(&mut self, partname: &PartUri) -> Option<Part> {
        self.content_types.remove_override(partname);
        self.parts.remove(partname)
    }

    pub fn part_uris(&self) -> impl Iterator<Item = &PartUri> {
        self.parts.keys()
    }

    pub fn parts(&self) -> impl Iterator<Item = &Part> {
        self.parts.values()
    }

    pub fn relationships(&self) -> &Relationships {
        &self.relationships
    }

    pub fn relationships_mut(&mut self) -> &mut Relationships {
        &mut self.relationships
    }

    pub fn content_types(&self) -> &ContentTypes {
        &self.content_types
    }

    /// First partname produced by `template` (containing `%d`) that no part
    /// uses yet, trying 1, 2, 3 and so on.
    ///
    /// With `oleObject1.bin` and `oleObject3.bin` present,
    /// `/ppt/embeddings/oleObject%d.bin` yields `oleObject2.bin`.
    pub fn next_partname(&self, template: &str) -> Result<PartUri> {
        let mut n = 1;
        loop {
            let candidate = PartUri::from_template(template, n)?;
            if !self.parts.contains_key(&candidate) {
                return Ok(candidate);
            }
            n += 1;
        }
    }

    /// Target of the first package relationship of `rel_type`
    pub fn part_by_rel_type(&self, rel_type: &str) -> Option<&Part> {
        let rel = self.relationships.by_type(rel_type)?;
        let partname = PartUri::new(&rel.target).ok()?;
        self.parts.get(&partname)
    }

    /// `/ppt/presentation.xml`, found through the package relationships
    pub fn main_presentation_part(&self) -> Option<&Part> {
        self.part_by_rel_type(rel_types::OFFICE_DOCUMENT)
    }

    pub fn main_presentation_part_mut(&mut self) -> Option<&mut Part> {
        let rel = self.relationships.by_type(rel_types::OFFICE_DOCUMENT)?;
        let partname = PartUri::new(&rel.target).ok()?;
        self.parts.get_mut(&partname)
    }

    /// Part that `source` refers to through relationship `r_id`
    pub fn related_part(&self, source: &Part, r_id: &str) -> Result<&Part> {
        let rel = source
            .relationships()
            .get(r_id)
            .ok_or_else(|| Error::PartNotFound(format!("{} in {}", r_id, source.partname())))?;
        let target = rel.target_uri(source.partname())?;
        self.parts
            .get(&target)
            .ok_or_else(|| Error::PartNotFound(target.to_string()))
    }

    /// Add a relationship from `source` to `target`, reusing an existing
    /// one of the same type. Returns its ID.
    pub fn relate_to(&mut self, source: &PartUri, target: &PartUri, rel_type: &str) -> Result<String> {
        let reference = source.relative_ref(target);
        let part = self
            .parts
            .get_mut(source)
            .ok_or_else(|| Error::PartNotFound(source.to_string()))?;
        Ok(part.relationships_mut().get_or_add(rel_type, &reference))
    }

    /// Slide parts in presentation order.
    ///
    /// The order is that of `p:sldIdLst` in the presentation part. Without
    /// a slide list, every slide part is returned by slide number.
    pub fn slide_parts(&self) -> Result<Vec<&Part>> {
        let presentation = self
            .main_presentation_part()
            .ok_or_else(|| Error::MissingPart("main presentation part".into()))?;
        let root = presentation.xml_root()?;

        let slide_ids = root.select(&[Tag::p("sldIdLst"), Tag::p("sldId")]);
        if slide_ids.is_empty() {
            let mut slides: Vec<&Part> = self
                .parts
                .values()
                .filter(|part| part.content_type() == PML_SLIDE)
                .collect();
            slides.sort_by_key(|part| (part.partname().base_uri().to_string(), part.partname().idx()));
            return Ok(slides);
        }

        slide_ids
            .iter()
            .map(|sld_id| {
                let r_id = relationship_id(sld_id).ok_or_else(|| Error::MissingAttribute {
                    element: sld_id.name(),
                    attr: "r:id".into(),
                })?;
                self.related_part(presentation, &r_id)
            })
            .collect()
    }

    fn read_parts<R: Read + Seek>(&mut self, archive: &mut ZipArchive<R>) -> Result<()> {
        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            let name = file.name().to_string();
            if name.ends_with('/') {
                continue;
            }

            let partname = PartUri::new(&name)?;
            if partname == well_known::content_types() || partname.is_relationships() {
                continue;
            }

            let content_type = match self.content_types.get(&partname) {
                Some(ct) => ct.to_string(),
                None => {
                    log::warn!("no content type for {}, using octet-stream", partname);
                    "application/octet-stream".to_string()
                }
            };

            let mut blob = Vec::new();
            file.read_to_end(&mut blob)?;
            self.parts
                .insert(partname.clone(), Part::new(partname, content_type, blob));
        }
        Ok(())
    }

    fn read_part_relationships<R: Read + Seek>(&mut self, archive: &mut ZipArchive<R>) -> Result<()> {
        for part in self.parts.values_mut() {
            let rels_uri = part.partname().relationships_uri();
            if let Some(xml) = read_entry(archive, rels_uri.zip_name())? {
                part.set_relationships(Relationships::from_xml(&xml)?);
            }
        }
        Ok(())
    }
}

impl Default for Package {
    fn default() -> Self {
        Self::new()
    }
}

/// Text of a ZIP entry, `None` when the archive has no such entry
fn read_entry<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &str) -> Result<Option<String>> {
    let mut file = match archive.by_name(name) {
        Ok(file) => file,
        Err(zip::result::ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let mut content = String::new();
    file.read_to_string(&mut content)?;
    Ok(Some(content))
}

/// `r:id` of a `p:sldId`, whatever prefix the relationships namespace uses
fn relationship_id(elem: &Element) -> Option<String> {
    let prefix = elem.lookup_prefix(R).filter(|p| !p.is_empty())?;
    elem.attribute(&format!("{}:id", prefix))
}
