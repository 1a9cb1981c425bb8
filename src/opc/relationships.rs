//! `.rels` parts: typed links from a source part to its targets

use crate::error::{Error, Result};
use crate::opc::PartUri;
use crate::xml::PR;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};
use std::io::Write;

/// A single relationship
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Relationship {
    /// Relationship ID, e.g. `rId3`
    pub id: String,
    /// Relationship type URI (see [`rel_types`])
    pub rel_type: String,
    /// Target, relative to the source part unless external
    pub target: String,
    pub target_mode: TargetMode,
}

impl Relationship {
    /// Absolute partname of an internal target, relative to `source`
    pub fn target_uri(&self, source: &PartUri) -> Result<PartUri> {
        if self.target_mode == TargetMode::External {
            return Err(Error::InvalidPartUri(format!(
                "relationship {} points outside the package: {}",
                self.id, self.target
            )));
        }
        source.resolve(&self.target)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TargetMode {
    #[default]
    Internal,
    /// Hyperlinks and other targets outside the package
    External,
}

/// Relationships of one source part, kept in document order
#[derive(Clone, Debug, Default)]
pub struct Relationships {
    items: Vec<Relationship>,
}

impl Relationships {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `.rels` part
    pub fn from_xml(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut rels = Self::new();
        loop {
            match reader.read_event()? {
                Event::Empty(e) | Event::Start(e) => {
                    if e.local_name().as_ref() == b"Relationship" {
                        rels.items.push(parse_relationship(&e)?);
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }
        Ok(rels)
    }

    /// Serialized `.rels` markup
    pub fn to_xml(&self) -> Result<String> {
        let mut buf = Vec::new();
        self.write_to(&mut buf)?;
        Ok(String::from_utf8(buf).map_err(|e| e.utf8_error())?)
    }

    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        let mut xml = Writer::new(writer);
        xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;

        let mut root = BytesStart::new("Relationships");
        root.push_attribute(("xmlns", PR));
        xml.write_event(Event::Start(root))?;

        for rel in &self.items {
            let mut elem = BytesStart::new("Relationship");
            elem.push_attribute(("Id", rel.id.as_str()));
            elem.push_attribute(("Type", rel.rel_type.as_str()));
            elem.push_attribute(("Target", rel.target.as_str()));
            if rel.target_mode == TargetMode::External {
                elem.push_attribute(("TargetMode", "External"));
            }
            xml.write_event(Event::Empty(elem))?;
        }

        xml.write_event(Event::End(BytesEnd::new("Relationships")))?;
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Relationship> {
        self.items.iter().find(|r| r.id == id)
    }

    /// First relationship of the given type
    pub fn by_type(&self, rel_type: &str) -> Option<&Relationship> {
        self.items.iter().find(|r| r.rel_type == rel_type)
    }

    pub fn all_by_type(&self, rel_type: &str) -> Vec<&Relationship> {
        self.items.iter().filter(|r| r.rel_type == rel_type).collect()
    }

    /// Add an internal relationship, returning its new ID
    pub fn add(&mut self, rel_type: &str, target: &str) -> String {
        self.push(rel_type, target, TargetMode::Internal)
    }

    pub fn add_external(&mut self, rel_type: &str, target: &str) -> String {
        self.push(rel_type, target, TargetMode::External)
    }

    /// ID of an existing internal relationship to `target`, or of a new one
    pub fn get_or_add(&mut self, rel_type: &str, target: &str) -> String {
        let existing = self.items.iter().find(|r| {
            r.rel_type == rel_type && r.target == target && r.target_mode == TargetMode::Internal
        });
        match existing {
            Some(rel) => rel.id.clone(),
            None => self.add(rel_type, target),
        }
    }

    pub fn remove(&mut self, id: &str) -> Option<Relationship> {
        let index = self.items.iter().position(|r| r.id == id)?;
        Some(self.items.remove(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn push(&mut self, rel_type: &str, target: &str, target_mode: TargetMode) -> String {
        let id = self.next_id();
        self.items.push(Relationship {
            id: id.clone(),
            rel_type: rel_type.to_string(),
            target: target.to_string(),
            target_mode,
        });
        id
    }

    /// Lowest unused `rIdN`, so gaps left by removals are reused
    fn next_id(&self) -> String {
        (1..)
            .map(|n| format!("rId{}", n))
            .find(|id| self.get(id).is_none())
            .unwrap_or_default()
    }
}

fn parse_relationship(element: &BytesStart) -> Result<Relationship> {
    let mut id = None;
    let mut rel_type = None;
    let mut target = None;
    let mut target_mode = TargetMode::Internal;

    for attr in element.attributes() {
        let attr = attr?;
        let value = attr.unescape_value()?.into_owned();
        match attr.key.local_name().as_ref() {
            b"Id" => id = Some(value),
            b"Type" => rel_type = Some(value),
            b"Target" => target = Some(value),
            b"TargetMode" if value == "External" => target_mode = TargetMode::External,
            _ => {}
        }
    }

    let missing = |attr: &str| Error::MissingAttribute {
        element: "Relationship".into(),
        attr: attr.into(),
    };
    Ok(Relationship {
        id: id.ok_or_else(|| missing("Id"))?,
        rel_type: rel_type.ok_or_else(|| missing("Type"))?,
        target: target.ok_or_else(|| missing("Target"))?,
        target_mode,
    })
}

/// Relationship types used by presentations
pub mod rel_types {
    pub const OFFICE_DOCUMENT: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
    pub const SLIDE: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";
    pub const SLIDE_LAYOUT: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout";
    pub const SLIDE_MASTER: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster";
    pub const NOTES_SLIDE: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/notesSlide";
    pub const THEME: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme";
    pub const IMAGE: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";
    pub const HYPERLINK: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink";
    /// Embedded Office document (docx/pptx/xlsx)
    pub const PACKAGE: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/package";
    /// Embedded OLE object of any other kind
    pub const OLE_OBJECT: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/oleObject";
    pub const CORE_PROPERTIES: &str =
        "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
    pub const EXTENDED_PROPERTIES: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties";
}
