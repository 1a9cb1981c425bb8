//! A single part of a package: partname, content type, bytes and relationships

use crate::error::Result;
use crate::opc::{PartUri, Relationships};
use crate::xml::{parse_xml, Element, SerializeOptions};

#[derive(Clone, Debug)]
pub struct Part {
    partname: PartUri,
    content_type: String,
    blob: Vec<u8>,
    relationships: Relationships,
    modified: bool,
}

impl Part {
    pub fn new(partname: PartUri, content_type: impl Into<String>, blob: Vec<u8>) -> Self {
        Self {
            partname,
            content_type: content_type.into(),
            blob,
            relationships: Relationships::new(),
            modified: false,
        }
    }

    pub fn partname(&self) -> &PartUri {
        &self.partname
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Raw bytes as stored in the package
    pub fn blob(&self) -> &[u8] {
        &self.blob
    }

    pub fn set_blob(&mut self, blob: Vec<u8>) {
        self.blob = blob;
        self.modified = true;
    }

    /// Parse the part into a fresh markup tree.
    ///
    /// The tree is detached from the part: call [`Part::set_xml`] to store
    /// edits back.
    pub fn xml_root(&self) -> Result<Element> {
        let xml = std::str::from_utf8(&self.blob)?;
        parse_xml(xml)
    }

    /// Serialize `root` (with an XML declaration) as the new part content
    pub fn set_xml(&mut self, root: &Element) -> Result<()> {
        let xml = root.to_xml_with(&SerializeOptions::part())?;
        log::trace!("storing {} bytes of markup in {}", xml.len(), self.partname);
        self.set_blob(xml.into_bytes());
        Ok(())
    }

    pub fn relationships(&self) -> &Relationships {
        &self.relationships
    }

    pub fn relationships_mut(&mut self) -> &mut Relationships {
        self.modified = true;
        &mut self.relationships
    }

    pub(crate) fn set_relationships(&mut self, rels: Relationships) {
        self.relationships = rels;
    }

    /// Whether the blob or relationships changed since the part was loaded
    pub fn is_modified(&self) -> bool {
        self.modified
    }
}
