//! `[Content_Types].xml`: media type of every part, by extension or by partname

use crate::error::{Error, Result};
use crate::opc::PartUri;
use crate::xml::CT;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};
use std::collections::BTreeMap;
use std::io::Write;

/// Default (per extension) and override (per partname) content types
#[derive(Clone, Debug, Default)]
pub struct ContentTypes {
    defaults: BTreeMap<String, String>,
    overrides: BTreeMap<PartUri, String>,
}

impl ContentTypes {
    /// The defaults every presentation package starts with
    pub fn new() -> Self {
        let mut ct = Self::default();
        ct.add_default("rels", RELATIONSHIPS);
        ct.add_default("xml", XML);
        ct.add_default("png", "image/png");
        ct.add_default("jpeg", "image/jpeg");
        ct.add_default("jpg", "image/jpeg");
        ct.add_default("gif", "image/gif");
        ct.add_default("bin", OLE_OBJECT);
        ct
    }

    pub fn from_xml(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut ct = Self::default();
        loop {
            match reader.read_event()? {
                Event::Empty(e) | Event::Start(e) => match e.local_name().as_ref() {
                    b"Default" => {
                        let ext = required_attr(&e, "Extension")?;
                        let content_type = required_attr(&e, "ContentType")?;
                        ct.add_default(&ext, &content_type);
                    }
                    b"Override" => {
                        let partname = PartUri::new(&required_attr(&e, "PartName")?)?;
                        let content_type = required_attr(&e, "ContentType")?;
                        ct.overrides.insert(partname, content_type);
                    }
                    _ => {}
                },
                Event::Eof => break,
                _ => {}
            }
        }
        Ok(ct)
    }

    pub fn to_xml(&self) -> Result<String> {
        let mut buf = Vec::new();
        self.write_to(&mut buf)?;
        Ok(String::from_utf8(buf).map_err(|e| e.utf8_error())?)
    }

    /// Defaults first, then overrides, both sorted
    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        let mut xml = Writer::new(writer);
        xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;

        let mut types = BytesStart::new("Types");
        types.push_attribute(("xmlns", CT));
        xml.write_event(Event::Start(types))?;

        for (ext, content_type) in &self.defaults {
            let mut elem = BytesStart::new("Default");
            elem.push_attribute(("Extension", ext.as_str()));
            elem.push_attribute(("ContentType", content_type.as_str()));
            xml.write_event(Event::Empty(elem))?;
        }
        for (partname, content_type) in &self.overrides {
            let mut elem = BytesStart::new("Override");
            elem.push_attribute(("PartName", partname.as_str()));
            elem.push_attribute(("ContentType", content_type.as_str()));
            xml.write_event(Event::Empty(elem))?;
        }

        xml.write_event(Event::End(BytesEnd::new("Types")))?;
        Ok(())
    }

    pub fn add_default(&mut self, extension: &str, content_type: &str) {
        self.defaults
            .insert(extension.to_lowercase(), content_type.to_string());
    }

    pub fn add_override(&mut self, partname: &PartUri, content_type: &str) {
        self.overrides
            .insert(partname.clone(), content_type.to_string());
    }

    pub fn remove_override(&mut self, partname: &PartUri) -> Option<String> {
        self.overrides.remove(partname)
    }

    /// Record `content_type` for a new part, as a default when its extension
    /// already maps to it and as an override otherwise
    pub fn register(&mut self, partname: &PartUri, content_type: &str) {
        let by_extension = partname
            .extension()
            .and_then(|ext| self.defaults.get(&ext.to_lowercase()));
        if by_extension.map(String::as_str) != Some(content_type) {
            self.add_override(partname, content_type);
        }
    }

    /// Override for the partname, else the default for its extension
    pub fn get(&self, partname: &PartUri) -> Option<&str> {
        if let Some(ct) = self.overrides.get(partname) {
            return Some(ct);
        }
        partname
            .extension()
            .and_then(|ext| self.defaults.get(&ext.to_lowercase()))
            .map(String::as_str)
    }
}

fn required_attr(element: &BytesStart, name: &str) -> Result<String> {
    for attr in element.attributes() {
        let attr = attr?;
        if attr.key.local_name().as_ref() == name.as_bytes() {
            return Ok(attr.unescape_value()?.into_owned());
        }
    }
    Err(Error::MissingAttribute {
        element: String::from_utf8_lossy(element.name().as_ref()).into_owned(),
        attr: name.to_string(),
    })
}

pub const RELATIONSHIPS: &str = "application/vnd.openxmlformats-package.relationships+xml";
pub const XML: &str = "application/xml";
pub const PML_PRESENTATION_MAIN: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml";
pub const PML_SLIDE: &str = "application/vnd.openxmlformats-officedocument.presentationml.slide+xml";
pub const PML_SLIDE_LAYOUT: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml";
pub const PML_SLIDE_MASTER: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml";
pub const OLE_OBJECT: &str = "application/vnd.openxmlformats-officedocument.oleObject";
pub const DOCX: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const PPTX: &str = "application/vnd.openxmlformats-officedocument.presentationml.presentation";
pub const XLSX: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn uri(s: &str) -> PartUri {
        PartUri::new(s).unwrap()
    }

    #[test]
    fn test_parse() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="XML" ContentType="application/xml"/>
  <Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/>
</Types>"#;

        let ct = ContentTypes::from_xml(xml).unwrap();
        assert_eq!(ct.get(&uri("/ppt/presentation.xml")), Some(PML_PRESENTATION_MAIN));
        assert_eq!(ct.get(&uri("/ppt/slides/slide1.xml")), Some(XML));
        assert_eq!(ct.get(&uri("/ppt/media/image1.emf")), None);
    }

    #[test]
    fn test_missing_attribute() {
        let xml = r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels"/></Types>"#;
        assert!(matches!(
            ContentTypes::from_xml(xml),
            Err(Error::MissingAttribute { .. })
        ));
    }

    #[test]
    fn test_register_prefers_defaults() {
        let mut ct = ContentTypes::new();
        ct.register(&uri("/ppt/embeddings/oleObject1.bin"), OLE_OBJECT);
        ct.register(&uri("/ppt/slides/slide1.xml"), PML_SLIDE);

        let xml = ct.to_xml().unwrap();
        assert!(!xml.contains("oleObject1.bin"));
        assert!(xml.contains(r#"<Override PartName="/ppt/slides/slide1.xml""#));
    }

    #[test]
    fn test_roundtrip() {
        let mut ct = ContentTypes::new();
        ct.add_override(&uri("/ppt/embeddings/Microsoft_Excel_Sheet1.xlsx"), XLSX);

        let parsed = ContentTypes::from_xml(&ct.to_xml().unwrap()).unwrap();
        assert_eq!(parsed.get(&uri("/ppt/embeddings/Microsoft_Excel_Sheet1.xlsx")), Some(XLSX));
        assert_eq!(parsed.get(&uri("/ppt/media/image1.PNG")), Some("image/png"));
    }
}
