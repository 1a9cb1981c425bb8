//! Minimal mutable XML tree over quick-xml
//!
//! Parsing and serialization go through quick-xml events; in between, the
//! markup lives in an arena shared by every [`Element`] handle.

mod namespace;
mod reader;
mod tree;
mod writer;

pub use namespace::*;
pub use reader::{parse_xml, parse_xml_with};
pub use tree::{Element, XmlTree};

/// Options for [`parse_xml_with`]
#[derive(Clone, Debug)]
pub struct ParseOptions {
    /// Drop whitespace-only text between elements (indentation).
    /// Text inside leaf elements such as `a:t` is never touched.
    pub strip_blank_text: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            strip_blank_text: true,
        }
    }
}

/// Options for [`Element::to_xml_with`]
#[derive(Clone, Debug, Default)]
pub struct SerializeOptions {
    /// Indent nested elements by this many spaces; `None` writes compact markup
    pub indent: Option<usize>,
    /// Emit a standalone XML declaration first
    pub declaration: bool,
}

impl SerializeOptions {
    /// Options used when writing a package part
    pub fn part() -> Self {
        Self {
            indent: None,
            declaration: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        assert!(ParseOptions::default().strip_blank_text);
        let options = SerializeOptions::default();
        assert!(options.indent.is_none());
        assert!(!options.declaration);
        assert!(SerializeOptions::part().declaration);
    }

    #[test]
    fn test_namespace_constants() {
        assert!(A.contains("drawingml"));
        assert!(P.contains("presentationml"));
    }
}
