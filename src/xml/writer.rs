//! Serialize an element subtree through the quick-xml writer

use std::io::Write;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::tree::{Arena, NodeData, NodeId};
use super::{Element, SerializeOptions};
use crate::error::Result;

impl Element {
    /// Compact markup for this element and its subtree
    pub fn to_xml(&self) -> Result<String> {
        self.to_xml_with(&SerializeOptions::default())
    }

    /// Markup for this element and its subtree with explicit options
    pub fn to_xml_with(&self, options: &SerializeOptions) -> Result<String> {
        let mut buf = Vec::new();
        self.write_to(&mut buf, options)?;
        Ok(String::from_utf8(buf).map_err(|e| e.utf8_error())?)
    }

    /// Write this element and its subtree to `out`
    pub fn write_to<W: Write>(&self, out: W, options: &SerializeOptions) -> Result<()> {
        let mut writer = match options.indent {
            Some(width) => Writer::new_with_indent(out, b' ', width),
            None => Writer::new(out),
        };

        if options.declaration {
            writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
            if options.indent.is_none() {
                writer.get_mut().write_all(b"\n")?;
            }
        }

        let inherited = self.inherited_declarations();
        let arena = self.tree().arena();
        write_node(&arena, self.id(), &inherited, &mut writer)
    }

    /// Bindings declared above this element that its subtree relies on,
    /// so the markup stays namespace-well-formed when written on its own
    fn inherited_declarations(&self) -> Vec<(String, String)> {
        let mut keys = Vec::new();
        {
            let arena = self.tree().arena();
            undeclared_keys(&arena, self.id(), &mut Vec::new(), &mut keys);
        }
        keys.into_iter()
            .filter_map(|key| {
                let uri = self.lookup_namespace(key.strip_prefix("xmlns:"))?;
                Some((key, uri))
            })
            .collect()
    }
}

fn is_declaration(key: &str) -> bool {
    key == "xmlns" || key.starts_with("xmlns:")
}

/// Declaration keys (`xmlns:a`, `xmlns`) used in the subtree at `id` but
/// not declared inside it, in document order
fn undeclared_keys(arena: &Arena, id: NodeId, declared: &mut Vec<String>, found: &mut Vec<String>) {
    let node = arena.node(id);
    let NodeData::Element { name, attributes } = &node.data else {
        return;
    };

    let mark = declared.len();
    declared.extend(
        attributes
            .iter()
            .filter(|(k, _)| is_declaration(k))
            .map(|(k, _)| k.clone()),
    );

    let element_key = match name.split_once(':') {
        Some((prefix, _)) => format!("xmlns:{}", prefix),
        None => "xmlns".to_string(),
    };
    // unprefixed attributes are in no namespace
    let attribute_keys = attributes
        .iter()
        .filter(|(k, _)| !is_declaration(k))
        .filter_map(|(k, _)| k.split_once(':').map(|(prefix, _)| format!("xmlns:{}", prefix)));

    for key in std::iter::once(element_key).chain(attribute_keys) {
        if key != "xmlns:xml" && !declared.contains(&key) && !found.contains(&key) {
            found.push(key);
        }
    }

    for child in &node.children {
        undeclared_keys(arena, *child, declared, found);
    }
    declared.truncate(mark);
}

fn write_node<W: Write>(
    arena: &Arena,
    id: NodeId,
    inherited: &[(String, String)],
    writer: &mut Writer<W>,
) -> Result<()> {
    let node = arena.node(id);
    match &node.data {
        NodeData::Element { name, attributes } => {
            let mut start = BytesStart::new(name.as_str());
            for (key, value) in inherited.iter().chain(attributes) {
                start.push_attribute((key.as_str(), value.as_str()));
            }

            if node.children.is_empty() {
                writer.write_event(Event::Empty(start))?;
            } else {
                writer.write_event(Event::Start(start))?;
                for child in &node.children {
                    write_node(arena, *child, &[], writer)?;
                }
                writer.write_event(Event::End(BytesEnd::new(name.as_str())))?;
            }
        }
        NodeData::Text(text) => {
            writer.write_event(Event::Text(BytesText::new(text)))?;
        }
        NodeData::Comment(text) => {
            writer.write_event(Event::Comment(BytesText::from_escaped(text.as_str())))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::namespace::{nsdecls, Tag, A};
    use crate::xml::{parse_xml, XmlTree};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_compact_roundtrip() {
        let xml = format!(
            "<a:p {}><a:pPr lvl=\"1\"/><a:r><a:t>test text</a:t></a:r></a:p>",
            nsdecls(&["a"])
        );
        let p = parse_xml(&xml).unwrap();
        assert_eq!(p.to_xml().unwrap(), xml);
    }

    #[test]
    fn test_subtree_serialization() {
        let xml = format!(
            "<a:p {}><a:r><a:t>only the run</a:t></a:r></a:p>",
            nsdecls(&["a"])
        );
        let p = parse_xml(&xml).unwrap();
        let r = &p.children()[0];
        assert_eq!(
            r.to_xml().unwrap(),
            format!("<a:r {}><a:t>only the run</a:t></a:r>", nsdecls(&["a"]))
        );

        let reparsed = parse_xml(&r.to_xml().unwrap()).unwrap();
        assert!(reparsed.is(&Tag::a("r")));
        assert_eq!(reparsed.select(&[Tag::a("t")])[0].text(), "only the run");
    }

    #[test]
    fn test_subtree_declares_only_used_namespaces() {
        let xml = format!(
            "<p:txBody {}><a:p><a:r><a:rPr r:embed=\"rId1\"/></a:r></a:p></p:txBody>",
            nsdecls(&["a", "r", "p"])
        );
        let tx_body = parse_xml(&xml).unwrap();
        let r = &tx_body.select(&[Tag::a("p"), Tag::a("r")])[0];
        assert_eq!(
            r.to_xml().unwrap(),
            format!("<a:r {}><a:rPr r:embed=\"rId1\"/></a:r>", nsdecls(&["a", "r"]))
        );
    }

    #[test]
    fn test_subtree_keeps_own_declarations() {
        let xml = format!(
            "<p:txBody {}><d:p xmlns:d=\"{}\"><d:r/></d:p></p:txBody>",
            nsdecls(&["p"]),
            A
        );
        let tx_body = parse_xml(&xml).unwrap();
        let p = &tx_body.children()[0];
        assert_eq!(p.to_xml().unwrap(), format!("<d:p xmlns:d=\"{}\"><d:r/></d:p>", A));
    }

    #[test]
    fn test_text_is_escaped_and_unicode_kept() {
        let t = XmlTree::new().create_root(&Tag::a("t"));
        t.set_text("1 < 2 & stöfum");
        let xml = t.to_xml().unwrap();
        assert!(xml.contains("1 &lt; 2 &amp; stöfum"));

        let reparsed = parse_xml(&xml).unwrap();
        assert_eq!(reparsed.text(), "1 < 2 & stöfum");
    }

    #[test]
    fn test_declaration() {
        let root = XmlTree::new().create_root(&Tag::p("sld"));
        let options = SerializeOptions {
            declaration: true,
            ..Default::default()
        };
        let xml = root.to_xml_with(&options).unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n<p:sld"));
    }
}
