//! Build an [`XmlTree`] from markup using quick-xml events

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::tree::{NodeData, NodeId, XmlTree};
use super::{Element, ParseOptions};
use crate::error::{Error, Result};

/// Parse markup into a fresh tree and return its root element
pub fn parse_xml(xml: &str) -> Result<Element> {
    parse_xml_with(xml, &ParseOptions::default())
}

/// Parse markup with explicit options
pub fn parse_xml_with(xml: &str, options: &ParseOptions) -> Result<Element> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let tree = XmlTree::new();
    let mut stack: Vec<NodeId> = Vec::new();
    let mut root: Option<NodeId> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let id = open_element(&tree, &e, stack.last().copied(), &mut root)?;
                stack.push(id);
            }
            Event::Empty(e) => {
                open_element(&tree, &e, stack.last().copied(), &mut root)?;
            }
            Event::End(_) => {
                if let Some(id) = stack.pop() {
                    if options.strip_blank_text {
                        tree.arena_mut().strip_blank_text(id);
                    }
                }
            }
            Event::Text(t) => {
                if let Some(&parent) = stack.last() {
                    let text = t.unescape()?.into_owned();
                    push_child(&tree, parent, NodeData::Text(text));
                }
            }
            Event::CData(c) => {
                if let Some(&parent) = stack.last() {
                    let text = std::str::from_utf8(&c)?.to_string();
                    push_child(&tree, parent, NodeData::Text(text));
                }
            }
            Event::Comment(c) => {
                if let Some(&parent) = stack.last() {
                    let text = std::str::from_utf8(&c)?.to_string();
                    push_child(&tree, parent, NodeData::Comment(text));
                }
            }
            Event::Eof => break,
            // Declaration, processing instructions and doctype are not kept
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(Error::InvalidDocument("unexpected end of document".into()));
    }

    let root = root.ok_or_else(|| Error::InvalidDocument("no root element".into()))?;
    Ok(tree.element(root))
}

fn open_element(
    tree: &XmlTree,
    start: &BytesStart,
    parent: Option<NodeId>,
    root: &mut Option<NodeId>,
) -> Result<NodeId> {
    let name = std::str::from_utf8(start.name().as_ref())?.to_string();

    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr?;
        let key = std::str::from_utf8(attr.key.as_ref())?.to_string();
        let value = attr.unescape_value()?.into_owned();
        attributes.push((key, value));
    }

    let data = NodeData::Element { name, attributes };
    let id = match parent {
        Some(parent) => push_child(tree, parent, data),
        None if root.is_some() => {
            return Err(Error::InvalidDocument("more than one root element".into()))
        }
        None => {
            let id = tree.arena_mut().push(data);
            *root = Some(id);
            id
        }
    };
    check_prefixes_bound(&tree.element(id))?;
    Ok(id)
}

/// Every prefix on the element and its attributes must resolve in scope
fn check_prefixes_bound(element: &Element) -> Result<()> {
    let name = element.name();
    let attributes = element.attributes();
    let qnames = std::iter::once(name.as_str()).chain(
        attributes
            .iter()
            .map(|(k, _)| k.as_str())
            .filter(|k| *k != "xmlns" && !k.starts_with("xmlns:")),
    );

    for prefix in qnames.filter_map(|q| q.split_once(':').map(|(prefix, _)| prefix)) {
        if element.lookup_namespace(Some(prefix)).is_none() {
            return Err(Error::InvalidDocument(format!(
                "unbound namespace prefix `{}` in <{}>",
                prefix, name
            )));
        }
    }
    Ok(())
}

fn push_child(tree: &XmlTree, parent: NodeId, data: NodeData) -> NodeId {
    let mut arena = tree.arena_mut();
    let id = arena.push(data);
    arena.append(parent, id);
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::namespace::{nsdecls, Tag, A};

    #[test]
    fn test_parse_namespaced_paragraph() {
        let xml = format!(
            "<a:p {}><a:pPr lvl=\"1\"/><a:r><a:t>test text</a:t></a:r></a:p>",
            nsdecls(&["a"])
        );
        let p = parse_xml(&xml).unwrap();

        assert_eq!(p.name(), "a:p");
        assert_eq!(p.namespace_uri().as_deref(), Some(A));
        let children = p.children();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].attribute("lvl").as_deref(), Some("1"));

        let t = p.select(&[Tag::a("r"), Tag::a("t")]);
        assert_eq!(t[0].text(), "test text");
    }

    #[test]
    fn test_parse_strips_blank_text_between_elements() {
        let xml = format!(
            "<a:p {}>\n  <a:r>\n    <a:t> keep me </a:t>\n  </a:r>\n</a:p>",
            nsdecls(&["a"])
        );
        let p = parse_xml(&xml).unwrap();
        let t = &p.select(&[Tag::a("r"), Tag::a("t")])[0];
        assert_eq!(t.text(), " keep me ");
        assert_eq!(p.to_xml().unwrap().matches('\n').count(), 0);
    }

    #[test]
    fn test_parse_keeps_blank_text_when_asked() {
        let xml = "<root>\n  <child/>\n</root>";
        let options = ParseOptions {
            strip_blank_text: false,
        };
        let root = parse_xml_with(xml, &options).unwrap();
        assert_eq!(root.text(), "\n  \n");
    }

    #[test]
    fn test_parse_unescapes_entities() {
        let root = parse_xml(r#"<t v="a &amp; b">1 &lt; 2 &#233;</t>"#).unwrap();
        assert_eq!(root.attribute("v").as_deref(), Some("a & b"));
        assert_eq!(root.text(), "1 < 2 é");
    }

    #[test]
    fn test_parse_rejects_empty_document() {
        assert!(matches!(
            parse_xml("<?xml version=\"1.0\"?>"),
            Err(Error::InvalidDocument(_))
        ));
    }

    #[test]
    fn test_parse_rejects_unbound_prefix() {
        assert!(matches!(
            parse_xml("<a:r><a:t>x</a:t></a:r>"),
            Err(Error::InvalidDocument(_))
        ));

        let xml = format!("<a:p {}><a:r r:id=\"rId1\"/></a:p>", nsdecls(&["a"]));
        assert!(matches!(parse_xml(&xml), Err(Error::InvalidDocument(_))));
    }

    #[test]
    fn test_parse_resolves_prefix_declared_on_ancestor() {
        let xml = format!("<p:txBody {}><a:p/></p:txBody>", nsdecls(&["p", "a"]));
        let tx_body = parse_xml(&xml).unwrap();
        assert!(tx_body.children()[0].is(&Tag::a("p")));
    }

    #[test]
    fn test_parse_rejects_unclosed_element() {
        assert!(parse_xml("<a><b></b>").is_err());
    }
}
