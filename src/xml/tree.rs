//! Arena-backed mutable XML tree
//!
//! Every node lives in one [`XmlTree`] arena. An [`Element`] is a cheap
//! handle (shared arena + node id), so any number of handles may point at
//! the same node and all of them observe each other's edits.

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use super::namespace::{split_qname, Tag, XML};

/// Index of a node inside its arena
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

/// Payload of a node
#[derive(Clone, Debug)]
pub(crate) enum NodeData {
    /// Element with its qualified name and attributes (xmlns declarations included)
    Element {
        name: String,
        attributes: Vec<(String, String)>,
    },
    /// Character data
    Text(String),
    /// Comment
    Comment(String),
}

#[derive(Clone, Debug)]
pub(crate) struct Node {
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) data: NodeData,
}

/// Node storage. Detached nodes stay in place until the arena is dropped.
#[derive(Debug, Default)]
pub(crate) struct Arena {
    nodes: Vec<Node>,
}

impl Arena {
    pub(crate) fn push(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: None,
            children: Vec::new(),
            data,
        });
        id
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub(crate) fn is_element(&self, id: NodeId) -> bool {
        matches!(self.node(id).data, NodeData::Element { .. })
    }

    fn detach(&mut self, child: NodeId) {
        if let Some(parent) = self.node(child).parent {
            self.node_mut(parent).children.retain(|c| *c != child);
            self.node_mut(child).parent = None;
        }
    }

    /// Insert `child` at `index` among the children of `parent`, moving it if attached elsewhere
    pub(crate) fn insert(&mut self, parent: NodeId, index: usize, child: NodeId) {
        self.detach(child);
        let children = &mut self.node_mut(parent).children;
        let index = index.min(children.len());
        children.insert(index, child);
        self.node_mut(child).parent = Some(parent);
    }

    pub(crate) fn append(&mut self, parent: NodeId, child: NodeId) {
        let len = self.node(parent).children.len();
        self.insert(parent, len, child);
    }

    /// Drop whitespace-only text nodes of an element that has element children
    pub(crate) fn strip_blank_text(&mut self, id: NodeId) {
        let has_elements = self
            .node(id)
            .children
            .iter()
            .any(|c| self.is_element(*c));
        if !has_elements {
            return;
        }
        let blank: Vec<NodeId> = self
            .node(id)
            .children
            .iter()
            .copied()
            .filter(|c| matches!(&self.node(*c).data, NodeData::Text(t) if t.trim().is_empty()))
            .collect();
        for child in blank {
            self.detach(child);
        }
    }

    /// Copy a subtree from another arena into this one, returning the new (detached) root
    fn import(&mut self, source: &Arena, id: NodeId) -> NodeId {
        let copy = self.push(source.node(id).data.clone());
        for child in &source.node(id).children {
            let child_copy = self.import(source, *child);
            self.append(copy, child_copy);
        }
        copy
    }
}

/// Shared handle to an XML arena
#[derive(Clone, Debug, Default)]
pub struct XmlTree {
    arena: Rc<RefCell<Arena>>,
}

impl XmlTree {
    /// Create an empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a root element declaring the namespace of `tag`
    pub fn create_root(&self, tag: &Tag) -> Element {
        let id = self.arena_mut().push(NodeData::Element {
            name: tag.qualified(),
            attributes: vec![(format!("xmlns:{}", tag.prefix), tag.ns.to_string())],
        });
        self.element(id)
    }

    pub(crate) fn arena(&self) -> Ref<'_, Arena> {
        self.arena.borrow()
    }

    pub(crate) fn arena_mut(&self) -> RefMut<'_, Arena> {
        self.arena.borrow_mut()
    }

    pub(crate) fn element(&self, id: NodeId) -> Element {
        Element {
            tree: self.clone(),
            id,
        }
    }

    /// Whether both handles share one arena
    pub fn same_tree(&self, other: &XmlTree) -> bool {
        Rc::ptr_eq(&self.arena, &other.arena)
    }
}

/// Handle to an element node.
///
/// Cloning a handle never copies the element; equality is node identity.
#[derive(Clone)]
pub struct Element {
    tree: XmlTree,
    id: NodeId,
}

impl Element {
    /// The tree this element lives in
    pub fn tree(&self) -> &XmlTree {
        &self.tree
    }

    pub(crate) fn id(&self) -> NodeId {
        self.id
    }

    fn with_data<T>(&self, f: impl FnOnce(&str, &[(String, String)]) -> T) -> T {
        let arena = self.tree.arena();
        match &arena.node(self.id).data {
            NodeData::Element { name, attributes } => f(name, attributes),
            // Handles are only ever created for element nodes
            _ => f("", &[]),
        }
    }

    fn with_attributes_mut<T>(&self, f: impl FnOnce(&mut Vec<(String, String)>) -> T) -> Option<T> {
        let mut arena = self.tree.arena_mut();
        match &mut arena.node_mut(self.id).data {
            NodeData::Element { attributes, .. } => Some(f(attributes)),
            _ => None,
        }
    }

    /// Qualified name as written, e.g. `a:pPr`
    pub fn name(&self) -> String {
        self.with_data(|name, _| name.to_string())
    }

    /// Name without prefix
    pub fn local_name(&self) -> String {
        self.with_data(|name, _| split_qname(name).1.to_string())
    }

    /// Prefix as written, if any
    pub fn prefix(&self) -> Option<String> {
        self.with_data(|name, _| split_qname(name).0.map(str::to_string))
    }

    /// Namespace URI this element's prefix resolves to
    pub fn namespace_uri(&self) -> Option<String> {
        let prefix = self.prefix();
        self.lookup_namespace(prefix.as_deref())
    }

    /// Resolve a prefix (or the default namespace for `None`) in this element's scope
    pub fn lookup_namespace(&self, prefix: Option<&str>) -> Option<String> {
        if prefix == Some("xml") {
            return Some(XML.to_string());
        }
        let key = match prefix {
            Some(p) => format!("xmlns:{}", p),
            None => "xmlns".to_string(),
        };

        let arena = self.tree.arena();
        let mut current = Some(self.id);
        while let Some(id) = current {
            let node = arena.node(id);
            if let NodeData::Element { attributes, .. } = &node.data {
                if let Some((_, uri)) = attributes.iter().find(|(k, _)| *k == key) {
                    // xmlns="" undeclares the default namespace
                    return (!uri.is_empty()).then(|| uri.clone());
                }
            }
            current = node.parent;
        }
        None
    }

    /// Find a prefix bound to `uri` in scope; `Some("")` means the default namespace
    pub fn lookup_prefix(&self, uri: &str) -> Option<String> {
        let mut candidates = Vec::new();
        {
            let arena = self.tree.arena();
            let mut current = Some(self.id);
            while let Some(id) = current {
                let node = arena.node(id);
                if let NodeData::Element { attributes, .. } = &node.data {
                    for (key, value) in attributes {
                        if value != uri {
                            continue;
                        }
                        if key == "xmlns" {
                            candidates.push(String::new());
                        } else if let Some(prefix) = key.strip_prefix("xmlns:") {
                            candidates.push(prefix.to_string());
                        }
                    }
                }
                current = node.parent;
            }
        }

        // A closer declaration may have rebound the prefix
        candidates.into_iter().find(|prefix| {
            let prefix = (!prefix.is_empty()).then_some(prefix.as_str());
            self.lookup_namespace(prefix).as_deref() == Some(uri)
        })
    }

    /// Whether this element has the namespace and local name of `tag`
    pub fn is(&self, tag: &Tag) -> bool {
        self.local_name() == tag.local && self.namespace_uri().as_deref() == Some(tag.ns)
    }

    /// Attribute value by qualified name
    pub fn attribute(&self, name: &str) -> Option<String> {
        self.with_data(|_, attributes| {
            attributes
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.clone())
        })
    }

    /// Whether the attribute is present
    pub fn has_attribute(&self, name: &str) -> bool {
        self.with_data(|_, attributes| attributes.iter().any(|(k, _)| k == name))
    }

    /// All attributes in document order, namespace declarations included
    pub fn attributes(&self) -> Vec<(String, String)> {
        self.with_data(|_, attributes| attributes.to_vec())
    }

    /// Set an attribute, keeping its position if it already exists
    pub fn set_attribute(&self, name: &str, value: impl Into<String>) {
        let value = value.into();
        self.with_attributes_mut(|attributes| {
            match attributes.iter_mut().find(|(k, _)| k == name) {
                Some(slot) => slot.1 = value,
                None => attributes.push((name.to_string(), value)),
            }
        });
    }

    /// Remove an attribute, returning its old value
    pub fn remove_attribute(&self, name: &str) -> Option<String> {
        self.with_attributes_mut(|attributes| {
            let index = attributes.iter().position(|(k, _)| k == name)?;
            Some(attributes.remove(index).1)
        })
        .flatten()
    }

    /// Parent element, `None` for a root or detached element
    pub fn parent(&self) -> Option<Element> {
        let parent = self.tree.arena().node(self.id).parent?;
        Some(self.tree.element(parent))
    }

    /// Child elements in document order (text and comments skipped)
    pub fn children(&self) -> Vec<Element> {
        let ids: Vec<NodeId> = {
            let arena = self.tree.arena();
            arena
                .node(self.id)
                .children
                .iter()
                .copied()
                .filter(|c| arena.is_element(*c))
                .collect()
        };
        ids.into_iter().map(|id| self.tree.element(id)).collect()
    }

    /// First child element matching `tag`
    pub fn find_child(&self, tag: &Tag) -> Option<Element> {
        self.children().into_iter().find(|c| c.is(tag))
    }

    /// Every child element matching `tag`
    pub fn find_children(&self, tag: &Tag) -> Vec<Element> {
        self.children().into_iter().filter(|c| c.is(tag)).collect()
    }

    /// Follow a child path, e.g. `[p:cSld, p:spTree, p:sp, p:txBody, a:p]`
    pub fn select(&self, path: &[Tag]) -> Vec<Element> {
        let mut current = vec![self.clone()];
        for tag in path {
            current = current
                .iter()
                .flat_map(|elem| elem.find_children(tag))
                .collect();
        }
        current
    }

    /// Concatenated text of the direct text children
    pub fn text(&self) -> String {
        let arena = self.tree.arena();
        arena
            .node(self.id)
            .children
            .iter()
            .filter_map(|c| match &arena.node(*c).data {
                NodeData::Text(t) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Replace the text and comment children with a single text node
    pub fn set_text(&self, text: &str) {
        let mut arena = self.tree.arena_mut();
        let stale: Vec<NodeId> = arena
            .node(self.id)
            .children
            .iter()
            .copied()
            .filter(|c| !arena.is_element(*c))
            .collect();
        for child in stale {
            arena.detach(child);
        }
        if !text.is_empty() {
            let node = arena.push(NodeData::Text(text.to_string()));
            arena.insert(self.id, 0, node);
        }
    }

    /// Create a detached element meant to become a child of `self`.
    ///
    /// The name reuses a prefix already bound to the tag's namespace in
    /// this scope; otherwise the canonical prefix is declared on the new
    /// element.
    pub fn new_child_element(&self, tag: &Tag) -> Element {
        let (name, attributes) = match self.lookup_prefix(tag.ns) {
            Some(prefix) if prefix.is_empty() => (tag.local.to_string(), Vec::new()),
            Some(prefix) => (format!("{}:{}", prefix, tag.local), Vec::new()),
            None => (
                tag.qualified(),
                vec![(format!("xmlns:{}", tag.prefix), tag.ns.to_string())],
            ),
        };
        let id = self
            .tree
            .arena_mut()
            .push(NodeData::Element { name, attributes });
        self.tree.element(id)
    }

    /// Node id of `child` in this tree, copying it in when it belongs to another tree
    fn adopt(&self, child: &Element) -> NodeId {
        if self.tree.same_tree(&child.tree) {
            return child.id;
        }
        let source = child.tree.arena();
        self.tree.arena_mut().import(&source, child.id)
    }

    /// Append `child` as the last child node.
    ///
    /// A child from another tree is copied in; use the returned handle.
    pub fn append(&self, child: &Element) -> Element {
        let id = self.adopt(child);
        self.tree.arena_mut().append(self.id, id);
        self.tree.element(id)
    }

    /// Insert `child` at `index` among all child nodes
    pub fn insert(&self, index: usize, child: &Element) -> Element {
        let id = self.adopt(child);
        self.tree.arena_mut().insert(self.id, index, id);
        self.tree.element(id)
    }

    /// Insert `child` immediately before `reference`, or append if `reference` is not a child
    pub fn insert_before(&self, child: &Element, reference: &Element) -> Element {
        let position = {
            let arena = self.tree.arena();
            arena
                .node(self.id)
                .children
                .iter()
                .position(|c| *c == reference.id && self.tree.same_tree(&reference.tree))
        };
        match position {
            Some(index) => self.insert(index, child),
            None => {
                log::warn!(
                    "insert_before: <{}> is not a child of <{}>, appending",
                    reference.name(),
                    self.name()
                );
                self.append(child)
            }
        }
    }

    /// Detach `child` from this element; returns false if it was not a child
    pub fn remove(&self, child: &Element) -> bool {
        if child.parent().as_ref() != Some(self) {
            return false;
        }
        self.tree.arena_mut().detach(child.id);
        true
    }

    /// Detach this element from its parent
    pub fn detach(&self) {
        self.tree.arena_mut().detach(self.id);
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.tree.same_tree(&other.tree)
    }
}

impl Eq for Element {}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("name", &self.name())
            .field("id", &self.id.0)
            .finish()
    }
}
