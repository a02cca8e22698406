//! The document tree the engine binds against.
//!
//! Hosts build a tree of elements and text nodes, hand it to
//! [`Tangle`](crate::Tangle), and afterwards read patched state back out of
//! it (or mutate it further from view code). Nodes live in a slotmap arena,
//! so a stale [`NodeId`] degrades to a no-op lookup instead of a panic.
//!
//! Elements carry string attributes. Three of them have meaning to the
//! engine: `class` (whitespace-separated view-type names), `data-var`
//! (whitespace-separated bound variable names), and `data-format` (formatter
//! name for plain text bindings). Everything else is host/widget territory,
//! e.g. `data-min` on an adjustable number.

use std::collections::HashMap;

use bitflags::bitflags;
use slotmap::{SlotMap, new_key_type};
use smallvec::SmallVec;

new_key_type! {
    /// Arena key for a document node.
    pub struct NodeId;
}

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct NodeFlags: u8 {
        /// Excluded from rendered text; conditional views toggle this in
        /// place of `style.display`.
        const HIDDEN = 1 << 0;
    }
}

#[derive(Clone, Debug)]
pub struct ElementData {
    pub tag: String,
    attributes: HashMap<String, String>,
    pub flags: NodeFlags,
}

#[derive(Clone, Debug)]
pub enum NodeKind {
    Element(ElementData),
    Text(String),
}

#[derive(Clone, Debug)]
pub struct Node {
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub kind: NodeKind,
}

impl Node {
    fn element(kind: ElementData) -> Self {
        Node {
            parent: None,
            children: Vec::new(),
            kind: NodeKind::Element(kind),
        }
    }

    pub fn is_element(&self) -> bool {
        matches!(self.kind, NodeKind::Element(_))
    }
}

/// Builder for inserting an element in one expression.
///
/// ```rust
/// use tangle_core::{Document, Element};
///
/// let mut doc = Document::new();
/// let root = doc.root();
/// doc.insert(
///     root,
///     Element::new("span")
///         .class("TKAdjustableNumber")
///         .var("cookies")
///         .attr("data-min", "1")
///         .text(" cookies"),
/// );
/// ```
#[derive(Clone, Debug, Default)]
pub struct Element {
    tag: String,
    attributes: Vec<(String, String)>,
    text: Option<String>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Element {
            tag: tag.into(),
            ..Element::default()
        }
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Appends a name to the `class` attribute.
    pub fn class(self, name: &str) -> Self {
        self.append_to("class", name)
    }

    /// Appends a name to the `data-var` attribute.
    pub fn var(self, name: &str) -> Self {
        self.append_to("data-var", name)
    }

    /// Sets the `data-format` attribute.
    pub fn format(self, name: &str) -> Self {
        self.attr("data-format", name)
    }

    /// Static text content, appended as a child text node.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    fn append_to(mut self, attr: &str, name: &str) -> Self {
        if let Some((_, existing)) = self.attributes.iter_mut().find(|(a, _)| a == attr) {
            existing.push(' ');
            existing.push_str(name);
        } else {
            self.attributes.push((attr.to_string(), name.to_string()));
        }
        self
    }
}

pub struct Document {
    nodes: SlotMap<NodeId, Node>,
    root: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node::element(ElementData {
            tag: "root".to_string(),
            attributes: HashMap::new(),
            flags: NodeFlags::empty(),
        }));
        Document { nodes, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        match &self.nodes.get(id)?.kind {
            NodeKind::Element(data) => Some(data),
            NodeKind::Text(_) => None,
        }
    }

    fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        match &mut self.nodes.get_mut(id)?.kind {
            NodeKind::Element(data) => Some(data),
            NodeKind::Text(_) => None,
        }
    }

    // ------------------------------------------------------------------
    // construction

    /// Creates a detached element.
    pub fn create_element(&mut self, tag: impl Into<String>) -> NodeId {
        self.nodes.insert(Node::element(ElementData {
            tag: tag.into(),
            attributes: HashMap::new(),
            flags: NodeFlags::empty(),
        }))
    }

    /// Creates a detached text node.
    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.nodes.insert(Node {
            parent: None,
            children: Vec::new(),
            kind: NodeKind::Text(text.into()),
        })
    }

    /// Builds and appends an element from an [`Element`] description.
    pub fn insert(&mut self, parent: NodeId, element: Element) -> NodeId {
        let id = self.create_element(element.tag);
        for (name, value) in element.attributes {
            self.set_attr(id, &name, value);
        }
        if let Some(text) = element.text {
            let t = self.create_text(text);
            self.append(id, t);
        }
        self.append(parent, id);
        id
    }

    /// Appends a text node under `parent`.
    pub fn append_text(&mut self, parent: NodeId, text: impl Into<String>) -> NodeId {
        let id = self.create_text(text);
        self.append(parent, id);
        id
    }

    /// Appends `child` as the last child of `parent`. No-op on stale ids.
    pub fn append(&mut self, parent: NodeId, child: NodeId) {
        self.attach(parent, child, usize::MAX);
    }

    /// Inserts `child` as the first child of `parent` (before `firstChild`).
    pub fn prepend(&mut self, parent: NodeId, child: NodeId) {
        self.attach(parent, child, 0);
    }

    fn attach(&mut self, parent: NodeId, child: NodeId, index: usize) {
        if parent == child || !self.nodes.contains_key(parent) || !self.nodes.contains_key(child) {
            return;
        }
        self.detach(child);
        self.nodes[child].parent = Some(parent);
        let children = &mut self.nodes[parent].children;
        let index = index.min(children.len());
        children.insert(index, child);
    }

    fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id].parent.take() {
            if let Some(node) = self.nodes.get_mut(parent) {
                node.children.retain(|&c| c != id);
            }
        }
    }

    /// Removes a node and its whole subtree. No-op on stale ids or the root.
    pub fn remove(&mut self, id: NodeId) {
        if id == self.root || !self.nodes.contains_key(id) {
            return;
        }
        self.detach(id);
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if let Some(node) = self.nodes.remove(next) {
                stack.extend(node.children);
            }
        }
    }

    // ------------------------------------------------------------------
    // attributes and classes

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)?.attributes.get(name).map(String::as_str)
    }

    pub fn set_attr(&mut self, id: NodeId, name: &str, value: impl Into<String>) {
        if let Some(element) = self.element_mut(id) {
            element.attributes.insert(name.to_string(), value.into());
        }
    }

    /// Whitespace-split `class` attribute.
    pub fn classes(&self, id: NodeId) -> impl Iterator<Item = &str> {
        self.attr(id, "class")
            .into_iter()
            .flat_map(str::split_whitespace)
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.classes(id).any(|c| c == class)
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) {
        if self.has_class(id, class) {
            return;
        }
        let mut value = self.attr(id, "class").unwrap_or("").to_string();
        if !value.is_empty() {
            value.push(' ');
        }
        value.push_str(class);
        self.set_attr(id, "class", value);
    }

    pub fn remove_class(&mut self, id: NodeId, class: &str) {
        if !self.has_class(id, class) {
            return;
        }
        let value = self
            .classes(id)
            .filter(|c| *c != class)
            .collect::<Vec<_>>()
            .join(" ");
        self.set_attr(id, "class", value);
    }

    /// Whitespace-split `data-var` attribute.
    pub fn var_names(&self, id: NodeId) -> SmallVec<[String; 2]> {
        self.attr(id, "data-var")
            .into_iter()
            .flat_map(str::split_whitespace)
            .map(String::from)
            .collect()
    }

    pub fn is_hidden(&self, id: NodeId) -> bool {
        self.element(id)
            .map(|e| e.flags.contains(NodeFlags::HIDDEN))
            .unwrap_or(false)
    }

    pub fn set_hidden(&mut self, id: NodeId, hidden: bool) {
        if let Some(element) = self.element_mut(id) {
            element.flags.set(NodeFlags::HIDDEN, hidden);
        }
    }

    // ------------------------------------------------------------------
    // traversal

    /// Children in document order; empty for stale ids.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Element children only, in document order.
    pub fn element_children(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|&c| self.nodes.get(c).map(Node::is_element).unwrap_or(false))
            .collect()
    }

    /// All element nodes strictly below `from`, in document (pre-)order.
    pub fn descendants(&self, from: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(from).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            if let Some(node) = self.nodes.get(id) {
                if node.is_element() {
                    out.push(id);
                }
                stack.extend(node.children.iter().rev().copied());
            }
        }
        out
    }

    // ------------------------------------------------------------------
    // text

    /// Content of a text node.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match &self.nodes.get(id)?.kind {
            NodeKind::Text(text) => Some(text),
            NodeKind::Element(_) => None,
        }
    }

    /// Replaces the content of a text node. No-op on elements and stale ids.
    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) {
        if let Some(node) = self.nodes.get_mut(id) {
            if let NodeKind::Text(content) = &mut node.kind {
                *content = text.into();
            }
        }
    }

    /// Concatenated text content of a subtree, skipping hidden elements.
    pub fn rendered_text(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.nodes.get(id) else { return };
        match &node.kind {
            NodeKind::Text(text) => out.push_str(text),
            NodeKind::Element(data) => {
                if data.flags.contains(NodeFlags::HIDDEN) {
                    return;
                }
                for &child in &node.children {
                    self.collect_text(child, out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_round_trip() {
        let mut doc = Document::new();
        let root = doc.root();
        let span = doc.insert(
            root,
            Element::new("span")
                .class("TKToggle")
                .class("TKIf")
                .var("isOn")
                .attr("data-invert", "1")
                .text("on"),
        );

        assert_eq!(doc.attr(span, "class"), Some("TKToggle TKIf"));
        assert!(doc.has_class(span, "TKIf"));
        assert_eq!(doc.var_names(span).as_slice(), ["isOn".to_string()]);
        assert_eq!(doc.attr(span, "data-invert"), Some("1"));
        assert_eq!(doc.rendered_text(span), "on");
    }

    #[test]
    fn descendants_are_document_order() {
        let mut doc = Document::new();
        let root = doc.root();
        let a = doc.insert(root, Element::new("p"));
        let b = doc.insert(a, Element::new("span"));
        doc.append_text(a, "x");
        let c = doc.insert(root, Element::new("p"));

        assert_eq!(doc.descendants(root), vec![a, b, c]);
        assert_eq!(doc.element_children(a), vec![b]);
    }

    #[test]
    fn prepend_lands_before_first_child() {
        let mut doc = Document::new();
        let root = doc.root();
        let span = doc.insert(root, Element::new("span").text(" cookies"));
        let count = doc.create_text("3");
        doc.prepend(span, count);

        assert_eq!(doc.rendered_text(span), "3 cookies");
        doc.set_text(count, "4");
        assert_eq!(doc.rendered_text(span), "4 cookies");
    }

    #[test]
    fn hidden_subtrees_drop_out_of_rendered_text() {
        let mut doc = Document::new();
        let root = doc.root();
        let shown = doc.insert(root, Element::new("span").text("shown "));
        let hidden = doc.insert(root, Element::new("span").text("hidden"));

        doc.set_hidden(hidden, true);
        assert!(doc.is_hidden(hidden));
        assert_eq!(doc.rendered_text(root), "shown ");
        let _ = shown;
    }

    #[test]
    fn class_add_remove() {
        let mut doc = Document::new();
        let root = doc.root();
        let span = doc.insert(root, Element::new("span").class("a"));

        doc.add_class(span, "b");
        doc.add_class(span, "b");
        assert_eq!(doc.attr(span, "class"), Some("a b"));
        doc.remove_class(span, "a");
        assert_eq!(doc.attr(span, "class"), Some("b"));
    }

    #[test]
    fn stale_ids_are_inert() {
        let mut doc = Document::new();
        let root = doc.root();
        let span = doc.insert(root, Element::new("span"));
        doc.remove(span);

        assert!(doc.node(span).is_none());
        assert_eq!(doc.attr(span, "class"), None);
        doc.set_attr(span, "class", "x");
        doc.set_hidden(span, true);
        assert!(doc.children(span).is_empty());
        assert_eq!(doc.children(root).len(), 0);
    }
}
