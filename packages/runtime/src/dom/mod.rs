//! # In-memory DOM
//!
//! A small arena document standing in for the storefront page. It models what
//! the engine touches: elements with attributes and inline styles, text and
//! trusted markup nodes, tree edits, selector queries and serialization.
//!
//! Removed nodes stay in the arena, detached. [`Document::is_connected`]
//! tells whether a node is still reachable from the document root, which is
//! how widgets notice they were torn down underneath them.

mod html;
mod selector;

pub use selector::Selector;

use std::collections::BTreeMap;

/// Handle to a node in a [`Document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Element {
        tag: String,
        attributes: BTreeMap<String, String>,
        styles: BTreeMap<String, String>,
    },
    Text(String),
    /// Trusted inner HTML, serialized verbatim
    Markup(String),
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
    head: NodeId,
    body: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Empty `<html><head></head><body></body></html>` document
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            root: NodeId(0),
            head: NodeId(0),
            body: NodeId(0),
        };
        let root = doc.create_element("html");
        let head = doc.create_element("head");
        let body = doc.create_element("body");
        doc.append_child(root, head);
        doc.append_child(root, body);
        doc.root = root;
        doc.head = head;
        doc.body = body;
        doc
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn head(&self) -> NodeId {
        self.head
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(NodeKind::Element {
            tag: tag.to_string(),
            attributes: BTreeMap::new(),
            styles: BTreeMap::new(),
        })
    }

    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.push(NodeKind::Text(content.to_string()))
    }

    pub fn create_markup(&mut self, content: &str) -> NodeId {
        self.push(NodeKind::Markup(content.to_string()))
    }

    pub fn kind(&self, node: NodeId) -> &NodeKind {
        &self.nodes[node.0].kind
    }

    pub fn tag(&self, node: NodeId) -> Option<&str> {
        match &self.nodes[node.0].kind {
            NodeKind::Element { tag, .. } => Some(tag),
            _ => None,
        }
    }

    pub fn is_element(&self, node: NodeId) -> bool {
        self.tag(node).is_some()
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    /// Element children only (what `nth-child` counts)
    pub fn element_children(&self, node: NodeId) -> Vec<NodeId> {
        self.children(node)
            .iter()
            .copied()
            .filter(|child| self.is_element(*child))
            .collect()
    }

    pub fn first_child(&self, node: NodeId) -> Option<NodeId> {
        self.children(node).first().copied()
    }

    /// 1-based position among element siblings
    pub fn element_index(&self, node: NodeId) -> Option<usize> {
        let parent = self.parent(node)?;
        self.element_children(parent)
            .iter()
            .position(|child| *child == node)
            .map(|index| index + 1)
    }

    // ---- tree edits ----

    /// Detach `node` from its current parent, if any
    pub fn remove(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node.0].parent.take() {
            self.nodes[parent.0].children.retain(|child| *child != node);
        }
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.remove(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    pub fn prepend_child(&mut self, parent: NodeId, child: NodeId) {
        self.remove(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.insert(0, child);
    }

    /// Insert `child` right before `reference`; appends when `reference`
    /// has no parent
    pub fn insert_before(&mut self, reference: NodeId, child: NodeId) {
        let parent = match self.parent(reference) {
            Some(parent) => parent,
            None => return,
        };
        self.remove(child);
        let index = self.nodes[parent.0]
            .children
            .iter()
            .position(|c| *c == reference)
            .unwrap_or(self.nodes[parent.0].children.len());
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.insert(index, child);
    }

    pub fn insert_after(&mut self, reference: NodeId, child: NodeId) {
        let parent = match self.parent(reference) {
            Some(parent) => parent,
            None => return,
        };
        self.remove(child);
        let index = self.nodes[parent.0]
            .children
            .iter()
            .position(|c| *c == reference)
            .map(|i| i + 1)
            .unwrap_or(self.nodes[parent.0].children.len());
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.insert(index, child);
    }

    /// Whether `node` is reachable from the document root
    pub fn is_connected(&self, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == self.root {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Ancestors from the parent up to the document root
    pub fn ancestors(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut current = self.parent(node);
        while let Some(id) = current {
            out.push(id);
            current = self.parent(id);
        }
        out
    }

    /// Descendants of `node` in document order, excluding `node`
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(node).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }

    /// Deep copy of `node`, detached. Returns the new root and every
    /// `(original, copy)` pair so callers can carry per-node state across.
    pub fn clone_subtree(&mut self, node: NodeId) -> (NodeId, Vec<(NodeId, NodeId)>) {
        let mut pairs = Vec::new();
        let copy = self.clone_into(node, &mut pairs);
        (copy, pairs)
    }

    fn clone_into(&mut self, node: NodeId, pairs: &mut Vec<(NodeId, NodeId)>) -> NodeId {
        let kind = self.nodes[node.0].kind.clone();
        let copy = self.push(kind);
        pairs.push((node, copy));
        let children = self.nodes[node.0].children.clone();
        for child in children {
            let child_copy = self.clone_into(child, pairs);
            self.nodes[child_copy.0].parent = Some(copy);
            self.nodes[copy.0].children.push(child_copy);
        }
        copy
    }

    // ---- attributes ----

    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        match &self.nodes[node.0].kind {
            NodeKind::Element { attributes, .. } => attributes.get(name).map(String::as_str),
            _ => None,
        }
    }

    pub fn attributes(&self, node: NodeId) -> Option<&BTreeMap<String, String>> {
        match &self.nodes[node.0].kind {
            NodeKind::Element { attributes, .. } => Some(attributes),
            _ => None,
        }
    }

    pub fn set_attr(&mut self, node: NodeId, name: &str, value: &str) {
        if let NodeKind::Element { attributes, .. } = &mut self.nodes[node.0].kind {
            attributes.insert(name.to_string(), value.to_string());
        }
    }

    pub fn remove_attr(&mut self, node: NodeId, name: &str) {
        if let NodeKind::Element { attributes, .. } = &mut self.nodes[node.0].kind {
            attributes.remove(name);
        }
    }

    pub fn id_of(&self, node: NodeId) -> Option<&str> {
        self.attr(node, "id")
    }

    // ---- classes ----

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.attr(node, "class")
            .map(|classes| classes.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if self.has_class(node, class) || !self.is_element(node) {
            return;
        }
        let mut classes = self.attr(node, "class").unwrap_or_default().to_string();
        if !classes.is_empty() {
            classes.push(' ');
        }
        classes.push_str(class);
        self.set_attr(node, "class", &classes);
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(classes) = self.attr(node, "class") {
            let kept: Vec<&str> = classes.split_whitespace().filter(|c| *c != class).collect();
            let kept = kept.join(" ");
            self.set_attr(node, "class", &kept);
        }
    }

    // ---- inline styles ----

    pub fn style(&self, node: NodeId, name: &str) -> Option<&str> {
        match &self.nodes[node.0].kind {
            NodeKind::Element { styles, .. } => styles.get(name).map(String::as_str),
            _ => None,
        }
    }

    pub fn styles(&self, node: NodeId) -> Option<&BTreeMap<String, String>> {
        match &self.nodes[node.0].kind {
            NodeKind::Element { styles, .. } => Some(styles),
            _ => None,
        }
    }

    pub fn set_style(&mut self, node: NodeId, name: &str, value: &str) {
        if let NodeKind::Element { styles, .. } = &mut self.nodes[node.0].kind {
            styles.insert(name.to_string(), value.to_string());
        }
    }

    pub fn remove_style(&mut self, node: NodeId, name: &str) {
        if let NodeKind::Element { styles, .. } = &mut self.nodes[node.0].kind {
            styles.remove(name);
        }
    }

    /// Replace the whole inline style map
    pub fn set_styles(&mut self, node: NodeId, new_styles: BTreeMap<String, String>) {
        if let NodeKind::Element { styles, .. } = &mut self.nodes[node.0].kind {
            *styles = new_styles;
        }
    }

    /// Inline style of `node` or its nearest ancestor that sets it
    pub fn inherited_style(&self, node: NodeId, name: &str) -> Option<&str> {
        if let Some(value) = self.style(node, name) {
            return Some(value);
        }
        self.ancestors(node)
            .into_iter()
            .find_map(|ancestor| self.style(ancestor, name))
    }

    // ---- text ----

    pub fn text_content(&self, node: NodeId) -> String {
        match &self.nodes[node.0].kind {
            NodeKind::Text(content) | NodeKind::Markup(content) => content.clone(),
            NodeKind::Element { .. } => self
                .children(node)
                .iter()
                .map(|child| self.text_content(*child))
                .collect(),
        }
    }

    /// Replace all children with a single text node
    pub fn set_text_content(&mut self, node: NodeId, content: &str) {
        let children = self.nodes[node.0].children.clone();
        for child in children {
            self.remove(child);
        }
        let text = self.create_text(content);
        self.append_child(node, text);
    }

    // ---- queries ----

    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .find(|node| self.id_of(*node) == Some(id))
    }

    /// First descendant of `scope` matching `selector`
    pub fn query_selector(&self, scope: NodeId, selector: &str) -> Option<NodeId> {
        let parsed = Selector::parse(selector)?;
        self.descendants(scope)
            .into_iter()
            .find(|node| parsed.matches(self, *node))
    }

    pub fn query_selector_all(&self, scope: NodeId, selector: &str) -> Vec<NodeId> {
        match Selector::parse(selector) {
            Some(parsed) => self
                .descendants(scope)
                .into_iter()
                .filter(|node| parsed.matches(self, *node))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Descendants carrying a given class, `scope` included
    pub fn find_by_class(&self, scope: NodeId, class: &str) -> Vec<NodeId> {
        let mut out = Vec::new();
        if self.has_class(scope, class) {
            out.push(scope);
        }
        out.extend(
            self.descendants(scope)
                .into_iter()
                .filter(|node| self.has_class(*node, class)),
        );
        out
    }

    /// Elements whose inline style `name` equals `value`, excluding anything
    /// inside `skip`
    pub fn elements_with_style(&self, name: &str, value: &str, skip: Option<NodeId>) -> Vec<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .filter(|node| self.style(*node, name) == Some(value))
            .filter(|node| skip.map(|skip| !self.contains(skip, *node)).unwrap_or(true))
            .collect()
    }

    // ---- serialization ----

    pub fn outer_html(&self, node: NodeId) -> String {
        html::outer_html(self, node)
    }

    pub fn inner_html(&self, node: NodeId) -> String {
        self.children(node)
            .iter()
            .map(|child| html::outer_html(self, *child))
            .collect()
    }
}
