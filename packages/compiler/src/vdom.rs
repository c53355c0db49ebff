use crate::css::StyleRule;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Virtual element tree produced by the compiler.
///
/// Pure data: no DOM references, serializable, deep-comparable. Maps are
/// ordered so that two compiles of the same campaign serialize identically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum VNode {
    /// HTML element
    Element {
        tag: String,
        attributes: BTreeMap<String, String>,
        styles: BTreeMap<String, String>,
        /// Replaces `styles` wholesale when materialized for mobile
        #[serde(default, skip_serializing_if = "Option::is_none")]
        mobile_styles: Option<BTreeMap<String, String>>,
        children: Vec<VNode>,
    },

    /// Text node
    Text { content: String },

    /// Trusted rich-text markup from the editor
    Markup { content: String },

    /// Injected `<style>` element carrying one generated rule
    Style { rule: StyleRule },
}

impl VNode {
    pub fn element(tag: impl Into<String>) -> Self {
        VNode::Element {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            styles: BTreeMap::new(),
            mobile_styles: None,
            children: Vec::new(),
        }
    }

    /// Element with a class attribute
    pub fn div(class: &str) -> Self {
        VNode::element("div").with_attr("class", class)
    }

    pub fn text(content: impl Into<String>) -> Self {
        VNode::Text {
            content: content.into(),
        }
    }

    pub fn markup(content: impl Into<String>) -> Self {
        VNode::Markup {
            content: content.into(),
        }
    }

    pub fn style(rule: StyleRule) -> Self {
        VNode::Style { rule }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let VNode::Element {
            ref mut attributes, ..
        } = self
        {
            attributes.insert(key.into(), value.into());
        }
        self
    }

    /// Set an attribute only when a non-empty value is configured
    pub fn with_attr_opt(self, key: &str, value: Option<impl Into<String>>) -> Self {
        let value: Option<String> = value.map(Into::into);
        match value {
            Some(value) if !value.is_empty() => self.with_attr(key, value),
            _ => self,
        }
    }

    /// Append a class to the class attribute
    pub fn with_class(mut self, class: &str) -> Self {
        if let VNode::Element {
            ref mut attributes, ..
        } = self
        {
            let entry = attributes.entry("class".to_string()).or_default();
            if !entry.split_whitespace().any(|c| c == class) {
                if !entry.is_empty() {
                    entry.push(' ');
                }
                entry.push_str(class);
            }
        }
        self
    }

    pub fn with_style(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let VNode::Element { ref mut styles, .. } = self {
            styles.insert(key.into(), value.into());
        }
        self
    }

    /// Set a style only when a value is configured
    pub fn with_style_opt(self, key: &str, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => {
                let value = value.into();
                if value.is_empty() {
                    self
                } else {
                    self.with_style(key, value)
                }
            }
            None => self,
        }
    }

    pub fn with_mobile_styles(mut self, new_styles: BTreeMap<String, String>) -> Self {
        if let VNode::Element {
            ref mut mobile_styles,
            ..
        } = self
        {
            *mobile_styles = Some(new_styles);
        }
        self
    }

    pub fn with_child(mut self, child: VNode) -> Self {
        if let VNode::Element {
            ref mut children, ..
        } = self
        {
            children.push(child);
        }
        self
    }

    pub fn with_children(mut self, new_children: Vec<VNode>) -> Self {
        if let VNode::Element {
            ref mut children, ..
        } = self
        {
            children.extend(new_children);
        }
        self
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            VNode::Element { tag, .. } => Some(tag),
            _ => None,
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        match self {
            VNode::Element { attributes, .. } => attributes.get(name).map(String::as_str),
            _ => None,
        }
    }

    pub fn style_value(&self, name: &str) -> Option<&str> {
        match self {
            VNode::Element { styles, .. } => styles.get(name).map(String::as_str),
            _ => None,
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .map(|classes| classes.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    pub fn children(&self) -> &[VNode] {
        match self {
            VNode::Element { children, .. } => children,
            _ => &[],
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<VNode>> {
        match self {
            VNode::Element { children, .. } => Some(children),
            _ => None,
        }
    }

    /// Children that are elements (what CSS `nth-child` counts)
    pub fn element_children(&self) -> impl Iterator<Item = &VNode> {
        self.children().iter().filter(|c| c.tag().is_some() || matches!(c, VNode::Style { .. }))
    }

    /// All descendants (including self) matching a predicate, depth first
    pub fn find_all<'a>(&'a self, pred: &dyn Fn(&VNode) -> bool) -> Vec<&'a VNode> {
        let mut out = Vec::new();
        self.collect(pred, &mut out);
        out
    }

    fn collect<'a>(&'a self, pred: &dyn Fn(&VNode) -> bool, out: &mut Vec<&'a VNode>) {
        if pred(self) {
            out.push(self);
        }
        for child in self.children() {
            child.collect(pred, out);
        }
    }

    pub fn find_by_class(&self, class: &str) -> Vec<&VNode> {
        self.find_all(&|node| node.has_class(class))
    }

    pub fn count_tag(&self, tag: &str) -> usize {
        self.find_all(&|node| node.tag() == Some(tag)).len()
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self) -> String {
        match self {
            VNode::Text { content } | VNode::Markup { content } => content.clone(),
            VNode::Style { .. } => String::new(),
            VNode::Element { children, .. } => children.iter().map(VNode::text_content).collect(),
        }
    }

    /// Style rules carried anywhere in this tree
    pub fn style_rules(&self) -> Vec<&StyleRule> {
        let mut rules = Vec::new();
        self.collect_rules(&mut rules);
        rules
    }

    fn collect_rules<'a>(&'a self, out: &mut Vec<&'a StyleRule>) {
        match self {
            VNode::Style { rule } => out.push(rule),
            VNode::Element { children, .. } => {
                for child in children {
                    child.collect_rules(out);
                }
            }
            _ => {}
        }
    }
}
