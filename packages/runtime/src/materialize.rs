//! # DOM Materializer
//!
//! Turns one device's [`VNode`] tree into live document nodes and records
//! which nodes need behaviour: clocks, shipping bars and click handlers.
//!
//! Attribute rules:
//!
//! - `href="javascript:void(0);"` is never written
//! - `target` becomes `_blank` when set to anything, otherwise it is omitted
//! - on mobile, `mobile_styles` replaces `styles` wholesale

use crate::behavior::{Behavior, Behaviors};
use crate::dom::{Document, NodeId};
use slidebar_compiler::css::StyleRule;
use slidebar_compiler::{VNode, VOID_HREF};
use slidebar_model::ButtonRole;
use tracing::trace;

/// What a materialized slide needs wired up
#[derive(Debug, Clone, Default)]
pub struct Materialized {
    pub root: Option<NodeId>,
    pub clocks: Vec<NodeId>,
    pub shipping_bars: Vec<NodeId>,
    /// Injected `<style>` elements with the rule they render, for renumbering
    /// after slides are duplicated
    pub style_rules: Vec<(NodeId, StyleRule)>,
}

pub struct Materializer<'a> {
    doc: &'a mut Document,
    behaviors: &'a mut Behaviors,
    mobile: bool,
    slide_number: usize,
    out: Materialized,
}

impl<'a> Materializer<'a> {
    pub fn new(doc: &'a mut Document, behaviors: &'a mut Behaviors, mobile: bool) -> Self {
        Self {
            doc,
            behaviors,
            mobile,
            slide_number: 1,
            out: Materialized::default(),
        }
    }

    /// 1-based position of the slide among the host's children
    pub fn slide_number(mut self, slide_number: usize) -> Self {
        self.slide_number = slide_number;
        self
    }

    /// Build the tree and wire behaviour; the root is left detached
    pub fn build(mut self, node: &VNode) -> Materialized {
        let root = self.create(node);
        self.wire(root);
        self.out.root = Some(root);
        self.out
    }

    fn create(&mut self, node: &VNode) -> NodeId {
        match node {
            VNode::Element {
                tag,
                attributes,
                styles,
                mobile_styles,
                children,
            } => {
                let element = self.doc.create_element(tag);
                for (name, value) in attributes {
                    match name.as_str() {
                        "href" if value == VOID_HREF => {}
                        "target" => {
                            if !value.is_empty() {
                                self.doc.set_attr(element, "target", "_blank");
                            }
                        }
                        _ => self.doc.set_attr(element, name, value),
                    }
                }

                let styles = match mobile_styles {
                    Some(mobile_styles) if self.mobile => mobile_styles,
                    _ => styles,
                };
                self.doc.set_styles(element, styles.clone());

                for child in children {
                    let child = self.create(child);
                    self.doc.append_child(element, child);
                }
                element
            }
            VNode::Text { content } => self.doc.create_text(content),
            VNode::Markup { content } => self.doc.create_markup(content),
            VNode::Style { rule } => {
                let style = self.doc.create_element("style");
                let text = self.doc.create_text(&rule.css_text(self.slide_number));
                self.doc.append_child(style, text);
                self.out.style_rules.push((style, rule.clone()));
                style
            }
        }
    }

    fn wire(&mut self, root: NodeId) {
        let mut nodes = vec![root];
        nodes.extend(self.doc.descendants(root));

        for node in nodes {
            if !self.doc.is_element(node) {
                continue;
            }

            if self.doc.has_class(node, "ab-slide-btn") && self.doc.attr(node, "copyText") == Some("true") {
                let text = self.doc.attr(node, "copied-text").unwrap_or_default().to_string();
                self.behaviors.attach(node, Behavior::CopyText { text });
            }
            if self.doc.has_class(node, "ab-clock") {
                self.out.clocks.push(node);
            }
            if self.doc.has_class(node, "ab-slide-shipping") {
                self.out.shipping_bars.push(node);
            }
            if self.doc.has_class(node, "ab-slide-email") {
                for button in self.doc.find_by_class(node, "ab-slide-btn") {
                    self.behaviors.attach(button, Behavior::StopPropagation);
                }
            }
            if self.doc.has_class(node, "Quantity") {
                self.wire_quantity(node);
            }
            if self.doc.has_class(node, "ab-slide-remove") {
                self.behaviors.attach(node, Behavior::Dismiss);
            }

            match self.doc.attr(node, "data-Type").map(ButtonRole::from) {
                Some(ButtonRole::ContactSubmit) => self.behaviors.attach(node, Behavior::Submit),
                Some(ButtonRole::AddToCart) => self.behaviors.attach(node, Behavior::AddToCart),
                _ => {}
            }

            if self.doc.tag(node) == Some("a") {
                if let Some(href) = self.doc.attr(node, "href").map(str::to_string) {
                    let new_tab = self.doc.attr(node, "target") == Some("_blank");
                    self.behaviors.attach(node, Behavior::Link { href, new_tab });
                }
            }
        }
        trace!(behaviors = self.behaviors.len(), "Wired slide behaviours");
    }

    fn wire_quantity(&mut self, wrapper: NodeId) {
        let input = match self.doc.find_by_class(wrapper, "ab-qty-input").first().copied() {
            Some(input) => input,
            None => return,
        };
        for (class, delta) in [("ab-qty-minus", -1), ("ab-qty-plus", 1)] {
            for button in self.doc.find_by_class(wrapper, class) {
                self.behaviors.attach(button, Behavior::QuantityStep { input, delta });
            }
        }
    }
}

/// Rewrite every injected rule for the slide it now sits in. `host` is the
/// element whose children are the `.ab-slide` elements.
pub fn renumber_style_rules(doc: &mut Document, host: NodeId, rules: &[(NodeId, StyleRule)]) {
    for (style, rule) in rules {
        let slide = doc
            .ancestors(*style)
            .into_iter()
            .find(|ancestor| doc.parent(*ancestor) == Some(host));
        let slide_number = match slide.and_then(|slide| doc.element_index(slide)) {
            Some(index) => index,
            None => continue,
        };
        let css = rule.css_text(slide_number);
        doc.set_text_content(*style, &css);
    }
}
