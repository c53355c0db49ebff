//! Layout measurement.
//!
//! The engine needs two numbers from the page: the rendered height of a slide
//! (to size the host container) and the rendered width of a slide (to fill
//! the viewport in marquee mode). A real browser binding answers them from
//! layout; [`EstimatedLayout`] approximates them from font sizes, text length
//! and explicit pixel styles so the engine is fully testable headless.

use crate::dom::{Document, NodeId, NodeKind};
use regex::Regex;
use std::sync::OnceLock;

pub trait Layout {
    /// Height of `node` when laid out at `available_width`
    fn client_height(&self, doc: &Document, node: NodeId, available_width: f64) -> f64;

    /// Unwrapped single-line width of `node`
    fn offset_width(&self, doc: &Document, node: NodeId) -> f64;
}

#[derive(Debug, Clone)]
pub struct EstimatedLayout {
    /// Average glyph advance as a fraction of the font size
    pub char_width_ratio: f64,
    pub line_height_ratio: f64,
    pub default_font_size: f64,
}

impl Default for EstimatedLayout {
    fn default() -> Self {
        Self {
            char_width_ratio: 0.5,
            line_height_ratio: 1.5,
            default_font_size: 16.0,
        }
    }
}

fn tag_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"<[^>]*>").ok()).as_ref()
}

/// Visible text of trusted markup
pub fn strip_tags(markup: &str) -> String {
    let text = match tag_pattern() {
        Some(pattern) => pattern.replace_all(markup, "").into_owned(),
        None => markup.to_string(),
    };
    text.replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&times;", "x")
}

/// Leading pixel number of a CSS length such as `12px` or `12px 0`
pub fn parse_px(value: &str) -> Option<f64> {
    let first = value.split_whitespace().next()?;
    first.strip_suffix("px").unwrap_or(first).parse::<f64>().ok()
}

/// `(vertical, horizontal)` padding in px from a `padding` shorthand
fn padding_of(doc: &Document, node: NodeId) -> (f64, f64) {
    let value = match doc.style(node, "padding") {
        Some(value) => value,
        None => return (0.0, 0.0),
    };
    let parts: Vec<f64> = value.split_whitespace().filter_map(parse_px).collect();
    match parts.as_slice() {
        [all] => (*all, *all),
        [vertical, horizontal] | [vertical, horizontal, _] | [vertical, horizontal, _, _] => {
            (*vertical, *horizontal)
        }
        _ => (0.0, 0.0),
    }
}

fn is_hidden(doc: &Document, node: NodeId) -> bool {
    doc.style(node, "display") == Some("none")
}

impl EstimatedLayout {
    fn font_size(&self, doc: &Document, node: NodeId) -> f64 {
        doc.inherited_style(node, "font-size")
            .and_then(parse_px)
            .unwrap_or(self.default_font_size)
    }

    fn text_width(&self, doc: &Document, text_node: NodeId, content: &str) -> f64 {
        content.chars().count() as f64 * self.font_size(doc, text_node) * self.char_width_ratio
    }

    fn line_height(&self, doc: &Document, node: NodeId) -> f64 {
        self.font_size(doc, node) * self.line_height_ratio
    }

    /// Tallest single line inside `node`
    fn max_line_height(&self, doc: &Document, node: NodeId) -> f64 {
        let mut tallest = 0.0_f64;
        for child in doc.descendants(node) {
            if doc.ancestors(child).iter().any(|a| doc.contains(node, *a) && is_hidden(doc, *a)) {
                continue;
            }
            if matches!(doc.kind(child), NodeKind::Text(_) | NodeKind::Markup(_)) {
                tallest = tallest.max(self.line_height(doc, child));
            }
        }
        tallest
    }
}

impl Layout for EstimatedLayout {
    fn client_height(&self, doc: &Document, node: NodeId, available_width: f64) -> f64 {
        if is_hidden(doc, node) {
            return 0.0;
        }
        if let Some(height) = doc.style(node, "height").and_then(parse_px) {
            return height;
        }
        let (vertical, horizontal) = padding_of(doc, node);
        let inner_width = (available_width - 2.0 * horizontal).max(1.0);
        let content_width = self.offset_width(doc, node) - 2.0 * horizontal;
        let lines = (content_width / inner_width).ceil().max(1.0);
        let line = self.max_line_height(doc, node);
        if line == 0.0 {
            return 2.0 * vertical;
        }
        lines * line + 2.0 * vertical
    }

    fn offset_width(&self, doc: &Document, node: NodeId) -> f64 {
        match doc.kind(node) {
            NodeKind::Text(content) => self.text_width(doc, node, content),
            NodeKind::Markup(content) => self.text_width(doc, node, &strip_tags(content)),
            NodeKind::Element { tag, .. } => {
                if is_hidden(doc, node) || tag == "style" {
                    return 0.0;
                }
                if let Some(width) = doc.style(node, "width").and_then(parse_px) {
                    return width;
                }
                let (_, horizontal) = padding_of(doc, node);
                let gap = doc.style(node, "gap").and_then(parse_px).unwrap_or(0.0);
                let children: Vec<f64> = doc
                    .children(node)
                    .iter()
                    .map(|child| self.offset_width(doc, *child))
                    .filter(|width| *width > 0.0)
                    .collect();
                let gaps = gap * children.len().saturating_sub(1) as f64;
                children.iter().sum::<f64>() + gaps + 2.0 * horizontal
            }
        }
    }
}
