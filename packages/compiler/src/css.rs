//! CSS rule text builder.
//!
//! Hover styles are injected as `<style>` elements scoped by `nth-child`
//! selectors. Storefront themes sit in the same cascade, so the generated text
//! is pinned exactly: `selector{prop:value !important;...}`.
//!
//! Selectors are built as templates containing bare `nth-child` tokens. The
//! slide position is only known once slides are mounted, so tokens are
//! resolved at materialization time:
//!
//! - per-button rules carry two tokens (slide, then button)
//! - whole-bar rules carry one token (slide)

use serde::{Deserialize, Serialize};

pub const NTH_CHILD: &str = "nth-child";

/// One generated rule with unresolved `nth-child` tokens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleRule {
    pub selector: String,
    pub properties: Vec<(String, String)>,
    /// 1-based sibling position of the owning button, set during assembly
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sibling_index: Option<usize>,
}

impl StyleRule {
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            properties: Vec::new(),
            sibling_index: None,
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.push((key.into(), value.into()));
        self
    }

    /// Add a property only when a non-empty value is configured
    pub fn with_property_opt(self, key: &str, value: Option<&str>) -> Self {
        match value {
            Some(value) if !value.is_empty() => self.with_property(key, value),
            _ => self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Selector with every token resolved for the given 1-based slide number
    pub fn resolved_selector(&self, slide_number: usize) -> String {
        match self.sibling_index {
            Some(button_number) => resolve_nth_child_pair(&self.selector, slide_number, button_number),
            None => resolve_nth_child(&self.selector, slide_number),
        }
    }

    /// Final CSS text for the given 1-based slide number
    pub fn css_text(&self, slide_number: usize) -> String {
        to_css_text(&self.resolved_selector(slide_number), &self.properties)
    }
}

/// `#host>.ab-slide:nth-child .ab-slide-btn:nth-child:hover a`
pub fn button_hover_selector(host_id: &str) -> String {
    format!("#{host_id}>.ab-slide:{NTH_CHILD} .ab-slide-btn:{NTH_CHILD}:hover a")
}

/// Hover rule on the whole slide (entire-bar-clickable mode)
pub fn slide_hover_selector(host_id: &str, suffix: &str) -> String {
    if suffix.is_empty() {
        format!("#{host_id}>.ab-slide:{NTH_CHILD}:hover")
    } else {
        format!("#{host_id}>.ab-slide:{NTH_CHILD}:hover {suffix}")
    }
}

/// Replace the first bare `nth-child` token with `nth-child(n)`
pub fn resolve_nth_child(template: &str, n: usize) -> String {
    replace_bare_token(template, n)
}

/// Replace the first bare token with the slide number, then the next bare
/// token with the button number.
pub fn resolve_nth_child_pair(template: &str, slide_number: usize, button_number: usize) -> String {
    let once = replace_bare_token(template, slide_number);
    replace_bare_token(&once, button_number)
}

fn replace_bare_token(input: &str, n: usize) -> String {
    let mut search_from = 0;
    while let Some(offset) = input[search_from..].find(NTH_CHILD) {
        let start = search_from + offset;
        let end = start + NTH_CHILD.len();
        if input[end..].starts_with('(') {
            search_from = end;
            continue;
        }
        let mut out = String::with_capacity(input.len() + 4);
        out.push_str(&input[..end]);
        out.push_str(&format!("({n})"));
        out.push_str(&input[end..]);
        return out;
    }
    input.to_string()
}

/// `selector{prop:value !important;...}`
pub fn to_css_text(selector: &str, properties: &[(String, String)]) -> String {
    let mut css = String::new();
    css.push_str(selector);
    css.push('{');
    for (key, value) in properties {
        css.push_str(key);
        css.push(':');
        css.push_str(value);
        css.push_str(" !important;");
    }
    css.push('}');
    css
}

/// Keyframes and animation for the marquee strategy.
///
/// The host element itself is the moving track. The keyframes name is scoped
/// by host id so several marquee campaigns can share one page.
pub fn marquee_css(host_id: &str, translate_percent: f64, duration_secs: f64) -> String {
    format!(
        "@keyframes marquee-{host_id}{{0%{{transform:translateX(0)}}100%{{transform:translateX(-{:.4}%)}}}}\
         #{host_id}{{animation-name:marquee-{host_id};animation-duration:{:.2}s;\
         animation-timing-function:linear;animation-iteration-count:infinite;}}",
        translate_percent, duration_secs
    )
}
