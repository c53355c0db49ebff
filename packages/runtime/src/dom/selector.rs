//! Minimal CSS selector matching.
//!
//! Supports comma lists of descendant chains of compound selectors:
//! `tag`, `#id`, `.class`, `[attr]`, `[attr=v]` and `[attr*=v]`, with
//! optionally quoted values. That covers the header scan, the add-to-cart
//! anchors and merchant custom selectors seen in practice.

use super::{Document, NodeId};

#[derive(Debug, Clone, PartialEq)]
enum AttrTest {
    Exists,
    Equals(String),
    Contains(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attributes: Vec<(String, AttrTest)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Selector {
    /// Alternatives; each is a descendant chain, outermost first
    chains: Vec<Vec<Compound>>,
}

impl Selector {
    /// `None` when the selector uses syntax outside the supported subset
    pub fn parse(source: &str) -> Option<Self> {
        let mut chains = Vec::new();
        for alternative in split_top_level(source, ',') {
            let alternative = alternative.trim();
            if alternative.is_empty() {
                return None;
            }
            let mut chain = Vec::new();
            for part in split_whitespace_outside_brackets(alternative) {
                chain.push(parse_compound(&part)?);
            }
            chains.push(chain);
        }
        if chains.is_empty() {
            return None;
        }
        Some(Self { chains })
    }

    pub fn matches(&self, doc: &Document, node: NodeId) -> bool {
        self.chains.iter().any(|chain| matches_chain(doc, node, chain))
    }
}

fn matches_chain(doc: &Document, node: NodeId, chain: &[Compound]) -> bool {
    let (last, rest) = match chain.split_last() {
        Some(split) => split,
        None => return false,
    };
    if !matches_compound(doc, node, last) {
        return false;
    }
    // Remaining compounds must match ancestors in order, innermost first
    let mut remaining = rest.iter().rev().peekable();
    for ancestor in doc.ancestors(node) {
        match remaining.peek() {
            Some(compound) if matches_compound(doc, ancestor, compound) => {
                remaining.next();
            }
            Some(_) => {}
            None => break,
        }
    }
    remaining.peek().is_none()
}

fn matches_compound(doc: &Document, node: NodeId, compound: &Compound) -> bool {
    let tag = match doc.tag(node) {
        Some(tag) => tag,
        None => return false,
    };
    if let Some(expected) = &compound.tag {
        if !expected.eq_ignore_ascii_case(tag) {
            return false;
        }
    }
    if let Some(id) = &compound.id {
        if doc.id_of(node) != Some(id.as_str()) {
            return false;
        }
    }
    if !compound.classes.iter().all(|class| doc.has_class(node, class)) {
        return false;
    }
    compound.attributes.iter().all(|(name, test)| {
        let value = doc.attr(node, name);
        match test {
            AttrTest::Exists => value.is_some(),
            AttrTest::Equals(expected) => value == Some(expected.as_str()),
            AttrTest::Contains(needle) => value.map(|v| v.contains(needle.as_str())).unwrap_or(false),
        }
    })
}

fn parse_compound(source: &str) -> Option<Compound> {
    let mut compound = Compound::default();
    let chars: Vec<char> = source.chars().collect();
    let mut i = 0;

    let read_name = |start: usize| -> (String, usize) {
        let mut end = start;
        while end < chars.len() && (chars[end].is_alphanumeric() || chars[end] == '-' || chars[end] == '_') {
            end += 1;
        }
        (chars[start..end].iter().collect(), end)
    };

    if i < chars.len() && chars[i] == '*' {
        i += 1;
    } else if i < chars.len() && chars[i].is_alphabetic() {
        let (name, end) = read_name(i);
        compound.tag = Some(name);
        i = end;
    }

    while i < chars.len() {
        match chars[i] {
            '#' => {
                let (name, end) = read_name(i + 1);
                if name.is_empty() {
                    return None;
                }
                compound.id = Some(name);
                i = end;
            }
            '.' => {
                let (name, end) = read_name(i + 1);
                if name.is_empty() {
                    return None;
                }
                compound.classes.push(name);
                i = end;
            }
            '[' => {
                let close = chars[i..].iter().position(|c| *c == ']')? + i;
                let inner: String = chars[i + 1..close].iter().collect();
                compound.attributes.push(parse_attribute(&inner)?);
                i = close + 1;
            }
            _ => return None,
        }
    }
    Some(compound)
}

fn parse_attribute(inner: &str) -> Option<(String, AttrTest)> {
    let unquote = |value: &str| value.trim().trim_matches(|c| c == '"' || c == '\'').to_string();
    if let Some((name, value)) = inner.split_once("*=") {
        return Some((name.trim().to_string(), AttrTest::Contains(unquote(value))));
    }
    if let Some((name, value)) = inner.split_once('=') {
        return Some((name.trim().to_string(), AttrTest::Equals(unquote(value))));
    }
    let name = inner.trim();
    if name.is_empty() {
        return None;
    }
    Some((name.to_string(), AttrTest::Exists))
}

fn split_top_level(source: &str, separator: char) -> Vec<String> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut current = String::new();
    for c in source.chars() {
        match c {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            _ => {}
        }
        if c == separator && depth == 0 {
            parts.push(std::mem::take(&mut current));
        } else {
            current.push(c);
        }
    }
    parts.push(current);
    parts
}

fn split_whitespace_outside_brackets(source: &str) -> Vec<String> {
    split_top_level(source, ' ')
        .into_iter()
        .map(|part| part.trim().to_string())
        .filter(|part| !part.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> (Document, NodeId, NodeId) {
        let mut doc = Document::new();
        let form = doc.create_element("form");
        doc.set_attr(form, "action", "/cart/add");
        let button = doc.create_element("button");
        doc.set_attr(button, "type", "submit");
        doc.set_attr(button, "class", "btn product-form__submit");
        doc.append_child(form, button);
        let body = doc.body();
        doc.append_child(body, form);
        (doc, form, button)
    }

    #[test]
    fn test_compound_selectors() {
        let (doc, form, button) = page();
        assert_eq!(doc.query_selector(doc.root(), "button.btn"), Some(button));
        assert_eq!(doc.query_selector(doc.root(), ".product-form__submit"), Some(button));
        assert_eq!(doc.query_selector(doc.root(), "[type=submit]"), Some(button));
        assert_eq!(doc.query_selector(doc.root(), "form[action]"), Some(form));
        assert_eq!(doc.query_selector(doc.root(), "button.missing"), None);
    }

    #[test]
    fn test_descendant_and_contains() {
        let (doc, _, button) = page();
        assert_eq!(
            doc.query_selector(doc.root(), "form[action*='/cart/add'] [type=\"submit\"]"),
            Some(button)
        );
        assert_eq!(doc.query_selector(doc.root(), "section [type=submit]"), None);
    }

    #[test]
    fn test_comma_list() {
        let (doc, form, button) = page();
        assert_eq!(doc.query_selector_all(doc.root(), "button, form"), vec![form, button]);
    }

    #[test]
    fn test_unsupported_syntax_matches_nothing() {
        let (doc, _, _) = page();
        assert_eq!(Selector::parse("div > p"), None);
        assert_eq!(doc.query_selector(doc.root(), "a:hover"), None);
    }
}
