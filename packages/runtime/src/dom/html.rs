use super::{Document, NodeId, NodeKind};
use slidebar_compiler::html::{escape_html, is_self_closing};

/// Compact HTML serialization
pub(super) fn outer_html(doc: &Document, node: NodeId) -> String {
    let mut out = String::new();
    write_node(doc, node, &mut out);
    out
}

fn write_node(doc: &Document, node: NodeId, out: &mut String) {
    match doc.kind(node) {
        NodeKind::Text(content) => {
            // Style and script bodies are raw text
            let raw = doc
                .parent(node)
                .and_then(|parent| doc.tag(parent))
                .map(|tag| tag == "style" || tag == "script")
                .unwrap_or(false);
            if raw {
                out.push_str(content);
            } else {
                out.push_str(&escape_html(content));
            }
        }
        NodeKind::Markup(content) => out.push_str(content),
        NodeKind::Element {
            tag,
            attributes,
            styles,
        } => {
            out.push('<');
            out.push_str(tag);
            for (name, value) in attributes {
                out.push_str(&format!(" {}=\"{}\"", name, escape_html(value)));
            }
            if !styles.is_empty() {
                let inline: Vec<String> = styles
                    .iter()
                    .map(|(key, value)| format!("{}: {};", key, value))
                    .collect();
                out.push_str(&format!(" style=\"{}\"", escape_html(&inline.join(" "))));
            }
            if doc.children(node).is_empty() && is_self_closing(tag) {
                out.push_str(" />");
                return;
            }
            out.push('>');
            for child in doc.children(node) {
                write_node(doc, *child, out);
            }
            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_elements_text_and_styles() {
        let mut doc = Document::new();
        let div = doc.create_element("div");
        doc.set_attr(div, "class", "ab-slide");
        doc.set_style(div, "color", "red");
        let text = doc.create_text("a < b");
        doc.append_child(div, text);
        let input = doc.create_element("input");
        doc.append_child(div, input);

        assert_eq!(
            doc.outer_html(div),
            "<div class=\"ab-slide\" style=\"color: red;\">a &lt; b<input /></div>"
        );
    }

    #[test]
    fn test_style_body_is_raw() {
        let mut doc = Document::new();
        let style = doc.create_element("style");
        let text = doc.create_text("#h>.ab-slide{color:red !important;}");
        doc.append_child(style, text);
        assert_eq!(
            doc.outer_html(style),
            "<style>#h>.ab-slide{color:red !important;}</style>"
        );
    }
}
