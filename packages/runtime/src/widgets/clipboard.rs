//! Clipboard writes through an offscreen textarea.

use crate::dom::Document;
use tracing::debug;

/// The page clipboard; holds whatever the last copy wrote
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Clipboard {
    contents: Option<String>,
}

impl Clipboard {
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }

    fn exec_copy(&mut self, selection: String) -> bool {
        self.contents = Some(selection);
        true
    }
}

/// Copy `text` the way storefront scripts must: append an offscreen
/// `<textarea>`, select it, run the copy command, remove it again.
pub fn copy_text(doc: &mut Document, clipboard: &mut Clipboard, text: &str) -> bool {
    let body = doc.body();
    let area = doc.create_element("textarea");
    doc.set_attr(area, "readonly", "");
    doc.set_style(area, "position", "absolute");
    doc.set_style(area, "left", "-9999px");
    let content = doc.create_text(text);
    doc.append_child(area, content);
    doc.append_child(body, area);

    let selection = doc.text_content(area);
    let copied = clipboard.exec_copy(selection);
    doc.remove(area);

    debug!(copied, chars = text.len(), "Copied text to clipboard");
    copied
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy_leaves_no_textarea_behind() {
        let mut doc = Document::new();
        let mut clipboard = Clipboard::default();
        assert!(copy_text(&mut doc, &mut clipboard, "SAVE10"));
        assert_eq!(clipboard.contents(), Some("SAVE10"));
        assert!(doc.query_selector(doc.root(), "textarea").is_none());
    }
}
