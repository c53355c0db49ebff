//! Transient toast shown after a successful copy.
//!
//! The progress bar shrinks through a CSS transition; the two timers only
//! start the fade and remove the node. Both are owned by the engine that
//! showed the toast so teardown cancels them.

use crate::config::NotificationTimings;
use crate::dom::{Document, NodeId};

pub const TOAST_CLASS: &str = "ab-notification";

/// Build the toast and append it to the body; returns the toast node
pub fn show(doc: &mut Document, message: &str, timings: &NotificationTimings) -> NodeId {
    let toast = doc.create_element("div");
    doc.set_attr(toast, "class", TOAST_CLASS);
    doc.set_attr(toast, "role", "status");
    for (name, value) in [
        ("position", "fixed"),
        ("bottom", "20px"),
        ("left", "50%"),
        ("transform", "translateX(-50%)"),
        ("background", "#323232"),
        ("color", "#ffffff"),
        ("padding", "10px 16px"),
        ("border-radius", "4px"),
        ("z-index", "2147483647"),
        ("opacity", "1"),
    ] {
        doc.set_style(toast, name, value);
    }

    let text = doc.create_text(message);
    doc.append_child(toast, text);

    let bar = doc.create_element("div");
    doc.set_attr(bar, "class", "ab-notification-progress");
    doc.set_style(bar, "height", "3px");
    doc.set_style(bar, "background", "#4caf50");
    doc.set_style(bar, "width", "0%");
    doc.set_style(bar, "transition", &format!("width {}ms linear", timings.visible_ms));
    doc.append_child(toast, bar);

    let body = doc.body();
    doc.append_child(body, toast);
    toast
}

pub fn fade(doc: &mut Document, toast: NodeId, timings: &NotificationTimings) {
    doc.set_style(toast, "transition", &format!("opacity {}ms ease", timings.fade_ms));
    doc.set_style(toast, "opacity", "0");
}

pub fn dismiss(doc: &mut Document, toast: NodeId) {
    doc.remove(toast);
}
