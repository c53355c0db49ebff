//! Shipping-progress text driven by the cart total.
//!
//! No timer: the text is recomputed whenever a cart total arrives. Each
//! `div.ab-slide-shipping` is updated on its own from the attributes baked
//! into its progress span, so several bars on one page stay independent.

use crate::dom::{Document, NodeId};
use slidebar_compiler::shipping::{ShippingAttributes, ShippingState};

/// Recompute one shipping bar for `cart_value`; `None` if the bar's
/// attributes are unusable and it was left untouched
pub fn apply_cart_value(doc: &mut Document, bar: NodeId, cart_value: f64) -> Option<ShippingState> {
    let progress = doc.find_by_class(bar, "ab-shipping-progress").first().copied()?;
    let goal = doc.find_by_class(bar, "ab-shipping-goal").first().copied();

    let attrs = ShippingAttributes::from_lookup(|name| {
        doc.attr(progress, name)
            .or_else(|| goal.and_then(|goal| doc.attr(goal, name)))
            .map(str::to_string)
    })?;
    let state = attrs.state(cart_value);

    match state {
        ShippingState::Progress { remaining } => {
            set_part(doc, progress, "ab-shipping-start", &format!("{} ", attrs.start));
            set_part(doc, progress, "ab-shipping-price", &attrs.remaining_text(remaining));
            set_part(doc, progress, "ab-shipping-end", &format!(" {}", attrs.end));
            doc.remove_style(progress, "display");
            if let Some(goal) = goal {
                doc.set_style(goal, "display", "none");
            }
        }
        ShippingState::Goal => {
            doc.set_style(progress, "display", "none");
            if let Some(goal) = goal {
                doc.set_text_content(goal, &attrs.goal);
                doc.remove_style(goal, "display");
            }
        }
    }
    Some(state)
}

fn set_part(doc: &mut Document, progress: NodeId, class: &str, text: &str) {
    if let Some(part) = doc.find_by_class(progress, class).first().copied() {
        doc.set_text_content(part, text);
    }
}

/// Whether the goal message is the visible one
pub fn goal_visible(doc: &Document, bar: NodeId) -> bool {
    doc.find_by_class(bar, "ab-shipping-goal")
        .first()
        .map(|goal| doc.style(*goal, "display") != Some("none"))
        .unwrap_or(false)
}
