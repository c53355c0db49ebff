//! Quantity stepper: local increment/decrement with a floor of 1.

use crate::dom::{Document, NodeId};

pub const MIN_QUANTITY: u32 = 1;

/// Current value of a quantity input; unreadable values count as the floor
pub fn read_quantity(doc: &Document, input: NodeId) -> u32 {
    doc.attr(input, "value")
        .and_then(|value| value.trim().parse::<f64>().ok())
        .map(|value| value.max(MIN_QUANTITY as f64) as u32)
        .unwrap_or(MIN_QUANTITY)
}

/// Apply `delta` and write the result back; no upper bound here
pub fn step(doc: &mut Document, input: NodeId, delta: i64) -> u32 {
    let current = read_quantity(doc, input) as i64;
    let next = (current + delta).max(MIN_QUANTITY as i64) as u32;
    doc.set_attr(input, "value", &next.to_string());
    next
}
