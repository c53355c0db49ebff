//! Click behaviours attached during materialization.
//!
//! Handlers are plain data keyed by node, so they can be cloned along with
//! duplicated slides and dropped with the engine. The engine interprets them
//! in [`crate::engine::SlideEngine::click`].

use crate::animation::Direction;
use crate::dom::NodeId;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub enum Behavior {
    /// Copy a coupon code and show the toast
    CopyText { text: String },
    /// Swallow the click before it reaches an entire-bar link
    StopPropagation,
    /// Step the given quantity input
    QuantityStep { input: NodeId, delta: i64 },
    /// Multi-rotating arrow
    Navigate(Direction),
    /// Email bar submit button
    Submit,
    /// Cart bar button
    AddToCart,
    /// Close icon
    Dismiss,
    Link { href: String, new_tab: bool },
}

/// Behaviours per node, in attachment order
#[derive(Debug, Clone, Default)]
pub struct Behaviors {
    by_node: HashMap<NodeId, Vec<Behavior>>,
}

impl Behaviors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&mut self, node: NodeId, behavior: Behavior) {
        self.by_node.entry(node).or_default().push(behavior);
    }

    pub fn get(&self, node: NodeId) -> &[Behavior] {
        self.by_node.get(&node).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has(&self, node: NodeId, matches: impl Fn(&Behavior) -> bool) -> bool {
        self.get(node).iter().any(matches)
    }

    /// Give cloned nodes the behaviours of their originals. Node references
    /// inside a behaviour are remapped to the copy as well.
    pub fn copy_to_clones(&mut self, pairs: &[(NodeId, NodeId)]) {
        let remap: HashMap<NodeId, NodeId> = pairs.iter().copied().collect();
        for (original, copy) in pairs {
            let behaviors: Vec<Behavior> = self
                .get(*original)
                .iter()
                .cloned()
                .map(|behavior| match behavior {
                    Behavior::QuantityStep { input, delta } => Behavior::QuantityStep {
                        input: remap.get(&input).copied().unwrap_or(input),
                        delta,
                    },
                    other => other,
                })
                .collect();
            for behavior in behaviors {
                self.attach(*copy, behavior);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.by_node.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_node.is_empty()
    }

    pub fn clear(&mut self) {
        self.by_node.clear();
    }
}
