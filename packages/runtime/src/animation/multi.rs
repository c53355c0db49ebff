use super::{transition, Direction, SlideBuffer, Transition, ACTIVE};
use crate::dom::{Document, NodeId};
use tracing::debug;

/// Slides needed so wrap-around never shows a seam
pub fn ring_len(original: usize) -> usize {
    if original == 0 {
        0
    } else {
        (original * 2).max(3)
    }
}

/// Duplicate the slide set until the ring is long enough
pub fn fill_ring(buffer: &mut impl SlideBuffer, original: usize) {
    let target = ring_len(original);
    while buffer.len() < target {
        let before = buffer.len();
        buffer.duplicate_set();
        if buffer.len() <= before {
            break;
        }
    }
    debug!(original, slides = buffer.len(), "Filled multi-rotating ring");
}

/// Manual prev/next navigation with autoplay
#[derive(Debug, Clone)]
pub struct MultiRotating {
    slides: Vec<NodeId>,
    original: usize,
    current: usize,
    animation_ms: u64,
    autoplay_ms: u64,
    arrows: Option<(NodeId, NodeId)>,
}

impl MultiRotating {
    pub fn new(
        doc: &mut Document,
        slides: Vec<NodeId>,
        original: usize,
        animation_ms: u64,
        autoplay_ms: u64,
    ) -> Self {
        if let Some(first) = slides.first() {
            doc.add_class(*first, ACTIVE);
        }
        Self {
            slides,
            original,
            current: 0,
            animation_ms,
            autoplay_ms,
            arrows: None,
        }
    }

    /// Append `div.ab-slide-prev` and `div.ab-slide-next` after the slides
    pub fn add_arrows(&mut self, doc: &mut Document, host: NodeId) -> (NodeId, NodeId) {
        let mut arrow = |class: &str, glyph: &str| {
            let node = doc.create_element("div");
            doc.set_attr(node, "class", class);
            let icon = doc.create_markup(glyph);
            doc.append_child(node, icon);
            doc.append_child(host, node);
            node
        };
        let prev = arrow("ab-slide-prev", "&#10094;");
        let next = arrow("ab-slide-next", "&#10095;");
        self.arrows = Some((prev, next));
        (prev, next)
    }

    pub fn arrows(&self) -> Option<(NodeId, NodeId)> {
        self.arrows
    }

    pub fn period_ms(&self) -> u64 {
        self.animation_ms + self.autoplay_ms
    }

    pub fn current(&self) -> usize {
        self.current
    }

    /// Position within the original slide set
    pub fn original_index(&self) -> usize {
        if self.original == 0 {
            0
        } else {
            self.current % self.original
        }
    }

    pub fn slides(&self) -> &[NodeId] {
        &self.slides
    }

    pub fn navigate(&mut self, doc: &mut Document, direction: Direction) -> Option<Transition> {
        if self.slides.len() <= 1 {
            return None;
        }
        let from = self.slides[self.current];
        self.current = direction.step(self.current, self.slides.len());
        let to = self.slides[self.current];
        Some(transition(doc, from, to, direction, self.animation_ms))
    }
}
