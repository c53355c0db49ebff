use super::{transition, Direction, Transition, ACTIVE};
use crate::dom::{Document, NodeId};

/// Single active slide, advanced on a timer
#[derive(Debug, Clone)]
pub struct Rotating {
    slides: Vec<NodeId>,
    current: usize,
    animation_ms: u64,
    autoplay_ms: u64,
}

impl Rotating {
    pub fn new(doc: &mut Document, slides: Vec<NodeId>, animation_ms: u64, autoplay_ms: u64) -> Self {
        if let Some(first) = slides.first() {
            doc.add_class(*first, ACTIVE);
        }
        Self {
            slides,
            current: 0,
            animation_ms,
            autoplay_ms,
        }
    }

    /// `None` when there is at most one slide: no timer is started
    pub fn period_ms(&self) -> Option<u64> {
        if self.slides.len() <= 1 {
            None
        } else {
            Some(self.animation_ms + self.autoplay_ms)
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn slides(&self) -> &[NodeId] {
        &self.slides
    }

    pub fn tick(&mut self, doc: &mut Document) -> Option<Transition> {
        if self.slides.len() <= 1 {
            return None;
        }
        let from = self.slides[self.current];
        self.current = Direction::Next.step(self.current, self.slides.len());
        let to = self.slides[self.current];
        Some(transition(doc, from, to, Direction::Next, self.animation_ms))
    }
}
