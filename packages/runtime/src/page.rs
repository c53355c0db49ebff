//! The host page the engine is injected into.

use crate::dom::Document;
use crate::engine::{SlideEngine, Task};
use crate::layout::{EstimatedLayout, Layout};
use crate::scheduler::Scheduler;
use crate::widgets::clipboard::Clipboard;
use chrono::{DateTime, Duration, Utc};
use tracing::trace;

/// Document, timers, clipboard and measurements of one page.
///
/// Engines borrow the page for every operation instead of owning it, so
/// several engines (campaigns) can share one page.
pub struct Page {
    pub document: Document,
    pub scheduler: Scheduler<Task>,
    pub clipboard: Clipboard,
    pub layout: Box<dyn Layout>,
    pub viewport_width: f64,
    pub scroll_y: f64,
    /// Wall-clock time at virtual time zero
    epoch: DateTime<Utc>,
}

impl Page {
    pub fn new(viewport_width: f64, epoch: DateTime<Utc>) -> Self {
        Self {
            document: Document::new(),
            scheduler: Scheduler::new(),
            clipboard: Clipboard::default(),
            layout: Box::new(EstimatedLayout::default()),
            viewport_width,
            scroll_y: 0.0,
            epoch,
        }
    }

    pub fn with_layout(mut self, layout: impl Layout + 'static) -> Self {
        self.layout = Box::new(layout);
        self
    }

    /// Current wall-clock time on the virtual clock
    pub fn now(&self) -> DateTime<Utc> {
        self.epoch + Duration::milliseconds(self.scheduler.now_ms() as i64)
    }

    /// Advance the clock by `ms`, routing every due timer to the engine that
    /// created it. Timers of engines not in `engines` are dropped.
    pub fn run(&mut self, ms: u64, engines: &mut [&mut SlideEngine]) {
        let until = self.scheduler.now_ms() + ms;
        while let Some(fired) = self.scheduler.next_due(until) {
            match engines.iter_mut().find(|engine| engine.owner() == fired.owner) {
                Some(engine) => engine.on_timer(self, fired),
                None => {
                    trace!(owner = fired.owner.0, "Dropping timer of unknown owner");
                    self.scheduler.clear(fired.id);
                }
            }
        }
        self.scheduler.settle(until);
    }

    /// Scroll the page and let engines re-offset fixed headers
    pub fn scroll_to(&mut self, y: f64, engines: &mut [&mut SlideEngine]) {
        self.scroll_y = y.max(0.0);
        for engine in engines.iter_mut() {
            engine.on_scroll(self);
        }
    }
}
