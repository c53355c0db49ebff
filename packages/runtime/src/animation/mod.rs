//! # Animation Controller
//!
//! Three mutually exclusive strategies over the same set of mounted slides:
//!
//! | strategy | driver | duplication |
//! |---|---|---|
//! | [`Rotating`] | one autoplay interval | none |
//! | [`MultiRotating`] | autoplay interval plus prev/next arrows | until the ring can wrap without a seam |
//! | [`Marquee`] | CSS keyframes | until the track covers the viewport plus one copy |
//!
//! Strategies only move classes and clone nodes. Timers are created through
//! the engine's [`TimerSet`](crate::scheduler::TimerSet) so teardown cancels
//! them with everything else.

mod marquee;
mod multi;
mod rotating;

pub use marquee::{fill_track, speed_px_per_sec, Marquee, MarqueeMetrics};
pub use multi::{fill_ring, ring_len, MultiRotating};
pub use rotating::Rotating;

use crate::dom::{Document, NodeId};
use serde::Serialize;

pub const ACTIVE: &str = "active";
pub const ANIMATION_IN: &str = "animation-in";
pub const ANIMATION_OUT: &str = "animation-out";
pub const FADE_IN_LEFT: &str = "ab-fadeInLeft";
pub const LEFT_OUT: &str = "animation-leftOut";

/// Lead time of the first cleanup timeout before the transition ends
pub const CLEANUP_LEAD_MS: u64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    Next,
    Prev,
}

impl Direction {
    /// Classes for the incoming and outgoing slide
    pub fn classes(self) -> (&'static str, &'static str) {
        match self {
            Direction::Next => (ANIMATION_IN, ANIMATION_OUT),
            Direction::Prev => (FADE_IN_LEFT, LEFT_OUT),
        }
    }

    pub fn step(self, current: usize, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        match self {
            Direction::Next => (current + 1) % len,
            Direction::Prev => (current + len - 1) % len,
        }
    }
}

/// The mounted slides as seen by the duplication loops
pub trait SlideBuffer {
    /// Slides currently mounted
    fn len(&self) -> usize;

    /// Rendered width of everything mounted
    fn width(&self) -> f64;

    /// Append one more copy of the original slide set
    fn duplicate_set(&mut self);
}

/// Class changes of one transition plus the cleanups to schedule
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub from: NodeId,
    pub to: NodeId,
    /// `(delay_ms, node, classes)` to strip once the CSS animation is done
    pub cleanups: Vec<(u64, NodeId, Vec<&'static str>)>,
}

/// Move the active class from `from` to `to` with enter/exit animations.
///
/// Cleanup runs twice: the exit class leaves the old slide just before the
/// animation ends, the enter class leaves the new one when it ends.
pub fn transition(
    doc: &mut Document,
    from: NodeId,
    to: NodeId,
    direction: Direction,
    animation_ms: u64,
) -> Transition {
    let (enter, exit) = direction.classes();
    for class in [ANIMATION_IN, ANIMATION_OUT, FADE_IN_LEFT, LEFT_OUT] {
        doc.remove_class(to, class);
    }
    doc.remove_class(from, ACTIVE);
    doc.add_class(from, exit);
    doc.add_class(to, ACTIVE);
    doc.add_class(to, enter);

    Transition {
        from,
        to,
        cleanups: vec![
            (animation_ms.saturating_sub(CLEANUP_LEAD_MS), from, vec![exit]),
            (animation_ms, to, vec![enter]),
        ],
    }
}

/// The strategy running for one mount
#[derive(Debug, Clone)]
pub enum Animation {
    /// A single slide, nothing to animate
    Still,
    Rotating(Rotating),
    Multi(MultiRotating),
    Marquee(Marquee),
}

impl Animation {
    pub fn name(&self) -> &'static str {
        match self {
            Animation::Still => "still",
            Animation::Rotating(_) => "rotating",
            Animation::Multi(_) => "multiRotating",
            Animation::Marquee(_) => "marquee",
        }
    }

    /// Index of the active slide, for strategies that have one
    pub fn current(&self) -> Option<usize> {
        match self {
            Animation::Rotating(rotating) => Some(rotating.current()),
            Animation::Multi(multi) => Some(multi.current()),
            _ => None,
        }
    }
}
