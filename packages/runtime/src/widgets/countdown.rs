//! Live countdown attached to every `div.ab-clock`.
//!
//! The schedule is read back from the attributes the compiler put on the
//! clock's `ul`, so a clock behaves the same whether it was compiled a second
//! or a week ago. Each widget owns one 1000ms interval and removes itself
//! once it expires with `removeTimer` set.

use crate::dom::{Document, NodeId};
use chrono::{DateTime, Utc};
use slidebar_compiler::timer::{parse_deadline, TimerSpec};
use tracing::debug;

pub const TICK_MS: u64 = 1000;

const UNIT_CLASSES: [&str; 4] = [
    "ab-clock-days",
    "ab-clock-hours",
    "ab-clock-minutes",
    "ab-clock-seconds",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Running,
    /// Reached zero; digits stay at `00`
    Expired,
    /// Reached zero with `removeTimer` set and detached its own node
    Removed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CountdownWidget {
    clock: NodeId,
    spec: TimerSpec,
    remove_timer: bool,
}

impl CountdownWidget {
    /// Read the schedule off a materialized `div.ab-clock`
    pub fn attach(doc: &Document, clock: NodeId) -> Option<Self> {
        let list = doc.query_selector(clock, "ul[clock-type]")?;
        let attr = |name: &str| doc.attr(list, name).map(str::to_string);

        let spec = match attr("clock-type").as_deref() {
            Some("repeated") => {
                let hours = attr("repeatedHours")
                    .and_then(|hours| hours.trim().parse::<f64>().ok())
                    .unwrap_or(0.0);
                TimerSpec::Repeated {
                    created: attr("repeatTimerCreateDate").as_deref().and_then(parse_deadline),
                    interval_ms: (hours * 3_600_000.0) as i64,
                    ends: attr("repeatedTimeEnd").as_deref().and_then(parse_deadline),
                }
            }
            _ => TimerSpec::Normal {
                deadline: attr("date").as_deref().and_then(parse_deadline),
            },
        };
        let remove_timer = attr("removeTimer").as_deref() == Some("true");

        Some(Self {
            clock,
            spec,
            remove_timer,
        })
    }

    pub fn clock(&self) -> NodeId {
        self.clock
    }

    pub fn spec(&self) -> &TimerSpec {
        &self.spec
    }

    /// Write the current digits into the unit cells
    pub fn render(&self, doc: &mut Document, now: DateTime<Utc>) {
        let digits = self.spec.countdown(now).padded();
        for (class, value) in UNIT_CLASSES.iter().zip(digits.iter()) {
            let cell = match doc.find_by_class(self.clock, class).first().copied() {
                Some(cell) => cell,
                None => continue,
            };
            if let Some(number) = doc.find_by_class(cell, "ab-clock-num").first().copied() {
                doc.set_text_content(number, value);
            }
        }
    }

    /// Recompute and redraw; reports whether the interval should keep running
    pub fn tick(&self, doc: &mut Document, now: DateTime<Utc>) -> TickOutcome {
        if !doc.is_connected(self.clock) {
            return TickOutcome::Removed;
        }
        if let TimerSpec::Repeated { ends: Some(ends), .. } = &self.spec {
            if *ends < now {
                debug!(clock = self.clock.index(), "Repeated countdown ended");
                doc.remove(self.clock);
                return TickOutcome::Removed;
            }
        }

        self.render(doc, now);
        if self.spec.remaining_ms(now) > 0 {
            return TickOutcome::Running;
        }

        if self.remove_timer {
            debug!(clock = self.clock.index(), "Countdown expired, removing clock");
            doc.remove(self.clock);
            return TickOutcome::Removed;
        }
        self.show_expired(doc);
        TickOutcome::Expired
    }

    fn show_expired(&self, doc: &mut Document) {
        let expired = match doc.find_by_class(self.clock, "ab-clock-expired").first().copied() {
            Some(expired) => expired,
            None => return,
        };
        if !doc.text_content(expired).trim().is_empty() {
            doc.remove_style(expired, "display");
        }
    }
}
