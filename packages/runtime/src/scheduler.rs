//! # Cooperative timers on a virtual clock
//!
//! Stands in for `setTimeout`/`setInterval` on the page's single thread.
//! Time only moves when the host advances it, so tests can fast-forward a
//! mounted campaign deterministically and count pending timers exactly.
//!
//! Every timer belongs to an [`OwnerId`]. Engines keep their handles in a
//! [`TimerSet`] so teardown is a single pass over one list.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

/// Identity of whoever created a timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OwnerId(pub u64);

#[derive(Debug, Clone)]
struct TimerEntry<T> {
    owner: OwnerId,
    due_ms: u64,
    interval_ms: Option<u64>,
    task: T,
}

/// Heap key; min-heap on due time, then creation order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Deadline {
    due_ms: u64,
    id: TimerId,
}

impl Ord for Deadline {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due_ms
            .cmp(&self.due_ms)
            .then_with(|| other.id.cmp(&self.id))
    }
}

impl PartialOrd for Deadline {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A timer that came due
#[derive(Debug, Clone, PartialEq)]
pub struct Fired<T> {
    pub id: TimerId,
    pub owner: OwnerId,
    pub task: T,
    /// Virtual time the timer fired at
    pub at_ms: u64,
    pub repeating: bool,
}

#[derive(Debug)]
pub struct Scheduler<T> {
    now_ms: u64,
    next_id: u64,
    timers: BTreeMap<TimerId, TimerEntry<T>>,
    queue: BinaryHeap<Deadline>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            now_ms: 0,
            next_id: 1,
            timers: BTreeMap::new(),
            queue: BinaryHeap::new(),
        }
    }
}

impl<T: Clone> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    fn schedule(&mut self, owner: OwnerId, delay_ms: u64, interval_ms: Option<u64>, task: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let due_ms = self.now_ms + delay_ms;
        self.timers.insert(
            id,
            TimerEntry {
                owner,
                due_ms,
                interval_ms,
                task,
            },
        );
        self.queue.push(Deadline { due_ms, id });
        id
    }

    pub fn set_timeout(&mut self, owner: OwnerId, delay_ms: u64, task: T) -> TimerId {
        self.schedule(owner, delay_ms, None, task)
    }

    /// Intervals never fire faster than once per millisecond
    pub fn set_interval(&mut self, owner: OwnerId, period_ms: u64, task: T) -> TimerId {
        let period_ms = period_ms.max(1);
        self.schedule(owner, period_ms, Some(period_ms), task)
    }

    /// Cancel a timer; unknown or already-fired handles are ignored
    pub fn clear(&mut self, id: TimerId) -> bool {
        self.timers.remove(&id).is_some()
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.contains_key(&id)
    }

    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    pub fn pending_for(&self, owner: OwnerId) -> usize {
        self.timers.values().filter(|timer| timer.owner == owner).count()
    }

    /// Pop the next timer due at or before `until_ms`, moving the clock to
    /// its due time. Intervals are re-armed before they are returned.
    pub fn next_due(&mut self, until_ms: u64) -> Option<Fired<T>> {
        while let Some(deadline) = self.queue.peek().copied() {
            if deadline.due_ms > until_ms {
                return None;
            }
            self.queue.pop();
            let entry = match self.timers.get_mut(&deadline.id) {
                // Stale heap entries of cleared or re-armed timers
                Some(entry) if entry.due_ms == deadline.due_ms => entry,
                _ => continue,
            };
            self.now_ms = self.now_ms.max(deadline.due_ms);
            let fired = Fired {
                id: deadline.id,
                owner: entry.owner,
                task: entry.task.clone(),
                at_ms: deadline.due_ms,
                repeating: entry.interval_ms.is_some(),
            };
            match entry.interval_ms {
                Some(period) => {
                    entry.due_ms = deadline.due_ms + period;
                    let next = Deadline {
                        due_ms: entry.due_ms,
                        id: deadline.id,
                    };
                    self.queue.push(next);
                }
                None => {
                    self.timers.remove(&deadline.id);
                }
            }
            return Some(fired);
        }
        None
    }

    /// Move the clock forward once nothing else is due
    pub fn settle(&mut self, until_ms: u64) {
        if until_ms > self.now_ms {
            self.now_ms = until_ms;
        }
    }

    /// Fire everything due within `ms`, handing each to `handle`
    pub fn advance(&mut self, ms: u64, mut handle: impl FnMut(&mut Self, Fired<T>)) {
        let until = self.now_ms + ms;
        while let Some(fired) = self.next_due(until) {
            handle(self, fired);
        }
        self.settle(until);
    }
}

/// Handles created by one owner, cleared together
#[derive(Debug, Clone)]
pub struct TimerSet {
    owner: OwnerId,
    handles: Vec<TimerId>,
}

impl TimerSet {
    pub fn new(owner: OwnerId) -> Self {
        Self {
            owner,
            handles: Vec::new(),
        }
    }

    pub fn owner(&self) -> OwnerId {
        self.owner
    }

    pub fn timeout<T: Clone>(&mut self, scheduler: &mut Scheduler<T>, delay_ms: u64, task: T) -> TimerId {
        let id = scheduler.set_timeout(self.owner, delay_ms, task);
        self.handles.push(id);
        id
    }

    pub fn interval<T: Clone>(&mut self, scheduler: &mut Scheduler<T>, period_ms: u64, task: T) -> TimerId {
        let id = scheduler.set_interval(self.owner, period_ms, task);
        self.handles.push(id);
        id
    }

    pub fn cancel<T: Clone>(&mut self, scheduler: &mut Scheduler<T>, id: TimerId) {
        scheduler.clear(id);
        self.handles.retain(|handle| *handle != id);
    }

    /// Drop handles of timeouts that already fired
    pub fn prune<T: Clone>(&mut self, scheduler: &Scheduler<T>) {
        self.handles.retain(|handle| scheduler.is_pending(*handle));
    }

    /// Cancel everything this owner still has pending
    pub fn clear_all<T: Clone>(&mut self, scheduler: &mut Scheduler<T>) {
        let count = self.handles.len();
        for handle in self.handles.drain(..) {
            scheduler.clear(handle);
        }
        if count > 0 {
            debug!(owner = self.owner.0, count, "Cleared timers");
        }
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}
