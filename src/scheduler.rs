// ============================================================================
// Delayed Redraw and Task Scheduling
// ============================================================================

use std::cell::RefCell;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use crate::geometry::Rect;

/// A callback run once on the UI thread after its delay elapses.
pub type Task = Box<dyn FnOnce()>;

/// Host timer services used by widgets.
///
/// Everything runs on the single UI thread: a "delay" is a registration with
/// the host's event loop, never a blocking wait.
pub trait Scheduler {
    /// Ask for a redraw after `delay`. `None` means the whole surface.
    fn invalidate_delayed(&mut self, delay: Duration, region: Option<Rect>);

    /// Run `task` after `delay`.
    fn post_delayed(&mut self, delay: Duration, task: Task);
}

/// Area of the surface that needs repainting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Damage {
    Full,
    Region(Rect),
}

impl Damage {
    pub fn from_region(region: Option<Rect>) -> Self {
        match region {
            Some(rect) => Damage::Region(rect),
            None => Damage::Full,
        }
    }

    pub fn merge(self, other: Damage) -> Damage {
        match (self, other) {
            (Damage::Region(a), Damage::Region(b)) => Damage::Region(a.union(&b)),
            _ => Damage::Full,
        }
    }
}

/// Shared accumulator of fired invalidations.
///
/// Schedulers write into it when an invalidation comes due; the host drains
/// it before drawing a frame.
#[derive(Clone, Default)]
pub struct DamageTracker {
    pending: Rc<RefCell<Option<Damage>>>,
}

impl DamageTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, region: Option<Rect>) {
        let damage = Damage::from_region(region);
        let mut pending = self.pending.borrow_mut();
        *pending = Some(match pending.take() {
            Some(existing) => existing.merge(damage),
            None => damage,
        });
    }

    pub fn is_dirty(&self) -> bool {
        self.pending.borrow().is_some()
    }

    /// Drain the accumulated damage
    pub fn take(&self) -> Option<Damage> {
        self.pending.borrow_mut().take()
    }
}

impl fmt::Debug for DamageTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DamageTracker")
            .field(&*self.pending.borrow())
            .finish()
    }
}

enum TimerKind {
    Invalidate(Option<Rect>),
    Task(Task),
}

struct TimerEntry {
    due: Duration,
    seq: u64,
    kind: TimerKind,
}

impl PartialEq for TimerEntry {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl Eq for TimerEntry {}

impl PartialOrd for TimerEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimerEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.due, self.seq).cmp(&(other.due, other.seq))
    }
}

/// Deterministic scheduler running on a virtual clock.
///
/// Entries fire in due-time order; entries due at the same instant fire in the
/// order they were scheduled.
#[derive(Default)]
pub struct TimerQueue {
    now: Duration,
    next_seq: u64,
    entries: BinaryHeap<Reverse<TimerEntry>>,
    damage: DamageTracker,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time since the queue was created.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    /// Number of queued tasks, not counting invalidations.
    pub fn pending_tasks(&self) -> usize {
        self.entries
            .iter()
            .filter(|Reverse(entry)| matches!(entry.kind, TimerKind::Task(_)))
            .count()
    }

    pub fn next_due(&self) -> Option<Duration> {
        self.entries.peek().map(|Reverse(entry)| entry.due)
    }

    pub fn damage(&self) -> &DamageTracker {
        &self.damage
    }

    /// Fire every entry sharing the earliest due time, if that time is at or
    /// before `deadline`. Returns false when nothing was due.
    pub fn step(&mut self, deadline: Duration) -> bool {
        let Some(due) = self.next_due() else {
            return false;
        };
        if due > deadline {
            return false;
        }
        self.now = self.now.max(due);
        while self.next_due() == Some(due) {
            let Some(Reverse(entry)) = self.entries.pop() else {
                break;
            };
            match entry.kind {
                TimerKind::Invalidate(region) => self.damage.add(region),
                TimerKind::Task(task) => task(),
            }
        }
        true
    }

    /// Move the clock forward by `dt`, firing everything that comes due.
    pub fn advance(&mut self, dt: Duration) {
        let deadline = self.now + dt;
        while self.step(deadline) {}
        self.now = deadline;
    }

    fn push(&mut self, delay: Duration, kind: TimerKind) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push(Reverse(TimerEntry {
            due: self.now + delay,
            seq,
            kind,
        }));
    }
}

impl Scheduler for TimerQueue {
    fn invalidate_delayed(&mut self, delay: Duration, region: Option<Rect>) {
        self.push(delay, TimerKind::Invalidate(region));
    }

    fn post_delayed(&mut self, delay: Duration, task: Task) {
        self.push(delay, TimerKind::Task(task));
    }
}

impl fmt::Debug for TimerQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerQueue")
            .field("now", &self.now)
            .field("pending", &self.entries.len())
            .field("damage", &self.damage)
            .finish()
    }
}
