//! Scheduler backed by a calloop event loop.

use std::fmt;
use std::time::Duration;

use calloop::timer::{TimeoutAction, Timer};
use calloop::LoopHandle;

use crate::geometry::Rect;
use crate::scheduler::{DamageTracker, Scheduler, Task};

/// Schedules redraws and tasks as one-shot calloop timers.
///
/// Fired invalidations land in a [`DamageTracker`] that the host drains when
/// it draws the next frame.
pub struct CalloopScheduler<'l, D> {
    handle: LoopHandle<'l, D>,
    damage: DamageTracker,
}

impl<'l, D> CalloopScheduler<'l, D> {
    pub fn new(handle: LoopHandle<'l, D>) -> Self {
        Self {
            handle,
            damage: DamageTracker::new(),
        }
    }

    pub fn damage(&self) -> &DamageTracker {
        &self.damage
    }

    fn insert_timer<F: FnOnce() + 'l>(&self, delay: Duration, what: &str, callback: F) {
        let mut callback = Some(callback);
        let result = self.handle.insert_source(
            Timer::from_duration(delay),
            move |_deadline, _metadata, _data| {
                if let Some(callback) = callback.take() {
                    callback();
                }
                TimeoutAction::Drop
            },
        );
        if let Err(e) = result {
            log::warn!("Failed to schedule {}: {}", what, e.error);
        }
    }
}

impl<D> Scheduler for CalloopScheduler<'_, D> {
    fn invalidate_delayed(&mut self, delay: Duration, region: Option<Rect>) {
        let damage = self.damage.clone();
        self.insert_timer(delay, "redraw", move || damage.add(region));
    }

    fn post_delayed(&mut self, delay: Duration, task: Task) {
        self.insert_timer(delay, "task", task);
    }
}

impl<D> fmt::Debug for CalloopScheduler<'_, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CalloopScheduler")
            .field("damage", &self.damage)
            .finish_non_exhaustive()
    }
}
