//! Single-shot, cancelable deferred callbacks.
//!
//! Everything runs on one logical thread: callbacks are `!Send` and are only
//! ever invoked from the thread that drives the scheduler.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

pub type TimerCallback = Box<dyn FnOnce()>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerStatus {
    Pending,
    Fired,
    Cancelled,
}

/// Handle to a scheduled callback
#[derive(Debug, Clone)]
pub struct TimerHandle {
    status: Rc<Cell<TimerStatus>>,
    abort: Option<tokio::task::AbortHandle>,
}

impl TimerHandle {
    fn new(abort: Option<tokio::task::AbortHandle>) -> Self {
        Self {
            status: Rc::new(Cell::new(TimerStatus::Pending)),
            abort,
        }
    }

    /// Prevent the callback from running. Returns true if it was still pending.
    pub fn cancel(&self) -> bool {
        let was_pending = self.is_pending();
        if was_pending {
            self.status.set(TimerStatus::Cancelled);
        }
        if let Some(abort) = &self.abort {
            abort.abort();
        }
        was_pending
    }

    pub fn is_pending(&self) -> bool {
        self.status.get() == TimerStatus::Pending
    }

    pub fn has_fired(&self) -> bool {
        self.status.get() == TimerStatus::Fired
    }

    /// Mark as fired; returns false if the timer was cancelled first
    fn claim(&self) -> bool {
        if self.is_pending() {
            self.status.set(TimerStatus::Fired);
            true
        } else {
            false
        }
    }
}

/// Something that can run a callback once after a delay
pub trait TimerScheduler {
    fn schedule(&self, delay: Duration, callback: TimerCallback) -> TimerHandle;
}

// ── Manual (virtual clock) scheduler ────────────────────────────────────────

struct ManualEntry {
    due: Duration,
    seq: u64,
    handle: TimerHandle,
    callback: TimerCallback,
}

#[derive(Default)]
struct ManualQueue {
    now: Duration,
    next_seq: u64,
    entries: Vec<ManualEntry>,
}

/// Deterministic scheduler driven by [`ManualScheduler::advance`].
///
/// Immediate-mode hosts call `advance` once per frame with the frame delta;
/// tests use it to step through debounce windows exactly.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    queue: Rc<RefCell<ManualQueue>>,
}

impl fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let queue = self.queue.borrow();
        f.debug_struct("ManualScheduler")
            .field("now", &queue.now)
            .field("scheduled", &queue.entries.len())
            .finish()
    }
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since creation
    pub fn now(&self) -> Duration {
        self.queue.borrow().now
    }

    pub fn pending_count(&self) -> usize {
        self.queue
            .borrow()
            .entries
            .iter()
            .filter(|entry| entry.handle.is_pending())
            .count()
    }

    /// Move the clock forward, running every callback that falls due.
    ///
    /// Callbacks run in due-time order (ties in scheduling order) with no
    /// internal borrow held, so they may schedule or cancel other timers.
    /// Timers scheduled from a callback that fall inside the window also run.
    /// Returns the number of callbacks invoked.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.now().saturating_add(by);
        let mut fired = 0;

        while let Some(entry) = self.pop_due(target) {
            if entry.handle.claim() {
                (entry.callback)();
                fired += 1;
            }
        }

        self.queue.borrow_mut().now = target;
        fired
    }

    fn pop_due(&self, target: Duration) -> Option<ManualEntry> {
        let mut queue = self.queue.borrow_mut();
        queue.entries.retain(|entry| entry.handle.is_pending());

        let index = queue
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.due <= target)
            .min_by_key(|(_, entry)| (entry.due, entry.seq))
            .map(|(index, _)| index)?;

        let entry = queue.entries.swap_remove(index);
        queue.now = queue.now.max(entry.due);
        Some(entry)
    }
}

impl TimerScheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, callback: TimerCallback) -> TimerHandle {
        let handle = TimerHandle::new(None);
        let mut queue = self.queue.borrow_mut();
        let seq = queue.next_seq;
        queue.next_seq += 1;
        let due = queue.now.saturating_add(delay);
        queue.entries.push(ManualEntry {
            due,
            seq,
            handle: handle.clone(),
            callback,
        });
        handle
    }
}

// ── Tokio scheduler ─────────────────────────────────────────────────────────

/// Scheduler backed by `tokio::time::sleep` on a `LocalSet`.
///
/// Must be used from within a `tokio::task::LocalSet` (the callbacks are not
/// `Send`); scheduling outside one panics inside `spawn_local`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioScheduler;

impl TimerScheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, callback: TimerCallback) -> TimerHandle {
        let status = Rc::new(Cell::new(TimerStatus::Pending));
        let task_handle = TimerHandle {
            status: Rc::clone(&status),
            abort: None,
        };

        let task = tokio::task::spawn_local(async move {
            tokio::time::sleep(delay).await;
            if task_handle.claim() {
                callback();
            }
        });

        TimerHandle {
            status,
            abort: Some(task.abort_handle()),
        }
    }
}
