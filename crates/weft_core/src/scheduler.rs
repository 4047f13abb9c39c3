//! Scheduled-task capability
//!
//! Nothing in the core suspends, blocks, or awaits; any deferred
//! behavior (a widget emitting after a delay, for instance) is expressed
//! against the [`TaskScheduler`] capability supplied by the surrounding
//! runtime. [`ManualScheduler`] is the deterministic implementation for
//! tests and cooperative hosts that drive time explicitly; async hosts
//! plug in their own (see `weft_runtime`).

use std::sync::Mutex;
use std::time::Duration;

/// A one-shot deferred task
pub type Task = Box<dyn FnOnce() + Send>;

/// Host-supplied timer/task capability
pub trait TaskScheduler: Send + Sync {
    /// Run `task` once, `delay` from now. Fire-and-forget: there is no
    /// completion signal and no cancellation.
    fn schedule(&self, delay: Duration, task: Task);
}

struct QueuedTask {
    due: Duration,
    /// Tie-breaker so tasks due at the same instant run in schedule order
    seq: u64,
    task: Task,
}

struct ManualSchedulerInner {
    now: Duration,
    next_seq: u64,
    queue: Vec<QueuedTask>,
}

/// Virtual-clock scheduler driven by explicit [`advance`](Self::advance) calls
///
/// Time only moves when the host says so, which makes deferred behavior
/// fully deterministic. Tasks scheduled from within a running task are
/// queued against the already-advanced clock and run on a later
/// `advance`, never recursively within the current one.
pub struct ManualScheduler {
    inner: Mutex<ManualSchedulerInner>,
}

impl ManualScheduler {
    /// Create a scheduler with its clock at zero
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(ManualSchedulerInner {
                now: Duration::ZERO,
                next_seq: 0,
                queue: Vec::new(),
            }),
        }
    }

    /// Advance the virtual clock by `dt` and run every task that came
    /// due, in (due time, schedule order)
    pub fn advance(&self, dt: Duration) {
        let ready: Vec<Task> = {
            let mut inner = self.inner.lock().unwrap();
            inner.now += dt;
            let now = inner.now;

            let (mut due, pending): (Vec<QueuedTask>, Vec<QueuedTask>) =
                inner.queue.drain(..).partition(|queued| queued.due <= now);
            inner.queue = pending;

            due.sort_by_key(|queued| (queued.due, queued.seq));
            due.into_iter().map(|queued| queued.task).collect()
        };

        // Run outside the lock; tasks may schedule follow-ups
        for task in ready {
            task();
        }
    }

    /// Number of tasks waiting for their due time
    pub fn pending(&self) -> usize {
        self.inner.lock().unwrap().queue.len()
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        self.inner.lock().unwrap().now
    }
}

impl TaskScheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: Task) {
        let mut inner = self.inner.lock().unwrap();
        let due = inner.now + delay;
        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.queue.push(QueuedTask { due, seq, task });
    }
}

impl Default for ManualScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_tasks_run_when_due() {
        let scheduler = ManualScheduler::new();
        let fired = Arc::new(Mutex::new(Vec::new()));

        for (name, ms) in [("late", 300u64), ("early", 100)] {
            let sink = fired.clone();
            scheduler.schedule(
                Duration::from_millis(ms),
                Box::new(move || sink.lock().unwrap().push(name)),
            );
        }

        scheduler.advance(Duration::from_millis(50));
        assert!(fired.lock().unwrap().is_empty());
        assert_eq!(scheduler.pending(), 2);

        scheduler.advance(Duration::from_millis(100));
        assert_eq!(*fired.lock().unwrap(), vec!["early"]);

        scheduler.advance(Duration::from_millis(500));
        assert_eq!(*fired.lock().unwrap(), vec!["early", "late"]);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_same_due_time_runs_in_schedule_order() {
        let scheduler = ManualScheduler::new();
        let fired = Arc::new(Mutex::new(Vec::new()));

        for name in ["first", "second", "third"] {
            let sink = fired.clone();
            scheduler.schedule(
                Duration::from_millis(10),
                Box::new(move || sink.lock().unwrap().push(name)),
            );
        }

        scheduler.advance(Duration::from_millis(10));
        assert_eq!(*fired.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_task_scheduled_during_advance_waits_for_next() {
        let scheduler = Arc::new(ManualScheduler::new());
        let fired = Arc::new(Mutex::new(0));

        let inner_scheduler = scheduler.clone();
        let inner_fired = fired.clone();
        scheduler.schedule(
            Duration::from_millis(10),
            Box::new(move || {
                let sink = inner_fired.clone();
                inner_scheduler.schedule(
                    Duration::ZERO,
                    Box::new(move || *sink.lock().unwrap() += 1),
                );
            }),
        );

        scheduler.advance(Duration::from_millis(10));
        assert_eq!(*fired.lock().unwrap(), 0);
        assert_eq!(scheduler.pending(), 1);

        scheduler.advance(Duration::ZERO);
        assert_eq!(*fired.lock().unwrap(), 1);
    }

    #[test]
    fn test_clock_accumulates() {
        let scheduler = ManualScheduler::new();
        scheduler.advance(Duration::from_millis(30));
        scheduler.advance(Duration::from_millis(20));
        assert_eq!(scheduler.now(), Duration::from_millis(50));
    }
}
