//! Tokio-backed task scheduling
//!
//! The production counterpart of `weft_core`'s `ManualScheduler`: hosts
//! that already run a Tokio runtime hand its handle to widgets that
//! need deferred behavior.

use std::time::Duration;

use anyhow::Context;
use tokio::runtime::Handle;
use weft_core::{Task, TaskScheduler};

/// Runs scheduled tasks on a Tokio runtime
pub struct TokioScheduler {
    handle: Handle,
}

impl TokioScheduler {
    /// Schedule onto the given runtime handle
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Schedule onto the runtime the current thread is running on
    pub fn current() -> anyhow::Result<Self> {
        let handle = Handle::try_current().context("no Tokio runtime on this thread")?;
        Ok(Self { handle })
    }
}

impl TaskScheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, task: Task) {
        self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            task();
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn test_runs_task_after_delay() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let scheduler = TokioScheduler::new(rt.handle().clone());

        let (tx, rx) = mpsc::channel();
        scheduler.schedule(
            Duration::from_millis(10),
            Box::new(move || {
                tx.send(()).unwrap();
            }),
        );

        rx.recv_timeout(Duration::from_secs(1))
            .expect("scheduled task never ran");
    }

    #[test]
    fn test_current_requires_runtime() {
        assert!(TokioScheduler::current().is_err());

        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            assert!(TokioScheduler::current().is_ok());
        });
    }
}
