//! SIGINT/SIGTERM handling: flips a flag the pipeline loop polls so it can
//! run the same final-status-clear-then-exit path as a normal end of stream.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared flag set from the signal handler, observed by the pipeline loop.
#[derive(Clone, Default)]
pub struct ShutdownFlag(Arc<AtomicBool>);

impl ShutdownFlag {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    fn set(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Install a process-wide SIGINT/SIGTERM handler that sets this flag.
    /// May only be called once per process; a second call returns an error.
    pub fn install(&self) -> Result<(), ctrlc::Error> {
        let flag = self.clone();
        ctrlc::set_handler(move || {
            tracing::warn!(target: "pipeline", "interrupt received, draining");
            flag.set();
        })
    }
}
