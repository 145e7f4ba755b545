//! Progress reporting for migration operations.
//!
//! Every mutating operation emits two notifications: a start line naming
//! the operation and target before any work begins, and a completion line
//! with elapsed wall-clock time at millisecond precision. The sink is
//! injected rather than written to process output, so tests capture
//! notifications instead of parsing stdout. A failed operation emits no
//! completion line; the start line is the last observable signal before the
//! error surfaces.

use std::sync::Mutex;
use std::time::Duration;

/// Receives operation notifications from the [`Migrator`](crate::Migrator).
pub trait ProgressReporter: Send + Sync {
    /// Called before an operation does any work.
    fn begin(&self, operation: &str);

    /// Called once an operation has completed successfully.
    fn complete(&self, operation: &str, elapsed: Duration);
}

/// The default reporter: emits notifications through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl ProgressReporter for TracingReporter {
    fn begin(&self, operation: &str) {
        tracing::info!("{operation}...");
    }

    fn complete(&self, operation: &str, elapsed: Duration) {
        tracing::info!("{operation} done in {}ms", elapsed.as_millis());
    }
}

/// A reporter that buffers notification lines for inspection.
///
/// Intended for tests asserting on the notification stream.
#[derive(Debug, Default)]
pub struct BufferReporter {
    lines: Mutex<Vec<String>>,
}

impl BufferReporter {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every line reported so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }
}

impl ProgressReporter for BufferReporter {
    fn begin(&self, operation: &str) {
        self.lines.lock().unwrap().push(format!("{operation}..."));
    }

    fn complete(&self, operation: &str, elapsed: Duration) {
        self.lines
            .lock()
            .unwrap()
            .push(format!("{operation} done in {}ms", elapsed.as_millis()));
    }
}
