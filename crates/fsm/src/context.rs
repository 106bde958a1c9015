//! Shared services threaded into every node at construction.
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::clock::{Clock, SystemClock};
use crate::diagnostics::{DiagnosticSink, TracingSink};

/// Clock and diagnostic sink shared by the nodes of one tree.
///
/// Cloning is cheap; clones share the same clock and sink.
#[derive(Clone)]
pub struct Context {
    clock: Arc<dyn Clock>,
    sink: Arc<dyn DiagnosticSink>,
}

impl Context {
    pub fn new(clock: Arc<dyn Clock>, sink: Arc<dyn DiagnosticSink>) -> Self {
        Self { clock, sink }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn sink(&self) -> &dyn DiagnosticSink {
        self.sink.as_ref()
    }

    #[inline]
    pub fn now(&self) -> Duration {
        self.clock.now()
    }
}

impl Default for Context {
    /// Real time, faults logged through `tracing`.
    fn default() -> Self {
        Self::new(Arc::new(SystemClock::new()), Arc::new(TracingSink))
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("now", &self.now())
            .finish_non_exhaustive()
    }
}
