//! Fault isolation for lifecycle hooks and the sinks that receive faults.
//!
//! Every hook runs through [`isolate`]: an `Err` return or a panic is turned
//! into a [`HookFault`] and handed to the node's [`DiagnosticSink`], and the
//! lifecycle carries on as if the hook had succeeded. One misbehaving leaf
//! never stalls or unwinds through the rest of the tree.
use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Mutex, PoisonError};

use thiserror::Error;
use tracing::error;

use crate::error::{HookError, HookResult};

/// Lifecycle hook that produced a fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Phase {
    Start,
    Update,
    End,
}

/// How a hook failed.
#[derive(Debug, Error)]
pub enum Fault {
    #[error("hook returned an error: {0}")]
    Error(#[source] HookError),

    #[error("hook panicked: {0}")]
    Panic(String),
}

/// A caught hook failure, tagged with the node and phase it came from.
#[derive(Debug)]
pub struct HookFault {
    pub node: String,
    pub phase: Phase,
    pub fault: Fault,
}

impl fmt::Display for HookFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} failed: {}", self.node, self.phase, self.fault)
    }
}

/// Receiver for hook faults.
///
/// A sink is a diagnostic channel only; nothing it does feeds back into the
/// state machine.
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, fault: &HookFault);
}

/// Default sink: logs every fault through `tracing` at error level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, fault: &HookFault) {
        error!(
            target: "fsm::hooks",
            node = %fault.node,
            phase = %fault.phase,
            error = %fault.fault,
            "Hook failed, continuing"
        );
    }
}

/// Owned summary of a fault, as kept by [`MemorySink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaultRecord {
    pub node: String,
    pub phase: Phase,
    pub message: String,
}

/// Sink that keeps every fault in memory so callers can assert on them.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<FaultRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the faults reported so far, oldest first.
    pub fn records(&self) -> Vec<FaultRecord> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Number of faults reported for the given phase.
    pub fn count(&self, phase: Phase) -> usize {
        self.lock().iter().filter(|r| r.phase == phase).count()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<FaultRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DiagnosticSink for MemorySink {
    fn report(&self, fault: &HookFault) {
        self.lock().push(FaultRecord {
            node: fault.node.clone(),
            phase: fault.phase,
            message: fault.fault.to_string(),
        });
    }
}

/// Runs one hook, converting an error or a panic into a reported fault.
///
/// Returns the hook's value on success and `None` when it failed.
pub(crate) fn isolate<T>(
    node: &str,
    phase: Phase,
    sink: &dyn DiagnosticSink,
    hook: impl FnOnce() -> HookResult<T>,
) -> Option<T> {
    let fault = match panic::catch_unwind(AssertUnwindSafe(hook)) {
        Ok(Ok(value)) => return Some(value),
        Ok(Err(error)) => Fault::Error(error),
        Err(payload) => Fault::Panic(panic_message(payload.as_ref())),
    };

    sink.report(&HookFault {
        node: node.to_owned(),
        phase,
        fault,
    });
    None
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_owned()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn isolate_passes_through_success() {
        let sink = MemorySink::new();
        let value = isolate("leaf", Phase::Start, &sink, || Ok(7));
        assert_eq!(value, Some(7));
        assert!(sink.is_empty());
    }

    #[test]
    fn isolate_reports_errors() {
        let sink = MemorySink::new();
        let value: Option<()> = isolate("leaf", Phase::Update, &sink, || {
            Err(HookError::failed("boom"))
        });

        assert_eq!(value, None);
        let records = sink.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].node, "leaf");
        assert_eq!(records[0].phase, Phase::Update);
        assert!(records[0].message.contains("boom"));
    }

    #[test]
    fn isolate_catches_panics() {
        let sink = MemorySink::new();
        let value: Option<()> = isolate("leaf", Phase::End, &sink, || panic!("kaput"));

        assert_eq!(value, None);
        assert_eq!(sink.count(Phase::End), 1);
        assert_eq!(sink.records()[0].message, "hook panicked: kaput");
    }

    #[test]
    fn phase_displays_snake_case() {
        assert_eq!(Phase::Update.to_string(), "update");
        let label: &'static str = Phase::End.into();
        assert_eq!(label, "end");
    }
}
