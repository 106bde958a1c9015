#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use timed_fsm::{
    Behavior, BoxedNode, Context, Flow, HookError, HookResult, ManualClock, MemorySink, State,
};

/// How a probe's hooks misbehave.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    None,
    Error,
    Panic,
}

/// Manual clock, capturing sink and an event journal shared by probes.
pub struct Harness {
    pub clock: Arc<ManualClock>,
    pub sink: Arc<MemorySink>,
    pub cx: Context,
    journal: Arc<Mutex<Vec<String>>>,
}

impl Harness {
    pub fn new() -> Self {
        let clock = Arc::new(ManualClock::new());
        let sink = Arc::new(MemorySink::new());
        let cx = Context::new(clock.clone(), sink.clone());
        Self {
            clock,
            sink,
            cx,
            journal: Arc::default(),
        }
    }

    pub fn advance_ms(&self, ms: u64) {
        self.clock.advance(Duration::from_millis(ms));
    }

    pub fn advance_secs(&self, secs: u64) {
        self.clock.advance(Duration::from_secs(secs));
    }

    pub fn probe(&self, name: &'static str, secs: u64) -> BoxedNode {
        self.probe_state(name, Duration::from_secs(secs), Failure::None).boxed()
    }

    pub fn probe_state(&self, name: &'static str, duration: Duration, failure: Failure) -> State<Probe> {
        self.cx
            .state(Probe {
                name,
                duration,
                failure,
                journal: Arc::clone(&self.journal),
            })
            .named(name)
    }

    /// Journal entries, e.g. `start:a`, `update:a`, `end:a`.
    pub fn events(&self) -> Vec<String> {
        self.journal.lock().unwrap().clone()
    }

    /// Journal entries other than updates.
    pub fn transitions(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter(|event| !event.starts_with("update:"))
            .collect()
    }

    pub fn count(&self, event: &str) -> usize {
        self.events().iter().filter(|e| *e == event).count()
    }
}

/// Leaf that journals every hook it runs.
pub struct Probe {
    name: &'static str,
    duration: Duration,
    failure: Failure,
    journal: Arc<Mutex<Vec<String>>>,
}

impl Probe {
    fn record(&self, hook: &str) -> HookResult<()> {
        self.journal
            .lock()
            .unwrap()
            .push(format!("{hook}:{}", self.name));

        match self.failure {
            Failure::None => Ok(()),
            Failure::Error => Err(HookError::failed(format!("{hook} refused"))),
            Failure::Panic => panic!("{hook} exploded"),
        }
    }
}

impl Behavior for Probe {
    fn on_start(&mut self) -> HookResult<Flow> {
        self.record("start").map(|()| Flow::Continue)
    }

    fn on_update(&mut self) -> HookResult<Flow> {
        self.record("update").map(|()| Flow::Continue)
    }

    fn on_end(&mut self) -> HookResult<()> {
        self.record("end")
    }

    fn duration(&self) -> Duration {
        self.duration
    }
}
