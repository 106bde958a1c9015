//! Lifecycle wrapper turning any [`Behavior`] into a [`Node`].
//!
//! [`State`] owns the bookkeeping every node shares:
//! - a per-node gate making `start`, `end` and the update guard take effect
//!   exactly once even under concurrent callers
//! - the start timestamp read from the context's clock
//! - the frozen flag, forwarded to the behavior for holders
//! - fault isolation around every hook
//!
//! # Locking
//!
//! The gate (`lifecycle`) is held only for the check-and-set of a transition.
//! The behavior sits behind its own lock, held for the duration of one hook.
//! A thread ending a node while another thread is inside its update hook
//! therefore wins the gate immediately and runs `on_end` as soon as the
//! in-flight hook returns.

use std::borrow::Cow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tracing::debug;

use crate::behavior::{Behavior, Progress};
use crate::context::Context;
use crate::diagnostics::{self, Phase};
use crate::error::HookResult;
use crate::flow::Flow;
use crate::node::{BoxedNode, Node};

#[derive(Debug, Default)]
struct Lifecycle {
    started: bool,
    ended: bool,
    updating: bool,
    started_at: Option<Duration>,
}

/// A node driven by a [`Behavior`].
pub struct State<B> {
    name: Cow<'static, str>,
    lifecycle: Mutex<Lifecycle>,
    frozen: AtomicBool,
    behavior: Mutex<B>,
    context: Context,
}

impl<B: Behavior> State<B> {
    /// Wraps `behavior` using the default context (real time, faults logged
    /// through `tracing`).
    pub fn new(behavior: B) -> Self {
        Self::with_context(behavior, Context::default())
    }

    pub fn with_context(behavior: B, context: Context) -> Self {
        Self {
            name: Cow::Borrowed(short_type_name::<B>()),
            lifecycle: Mutex::new(Lifecycle::default()),
            frozen: AtomicBool::new(false),
            behavior: Mutex::new(behavior),
            context,
        }
    }

    /// Overrides the diagnostic label (defaults to the behavior's type name).
    pub fn named(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Runs `f` against the behavior.
    ///
    /// Blocks while a hook of this node is running. Calling it from inside
    /// one of this node's own hooks deadlocks.
    pub fn with_behavior<R>(&self, f: impl FnOnce(&B) -> R) -> R {
        f(&*self.behavior())
    }

    /// Mutable counterpart of [`State::with_behavior`].
    pub fn with_behavior_mut<R>(&self, f: impl FnOnce(&mut B) -> R) -> R {
        f(&mut *self.behavior())
    }

    /// Unwraps the behavior, discarding the lifecycle.
    pub fn into_behavior(self) -> B {
        self.behavior
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn lifecycle(&self) -> MutexGuard<'_, Lifecycle> {
        self.lifecycle.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn behavior(&self) -> MutexGuard<'_, B> {
        self.behavior.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn run_hook<T>(&self, phase: Phase, hook: impl FnOnce(&mut B) -> HookResult<T>) -> Option<T> {
        let mut behavior = self.behavior();
        diagnostics::isolate(&self.name, phase, self.context.sink(), || {
            hook(&mut *behavior)
        })
    }
}

impl<B: Behavior + 'static> State<B> {
    pub fn boxed(self) -> BoxedNode {
        Box::new(self)
    }
}

impl<B: Behavior> Node for State<B> {
    fn name(&self) -> &str {
        &self.name
    }

    fn start(&self) {
        {
            let mut lifecycle = self.lifecycle();
            if lifecycle.started || lifecycle.ended {
                return;
            }
            lifecycle.started = true;
            lifecycle.started_at = Some(self.context.now());
        }

        debug!(target: "fsm::state", node = %self.name, "State started");
        let flow = self.run_hook(Phase::Start, B::on_start);
        if flow.is_some_and(Flow::is_finish) {
            self.end();
        }
    }

    fn update(&self) {
        {
            let mut lifecycle = self.lifecycle();
            if !lifecycle.started || lifecycle.ended || lifecycle.updating {
                return;
            }
            lifecycle.updating = true;
        }

        if self.is_ready_to_end() {
            self.end();
        } else {
            let flow = self.run_hook(Phase::Update, B::on_update);
            if flow.is_some_and(Flow::is_finish) {
                self.end();
            }
        }

        self.lifecycle().updating = false;
    }

    fn end(&self) {
        {
            let mut lifecycle = self.lifecycle();
            if !lifecycle.started || lifecycle.ended {
                return;
            }
            lifecycle.ended = true;
        }

        debug!(target: "fsm::state", node = %self.name, "State ended");
        self.run_hook(Phase::End, B::on_end);
    }

    fn is_started(&self) -> bool {
        self.lifecycle().started
    }

    fn is_ended(&self) -> bool {
        self.lifecycle().ended
    }

    fn is_frozen(&self) -> bool {
        self.frozen.load(Ordering::Acquire)
    }

    fn set_frozen(&self, frozen: bool) {
        self.behavior().propagate_frozen(frozen);
        self.frozen.store(frozen, Ordering::Release);
    }

    fn is_ready_to_end(&self) -> bool {
        let elapsed = {
            let lifecycle = self.lifecycle();
            if lifecycle.ended {
                return true;
            }
            match lifecycle.started_at {
                Some(at) => self.context.now().saturating_sub(at),
                None => return false,
            }
        };

        let progress = Progress {
            elapsed,
            frozen: self.is_frozen(),
        };
        self.behavior().is_ready_to_end(&progress)
    }

    fn duration(&self) -> Duration {
        self.behavior().duration()
    }

    fn elapsed(&self) -> Option<Duration> {
        let started_at = self.lifecycle().started_at?;
        Some(self.context.now().saturating_sub(started_at))
    }

    fn take_expansion(&self) -> Vec<BoxedNode> {
        self.behavior().take_expansion()
    }
}

/// Last path segment of a type name, without generic arguments.
fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
