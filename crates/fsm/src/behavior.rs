//! Hook set implemented by every kind of state.
//!
//! A [`Behavior`] supplies what a state *does*; [`State`](crate::State)
//! supplies the lifecycle bookkeeping around it (gating, timing, fault
//! isolation). Leaves implement the four required methods; composites also
//! override readiness, frozen propagation and expansion.

use std::time::Duration;

use crate::error::HookResult;
use crate::flow::Flow;
use crate::node::BoxedNode;

/// How far a started node has progressed, handed to readiness checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub elapsed: Duration,
    pub frozen: bool,
}

impl Progress {
    /// `duration - elapsed`, floored at zero.
    #[inline]
    pub fn remaining(&self, duration: Duration) -> Duration {
        duration.saturating_sub(self.elapsed)
    }

    /// Default readiness: the duration has run out and the node is not frozen.
    #[inline]
    pub fn is_elapsed(&self, duration: Duration) -> bool {
        self.remaining(duration).is_zero() && !self.frozen
    }
}

/// Lifecycle hooks of a state.
///
/// Hooks run at most once per transition and may fail freely: errors and
/// panics are reported to the node's diagnostic sink and otherwise ignored.
pub trait Behavior: Send {
    /// Runs once, on the first successful `start`.
    fn on_start(&mut self) -> HookResult<Flow>;

    /// Runs on every `update` tick until the node is ready to end.
    fn on_update(&mut self) -> HookResult<Flow>;

    /// Runs once, on the first successful `end`.
    fn on_end(&mut self) -> HookResult<()>;

    /// Declared nominal length.
    fn duration(&self) -> Duration;

    /// Readiness policy, consulted only while the node is started and not
    /// ended.
    fn is_ready_to_end(&self, progress: &Progress) -> bool {
        progress.is_elapsed(self.duration())
    }

    /// Called whenever the owning node's frozen flag is set.
    fn propagate_frozen(&mut self, _frozen: bool) {}

    /// Nodes to run right after this one in the enclosing series.
    fn take_expansion(&mut self) -> Vec<BoxedNode> {
        Vec::new()
    }
}

/// Blanket implementation for boxed behaviors.
///
/// This allows `State<Box<dyn Behavior>>` to hold behaviors picked at
/// runtime.
impl Behavior for Box<dyn Behavior> {
    #[inline]
    fn on_start(&mut self) -> HookResult<Flow> {
        (**self).on_start()
    }

    #[inline]
    fn on_update(&mut self) -> HookResult<Flow> {
        (**self).on_update()
    }

    #[inline]
    fn on_end(&mut self) -> HookResult<()> {
        (**self).on_end()
    }

    #[inline]
    fn duration(&self) -> Duration {
        (**self).duration()
    }

    #[inline]
    fn is_ready_to_end(&self, progress: &Progress) -> bool {
        (**self).is_ready_to_end(progress)
    }

    #[inline]
    fn propagate_frozen(&mut self, frozen: bool) {
        (**self).propagate_frozen(frozen)
    }

    #[inline]
    fn take_expansion(&mut self) -> Vec<BoxedNode> {
        (**self).take_expansion()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_readiness_respects_frozen() {
        let duration = Duration::from_secs(1);
        let running = Progress {
            elapsed: Duration::from_millis(400),
            frozen: false,
        };
        assert_eq!(running.remaining(duration), Duration::from_millis(600));
        assert!(!running.is_elapsed(duration));

        let done = Progress {
            elapsed: Duration::from_secs(3),
            frozen: false,
        };
        assert_eq!(done.remaining(duration), Duration::ZERO);
        assert!(done.is_elapsed(duration));

        let frozen = Progress {
            frozen: true,
            ..done
        };
        assert!(!frozen.is_elapsed(duration));
    }
}
