//! Outcome reported by lifecycle hooks.

/// What a hook asks of its node's lifecycle once it returns.
///
/// # Composite Semantics
///
/// Leaves almost always return `Continue` and let readiness decide when they
/// finish. Composites return `Finish` to end themselves from inside a hook:
/// - An empty series finishes from `on_start`
/// - A group finishes from `on_update` once every child has ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Flow {
    /// Keep running; readiness decides when the node ends.
    #[default]
    Continue,

    /// End the node as soon as the hook returns.
    Finish,
}

impl Flow {
    /// Returns `Finish` when `done` holds, `Continue` otherwise.
    #[inline]
    pub fn finish_if(done: bool) -> Self {
        if done { Flow::Finish } else { Flow::Continue }
    }

    /// Returns `true` if this flow is `Continue`.
    #[inline]
    pub fn is_continue(self) -> bool {
        matches!(self, Flow::Continue)
    }

    /// Returns `true` if this flow is `Finish`.
    #[inline]
    pub fn is_finish(self) -> bool {
        matches!(self, Flow::Finish)
    }
}
