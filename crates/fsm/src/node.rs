//! Core node trait.
//!
//! This module defines the [`Node`] trait, the lifecycle contract every state
//! in a tree exposes to its owner. Applications rarely implement it by hand:
//! [`State`](crate::State) implements it for any [`Behavior`](crate::Behavior).

use std::time::Duration;

/// Owned, type-erased node. Holders keep their children in this form.
pub type BoxedNode = Box<dyn Node>;

/// A state with a start/update/end lifecycle and a declared duration.
///
/// All methods take `&self` so a node can be ticked by one thread while
/// another force-ends it. Each transition happens at most once no matter how
/// many threads race for it.
pub trait Node: Send + Sync {
    /// Diagnostic label used in logs and fault reports.
    fn name(&self) -> &str;

    /// Starts the node. No-op once started or ended.
    fn start(&self);

    /// Advances the node by one tick.
    ///
    /// No-op before `start`, after `end`, or while another update of the same
    /// node is in flight. Ends the node instead of running its update hook
    /// when it is ready to end.
    fn update(&self);

    /// Ends the node. No-op before `start` or once ended.
    fn end(&self);

    fn is_started(&self) -> bool;

    fn is_ended(&self) -> bool;

    fn is_frozen(&self) -> bool;

    /// Freezing suppresses duration-based completion. Holders force the
    /// value onto their current children.
    fn set_frozen(&self, frozen: bool);

    /// Whether the node should transition to ended. Always `false` before
    /// the node has started.
    fn is_ready_to_end(&self) -> bool;

    /// Declared nominal length of the node.
    fn duration(&self) -> Duration;

    /// Time since the first successful `start`, `None` before that.
    fn elapsed(&self) -> Option<Duration>;

    /// `duration - elapsed`, floored at zero. `None` before `start`.
    fn remaining_duration(&self) -> Option<Duration> {
        self.elapsed()
            .map(|elapsed| self.duration().saturating_sub(elapsed))
    }

    /// Drains nodes this node wants run immediately after itself.
    ///
    /// A series calls this on a child right after starting it and splices
    /// the returned nodes in after its cursor.
    fn take_expansion(&self) -> Vec<BoxedNode>;
}
