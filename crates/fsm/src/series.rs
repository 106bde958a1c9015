//! Sequential composition.

use std::time::Duration;

use tracing::trace;

use crate::behavior::{Behavior, Progress};
use crate::error::HookResult;
use crate::flow::Flow;
use crate::holder::{Children, Holder};
use crate::node::BoxedNode;
use crate::state::State;

/// How far a series may advance within a single `update()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AdvancePolicy {
    /// At most one advance per tick. A child that is ready the moment it
    /// starts still occupies one tick before its successor starts.
    #[default]
    Single,

    /// Keep advancing while the newly started child is already ready to end.
    /// Chains of proxies and zero-duration children collapse into one tick;
    /// such children are ended without ever receiving an update.
    Drain,
}

/// Runs children one at a time, in order, through a cursor.
///
/// # Semantics
///
/// - Starting the series starts its first child; an empty series ends at once
/// - Each tick updates the current child. When that child is ready to end, or
///   a skip was requested, it is ended and the next child is started
/// - Once the cursor moves past the last child the series ends
/// - Ending the series early ends the current child
///
/// Children can be spliced in right after the cursor at runtime
/// ([`Series::add_next`]), which is how proxies expand. The duration is the
/// sum of all children's durations.
#[derive(Debug, Default)]
pub struct Series {
    children: Children,
    current: usize,
    skipping: bool,
    policy: AdvancePolicy,
}

impl Series {
    pub fn new(children: Vec<BoxedNode>) -> Self {
        Self {
            children: Children::new(children),
            ..Self::default()
        }
    }

    pub fn with_policy(mut self, policy: AdvancePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> AdvancePolicy {
        self.policy
    }

    /// Index of the active child. Equals the child count once every child
    /// has been consumed.
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Inserts `nodes` directly after the current child, ahead of anything
    /// already queued. Completed children are left untouched.
    pub fn add_next(&mut self, nodes: impl IntoIterator<Item = BoxedNode>) {
        self.children.insert_after(self.current, nodes);
    }

    /// Ends the current child and advances on the next tick, whatever the
    /// child's readiness.
    pub fn skip(&mut self) {
        self.skipping = true;
    }

    fn start_current(&mut self) {
        let Some(child) = self.children.get(self.current) else {
            return;
        };
        child.start();
        let expansion = child.take_expansion();
        self.splice(expansion);
    }

    fn splice(&mut self, expansion: Vec<BoxedNode>) {
        if expansion.is_empty() {
            return;
        }
        trace!(
            target: "fsm::series",
            index = self.current,
            count = expansion.len(),
            "Splicing expansion after current child"
        );
        self.add_next(expansion);
    }

    fn advance(&mut self) -> Flow {
        if let Some(child) = self.children.get(self.current) {
            child.end();
        }
        self.current += 1;

        if self.current >= self.children.len() {
            return Flow::Finish;
        }

        trace!(target: "fsm::series", index = self.current, "Advancing series");
        self.start_current();
        Flow::Continue
    }

    fn current_is_ready(&self) -> bool {
        self.children
            .get(self.current)
            .is_some_and(|child| child.is_ready_to_end())
    }
}

impl Behavior for Series {
    fn on_start(&mut self) -> HookResult<Flow> {
        if self.children.is_empty() {
            return Ok(Flow::Finish);
        }
        self.start_current();
        Ok(Flow::Continue)
    }

    fn on_update(&mut self) -> HookResult<Flow> {
        let Some(child) = self.children.get(self.current) else {
            return Ok(Flow::Finish);
        };
        child.update();
        let ready = child.is_ready_to_end();
        // Groups start late children on update; pick up what they expanded.
        let expansion = child.take_expansion();
        self.splice(expansion);

        if !(ready || self.skipping) {
            return Ok(Flow::Continue);
        }
        self.skipping = false;

        let mut flow = self.advance();
        if self.policy == AdvancePolicy::Drain {
            while flow.is_continue() && self.current_is_ready() {
                flow = self.advance();
            }
        }
        Ok(flow)
    }

    fn on_end(&mut self) -> HookResult<()> {
        if let Some(child) = self.children.get(self.current) {
            child.end();
        }
        Ok(())
    }

    fn duration(&self) -> Duration {
        self.children
            .iter()
            .map(|child| child.duration())
            .fold(Duration::ZERO, Duration::saturating_add)
    }

    /// Ready once the cursor has moved past the last child.
    fn is_ready_to_end(&self, _progress: &Progress) -> bool {
        self.current >= self.children.len()
    }

    fn propagate_frozen(&mut self, frozen: bool) {
        self.children.set_frozen(frozen);
    }
}

impl Holder for Series {
    fn children(&self) -> &Children {
        &self.children
    }

    fn children_mut(&mut self) -> &mut Children {
        &mut self.children
    }
}

/// Series controls, callable from outside the tree while it runs.
impl State<Series> {
    /// See [`Series::add_next`].
    pub fn add_next(&self, node: BoxedNode) {
        self.with_behavior_mut(|series| series.add_next([node]));
    }

    /// See [`Series::add_next`].
    pub fn add_next_all(&self, nodes: impl IntoIterator<Item = BoxedNode>) {
        self.with_behavior_mut(|series| series.add_next(nodes));
    }

    /// See [`Series::skip`].
    pub fn skip(&self) {
        self.with_behavior_mut(Series::skip);
    }

    pub fn current_index(&self) -> usize {
        self.with_behavior(Series::current_index)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::clock::ManualClock;
    use crate::context::Context;
    use crate::diagnostics::MemorySink;
    use crate::leaf::Leaf;
    use crate::node::Node;

    fn context() -> (Context, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        let context = Context::new(clock.clone(), Arc::new(MemorySink::new()));
        (context, clock)
    }

    fn leaf(context: &Context, name: &'static str, secs: u64) -> BoxedNode {
        State::with_context(Leaf::new(Duration::from_secs(secs)), context.clone())
            .named(name)
            .boxed()
    }

    fn names(series: &State<Series>) -> Vec<String> {
        let mut names = Vec::new();
        series.for_each_child(|_, child| names.push(child.name().to_owned()));
        names
    }

    #[test]
    fn empty_series_ends_on_start() {
        let (cx, _) = context();
        let series = State::with_context(Series::default(), cx);
        series.start();
        assert!(series.is_ended());
    }

    #[test]
    fn duration_sums_children_including_late_ones() {
        let (cx, _) = context();
        let series = State::with_context(Series::new(vec![leaf(&cx, "a", 1), leaf(&cx, "b", 2)]), cx.clone());
        assert_eq!(series.duration(), Duration::from_secs(3));

        series.add(leaf(&cx, "c", 4));
        assert_eq!(series.duration(), Duration::from_secs(7));
    }

    #[test]
    fn duration_saturates_instead_of_overflowing() {
        let (cx, _) = context();
        let open_ended = State::with_context(Leaf::new(Duration::MAX), cx.clone()).boxed();
        let series = State::with_context(Series::new(vec![open_ended, leaf(&cx, "b", 1)]), cx);
        assert_eq!(series.duration(), Duration::MAX);
    }

    #[test]
    fn cursor_moves_one_child_per_completion() {
        let (cx, clock) = context();
        let series = State::with_context(
            Series::new(vec![leaf(&cx, "a", 1), leaf(&cx, "b", 1), leaf(&cx, "c", 1)]),
            cx,
        );
        series.start();
        assert_eq!(series.current_index(), 0);

        for expected in 1..=2 {
            clock.advance(Duration::from_secs(1));
            series.update();
            assert_eq!(series.current_index(), expected);
        }

        clock.advance(Duration::from_secs(1));
        series.update();
        assert_eq!(series.current_index(), 3);
        assert!(series.is_ended());
    }

    #[test]
    fn add_next_before_start_goes_after_first_child() {
        let (cx, _) = context();
        let series = State::with_context(Series::new(vec![leaf(&cx, "a", 1), leaf(&cx, "b", 1)]), cx.clone());
        series.add_next_all([leaf(&cx, "x", 1), leaf(&cx, "y", 1)]);
        assert_eq!(names(&series), ["a", "x", "y", "b"]);
    }

    #[test]
    fn forced_end_ends_only_active_child() {
        let (cx, _) = context();
        let series = State::with_context(Series::new(vec![leaf(&cx, "a", 1), leaf(&cx, "b", 1)]), cx);
        series.start();
        series.end();

        let mut states = Vec::new();
        series.for_each_child(|_, child| states.push((child.is_started(), child.is_ended())));
        assert_eq!(states, [(true, true), (false, false)]);
    }

    #[test]
    fn drain_policy_skips_through_instant_children() {
        let (cx, _) = context();
        let series = State::with_context(
            Series::new(vec![leaf(&cx, "a", 0), leaf(&cx, "b", 0), leaf(&cx, "c", 5)])
                .with_policy(AdvancePolicy::Drain),
            cx,
        );
        series.start();
        series.update();

        assert_eq!(series.current_index(), 2);
        assert!(!series.is_ended());
    }

    #[test]
    fn single_policy_takes_a_tick_per_instant_child() {
        let (cx, _) = context();
        let series = State::with_context(
            Series::new(vec![leaf(&cx, "a", 0), leaf(&cx, "b", 0), leaf(&cx, "c", 5)]),
            cx,
        );
        series.start();
        series.update();
        assert_eq!(series.current_index(), 1);

        series.update();
        assert_eq!(series.current_index(), 2);
    }
}
