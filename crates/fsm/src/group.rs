//! Parallel composition.

use std::time::Duration;

use crate::behavior::{Behavior, Progress};
use crate::error::HookResult;
use crate::flow::Flow;
use crate::holder::{Children, Holder};
use crate::node::BoxedNode;

/// Runs all children together and ends once every child has ended.
///
/// # Semantics
///
/// A `Group` drives its children side by side:
/// - Starting the group starts every child, in insertion order
/// - Each tick updates every child; once all have ended the group ends.
///   Children added while the group runs are started on the next tick
/// - Ending the group early force-ends every child
/// - The group is ready to end when every child is
///
/// Its duration is that of its slowest child (zero when empty).
#[derive(Debug, Default)]
pub struct Group {
    children: Children,
}

impl Group {
    pub fn new(children: Vec<BoxedNode>) -> Self {
        Self {
            children: Children::new(children),
        }
    }
}

impl Behavior for Group {
    fn on_start(&mut self) -> HookResult<Flow> {
        for child in self.children.iter() {
            child.start();
        }
        Ok(Flow::Continue)
    }

    fn on_update(&mut self) -> HookResult<Flow> {
        for child in self.children.iter() {
            if !child.is_started() {
                child.start();
            }
            child.update();
        }
        Ok(Flow::finish_if(self.children.all_ended()))
    }

    fn on_end(&mut self) -> HookResult<()> {
        for child in self.children.iter() {
            child.end();
        }
        Ok(())
    }

    fn duration(&self) -> Duration {
        self.children
            .iter()
            .map(|child| child.duration())
            .max()
            .unwrap_or_default()
    }

    fn is_ready_to_end(&self, _progress: &Progress) -> bool {
        self.children.all_ready()
    }

    fn propagate_frozen(&mut self, frozen: bool) {
        self.children.set_frozen(frozen);
    }

    /// Forwards expansions of children so they land in the nearest
    /// enclosing series.
    fn take_expansion(&mut self) -> Vec<BoxedNode> {
        self.children
            .iter()
            .flat_map(|child| child.take_expansion())
            .collect()
    }
}

impl Holder for Group {
    fn children(&self) -> &Children {
        &self.children
    }

    fn children_mut(&mut self) -> &mut Children {
        &mut self.children
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
    use crate::proxy::Proxy;
    use crate::state::State;

    fn context() -> (Context, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        let context = Context::new(clock.clone(), Arc::new(MemorySink::new()));
        (context, clock)
    }

    fn leaf(context: &Context, secs: u64) -> BoxedNode {
        State::with_context(Leaf::new(Duration::from_secs(secs)), context.clone()).boxed()
    }

    #[test]
    fn duration_tracks_slowest_child() {
        let (cx, _) = context();
        let group = State::with_context(Group::new(vec![leaf(&cx, 2), leaf(&cx, 5)]), cx.clone());
        assert_eq!(group.duration(), Duration::from_secs(5));

        group.add(leaf(&cx, 9));
        assert_eq!(group.duration(), Duration::from_secs(9));
        assert_eq!(State::with_context(Group::default(), cx).duration(), Duration::ZERO);
    }

    #[test]
    fn empty_group_ends_on_first_update() {
        let (cx, _) = context();
        let group = State::with_context(Group::default(), cx);
        group.start();
        assert!(!group.is_ended());

        group.update();
        assert!(group.is_ended());
    }

    #[test]
    fn forced_end_cascades_to_children() {
        let (cx, clock) = context();
        let group = State::with_context(Group::new(vec![leaf(&cx, 1), leaf(&cx, 3)]), cx);
        group.start();
        clock.advance(Duration::from_secs(1));
        group.update();

        group.end();
        group.for_each_child(|_, child| assert!(child.is_ended()));
    }

    #[test]
    fn late_child_is_started_and_its_expansion_forwarded() {
        let (cx, _) = context();
        let group = State::with_context(Group::new(vec![leaf(&cx, 1)]), cx.clone());
        group.start();

        let mut pending = Some(leaf(&cx, 1));
        let proxy = State::with_context(
            Proxy::new(move || pending.take().into_iter().collect::<Vec<BoxedNode>>()),
            cx,
        );
        group.add(proxy.boxed());
        assert!(group.take_expansion().is_empty());

        group.update();
        group.for_each_child(|_, child| assert!(child.is_started()));
        assert_eq!(group.take_expansion().len(), 1);
    }

    #[test]
    fn frozen_group_holds_children_open() {
        let (cx, clock) = context();
        let group = State::with_context(Group::new(vec![leaf(&cx, 1)]), cx);
        group.start();
        group.set_frozen(true);

        clock.advance(Duration::from_secs(10));
        group.update();
        assert!(!group.is_ready_to_end());
        assert!(!group.is_ended());

        group.set_frozen(false);
        group.update();
        assert!(group.is_ended());
    }
}
