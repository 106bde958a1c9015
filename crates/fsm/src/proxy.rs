//! Lazy expansion of a series.
//!
//! A [`Proxy`] occupies one slot in a series. When the series reaches it,
//! its factory builds the next few states and the series splices them in
//! right after the proxy. This lets a tree branch on conditions that are only
//! known at runtime.

use std::mem;
use std::time::Duration;

use crate::behavior::Behavior;
use crate::error::HookResult;
use crate::flow::Flow;
use crate::node::BoxedNode;

/// Produces the states a proxy expands into.
pub trait Expansion: Send {
    fn create_states(&mut self) -> Vec<BoxedNode>;
}

impl<F> Expansion for F
where
    F: FnMut() -> Vec<BoxedNode> + Send,
{
    fn create_states(&mut self) -> Vec<BoxedNode> {
        self()
    }
}

/// Zero-duration state that expands into new siblings when started.
///
/// The factory runs exactly once, on the first start. The produced nodes are
/// handed to the enclosing series through [`Behavior::take_expansion`]; a
/// proxy outside any series expands into nothing runnable.
pub struct Proxy<E> {
    factory: E,
    pending: Vec<BoxedNode>,
    expanded: bool,
}

impl<E: Expansion> Proxy<E> {
    pub fn new(factory: E) -> Self {
        Self {
            factory,
            pending: Vec::new(),
            expanded: false,
        }
    }

    pub fn has_expanded(&self) -> bool {
        self.expanded
    }
}

impl<E: Expansion> Behavior for Proxy<E> {
    fn on_start(&mut self) -> HookResult<Flow> {
        if !self.expanded {
            self.expanded = true;
            self.pending = self.factory.create_states();
        }
        Ok(Flow::Continue)
    }

    fn on_update(&mut self) -> HookResult<Flow> {
        Ok(Flow::Continue)
    }

    fn on_end(&mut self) -> HookResult<()> {
        Ok(())
    }

    fn duration(&self) -> Duration {
        Duration::ZERO
    }

    fn take_expansion(&mut self) -> Vec<BoxedNode> {
        mem::take(&mut self.pending)
    }
}
