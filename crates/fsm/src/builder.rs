//! Builder utilities for ergonomic tree construction.
//!
//! This module provides helpers to reduce boilerplate when assembling trees.
//! Instead of writing `State::with_context(Series::new(...), cx.clone())`,
//! you can write `cx.series(...)`; the free functions do the same with the
//! default context and return boxed nodes ready to nest.

use crate::behavior::Behavior;
use crate::context::Context;
use crate::group::Group;
use crate::node::BoxedNode;
use crate::proxy::{Expansion, Proxy};
use crate::series::Series;
use crate::state::State;

impl Context {
    /// Wraps a behavior in a state bound to this context.
    #[inline]
    pub fn state<B: Behavior>(&self, behavior: B) -> State<B> {
        State::with_context(behavior, self.clone())
    }

    #[inline]
    pub fn group(&self, children: Vec<BoxedNode>) -> State<Group> {
        self.state(Group::new(children))
    }

    #[inline]
    pub fn series(&self, children: Vec<BoxedNode>) -> State<Series> {
        self.state(Series::new(children))
    }

    #[inline]
    pub fn proxy<E: Expansion>(&self, factory: E) -> State<Proxy<E>> {
        self.state(Proxy::new(factory))
    }
}

/// Creates a boxed state with the default context.
///
/// Shorthand for `Box::new(State::new(behavior))`.
#[inline]
pub fn state<B: Behavior + 'static>(behavior: B) -> BoxedNode {
    State::new(behavior).boxed()
}

/// Creates a group node.
///
/// Shorthand for `Box::new(State::new(Group::new(children)))`.
#[inline]
pub fn group(children: Vec<BoxedNode>) -> BoxedNode {
    state(Group::new(children))
}

/// Creates a series node.
///
/// Shorthand for `Box::new(State::new(Series::new(children)))`.
#[inline]
pub fn series(children: Vec<BoxedNode>) -> BoxedNode {
    state(Series::new(children))
}

/// Creates a proxy node.
///
/// Shorthand for `Box::new(State::new(Proxy::new(factory)))`.
#[inline]
pub fn proxy<E: Expansion + 'static>(factory: E) -> BoxedNode {
    state(Proxy::new(factory))
}
