//! Exclusive, manually switched current state.

use std::fmt;

use tracing::warn;

use crate::node::{BoxedNode, Node};

/// Holds at most one active state and hands off to the next on request.
///
/// A switch is not a node: it has no duration and no readiness. Changing
/// state ends the previous one and starts the next, with no validation of
/// the transition.
#[derive(Default)]
pub struct Switch {
    current: Option<BoxedNode>,
}

impl Switch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ends the current state, if any, then starts `next` and makes it current.
    pub fn change_state(&mut self, next: BoxedNode) {
        if let Some(previous) = self.current.take() {
            previous.end();
        }

        next.start();
        let dropped = next.take_expansion();
        if !dropped.is_empty() {
            warn!(
                target: "fsm::switch",
                node = next.name(),
                count = dropped.len(),
                "Switch has no series to expand into, dropping expansion"
            );
        }
        self.current = Some(next);
    }

    /// Updates the current state, if any.
    pub fn update(&self) {
        if let Some(current) = &self.current {
            current.update();
        }
    }

    pub fn current(&self) -> Option<&dyn Node> {
        self.current.as_deref()
    }

    /// Ends the current state and hands it back.
    pub fn take(&mut self) -> Option<BoxedNode> {
        let current = self.current.take()?;
        current.end();
        Some(current)
    }
}

impl fmt::Debug for Switch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Switch")
            .field("current", &self.current().map(|node| node.name()))
            .finish()
    }
}
