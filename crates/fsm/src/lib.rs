//! Hierarchical, time-driven state machine runtime.
//!
//! This library sequences timed behaviors (scripted sequences, animations,
//! gameplay beats) out of a handful of composable states, so callers never
//! hand-roll nested loops and timers.
//!
//! - **Polling**: a driver calls `start()` once, then `update()` every tick
//!   until the root reports ended
//! - **Duration-based readiness**: a state ends naturally once its declared
//!   duration has elapsed, unless frozen
//! - **Fault isolation**: a failing or panicking hook is reported to a
//!   diagnostic sink and never stalls the tree
//! - **Thread-safe transitions**: start and end happen exactly once even when
//!   another thread force-ends a running tree
//!
//! # Architecture
//!
//! - [`Node`]: Lifecycle contract every state exposes to its owner
//! - [`Behavior`]: Hooks a state implements; [`State`] wraps one into a node
//! - [`Flow`]: What a hook asks of the lifecycle once it returns
//! - Composite states: [`Group`] (parallel), [`Series`] (sequential),
//!   [`Proxy`] (lazy expansion)
//! - [`Switch`]: Exclusive current state with manual hand-off
//! - [`Context`]: Injected [`Clock`] and [`DiagnosticSink`]

pub mod behavior;
pub mod builder;
pub mod clock;
pub mod context;
pub mod diagnostics;
pub mod error;
pub mod flow;
pub mod group;
pub mod holder;
pub mod leaf;
pub mod node;
pub mod proxy;
pub mod series;
pub mod state;
pub mod switch;

// Re-export core types for ergonomic API
pub use behavior::{Behavior, Progress};
pub use clock::{Clock, ManualClock, SystemClock};
pub use context::Context;
pub use diagnostics::{
    DiagnosticSink, Fault, FaultRecord, HookFault, MemorySink, Phase, TracingSink,
};
pub use error::{HookError, HookResult};
pub use flow::Flow;
pub use group::Group;
pub use holder::{Children, Holder};
pub use leaf::Leaf;
pub use node::{BoxedNode, Node};
pub use proxy::{Expansion, Proxy};
pub use series::{AdvancePolicy, Series};
pub use state::State;
pub use switch::Switch;
