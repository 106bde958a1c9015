//! Closure-driven leaf behavior for quick scripting and tests.

use std::fmt;
use std::time::Duration;

use crate::behavior::Behavior;
use crate::error::HookResult;
use crate::flow::Flow;

type Hook = Box<dyn FnMut() -> HookResult<()> + Send>;

/// A leaf whose hooks are optional closures.
///
/// Missing hooks do nothing. The leaf ends once `duration` has elapsed.
///
/// ```rust,ignore
/// let fade = Leaf::new(Duration::from_millis(500))
///     .with_start(|| { screen.fade_out(); Ok(()) })
///     .with_end(|| { screen.reset(); Ok(()) });
/// ```
pub struct Leaf {
    duration: Duration,
    on_start: Option<Hook>,
    on_update: Option<Hook>,
    on_end: Option<Hook>,
}

impl Leaf {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            on_start: None,
            on_update: None,
            on_end: None,
        }
    }

    pub fn with_start(mut self, hook: impl FnMut() -> HookResult<()> + Send + 'static) -> Self {
        self.on_start = Some(Box::new(hook));
        self
    }

    pub fn with_update(mut self, hook: impl FnMut() -> HookResult<()> + Send + 'static) -> Self {
        self.on_update = Some(Box::new(hook));
        self
    }

    pub fn with_end(mut self, hook: impl FnMut() -> HookResult<()> + Send + 'static) -> Self {
        self.on_end = Some(Box::new(hook));
        self
    }
}

fn run(hook: &mut Option<Hook>) -> HookResult<()> {
    match hook {
        Some(hook) => hook(),
        None => Ok(()),
    }
}

impl Behavior for Leaf {
    fn on_start(&mut self) -> HookResult<Flow> {
        run(&mut self.on_start).map(|()| Flow::Continue)
    }

    fn on_update(&mut self) -> HookResult<Flow> {
        run(&mut self.on_update).map(|()| Flow::Continue)
    }

    fn on_end(&mut self) -> HookResult<()> {
        run(&mut self.on_end)
    }

    fn duration(&self) -> Duration {
        self.duration
    }
}

impl fmt::Debug for Leaf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Leaf")
            .field("duration", &self.duration)
            .field("on_start", &self.on_start.is_some())
            .field("on_update", &self.on_update.is_some())
            .field("on_end", &self.on_end.is_some())
            .finish()
    }
}
