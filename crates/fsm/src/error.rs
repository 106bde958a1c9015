//! Errors a lifecycle hook may return.
use thiserror::Error;

pub type HookResult<T> = std::result::Result<T, HookError>;

/// Failure raised by an `on_start`, `on_update` or `on_end` hook.
///
/// Hook errors never reach the caller of `start`/`update`/`end`; the node
/// reports them to its diagnostic sink and carries on.
#[derive(Debug, Error)]
pub enum HookError {
    #[error("{0}")]
    Failed(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HookError {
    pub fn failed(message: impl Into<String>) -> Self {
        HookError::Failed(message.into())
    }
}
