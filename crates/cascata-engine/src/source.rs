use async_trait::async_trait;
use cascata_core::{Choice, Key};
use thiserror::Error;

/// Errors an option source may report. Transport detail stays inside the
/// source; the session only needs something it can show.
#[derive(Debug, Clone, Error)]
pub enum SourceError {
    #[error("option source unavailable: {0}")]
    Unavailable(String),
    #[error("unknown parent key: {0}")]
    UnknownParent(Key),
    #[error("option source error: {0}")]
    Other(String),
}

/// Supplies the option lists for both picker levels.
///
/// `fetch(None)` returns the top-level options; `fetch(Some(key))` returns
/// the options dependent on that parent. Implementations must be idempotent
/// and side-effect free; the session may call them repeatedly for the same
/// key. Timeout policy belongs to the implementation's transport, not to
/// the session.
#[async_trait]
pub trait OptionSource: Send + Sync {
    async fn fetch(&self, parent: Option<&Key>) -> Result<Vec<Choice>, SourceError>;
}
