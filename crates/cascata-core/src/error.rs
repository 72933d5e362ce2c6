use std::fmt;
use thiserror::Error;

/// Which half of the two-level selection an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionField {
    Parent,
    Child,
}

impl fmt::Display for SelectionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionField::Parent => f.write_str("parent"),
            SelectionField::Child => f.write_str("child"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// An operation was called in a state that forbids it. Programmer
    /// error; callers should treat this as a bug, not retry it.
    #[error("invalid transition: {0}")]
    InvalidTransition(&'static str),

    /// Submission was requested before both levels were chosen.
    /// Recoverable; surfaced to the user as a validation message.
    #[error("selection incomplete: {missing} is not set")]
    IncompleteSelection { missing: SelectionField },
}
