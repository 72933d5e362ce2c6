use crate::selection::{Choice, Key};

/// The dependent option list, tagged with how trustworthy it currently is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependentOptions {
    /// The list reflects the current parent selection. An empty list means
    /// the parent genuinely has no dependent options.
    Ready(Vec<Choice>),
    /// A fetch keyed by the current parent is outstanding.
    Loading,
    /// The list does not reflect the current parent: the last fetch for it
    /// failed, or was superseded without a replacement arriving yet.
    Stale,
}

impl DependentOptions {
    /// An empty, trustworthy list. The state a level starts in before any
    /// parent is chosen.
    pub fn empty() -> Self {
        DependentOptions::Ready(Vec::new())
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, DependentOptions::Ready(_))
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, DependentOptions::Loading)
    }

    pub fn is_stale(&self) -> bool {
        matches!(self, DependentOptions::Stale)
    }

    /// The choices on offer. Empty unless the list is `Ready`.
    pub fn choices(&self) -> &[Choice] {
        match self {
            DependentOptions::Ready(choices) => choices,
            _ => &[],
        }
    }

    pub fn contains(&self, id: &Key) -> bool {
        self.choices().iter().any(|c| &c.id == id)
    }
}

/// How the current selection state came to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Freshly initialized; nothing has happened yet.
    Idle,
    /// State was seeded from an existing record.
    Hydrating,
    /// The user has edited at least one level.
    UserEditing,
}
