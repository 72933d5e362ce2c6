use crate::error::{EngineError, SelectionField};
use crate::selection::{Choice, Key, Selection};
use crate::sequencer::{FetchSequencer, FetchTicket};
use crate::state::{DependentOptions, Mode};

/// A pre-existing assignment used to seed the engine when an editing
/// session opens on a record that already has both levels set. Either half
/// may be absent; a child without a parent is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HydrationRecord {
    pub parent: Selection,
    pub child: Selection,
}

/// Bare keys extracted for submission. Labels never leave the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSelection {
    pub parent_id: Key,
    pub child_id: Key,
}

/// Outcome of offering a fetch result to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// The result belonged to the authoritative fetch and was recorded.
    Applied,
    /// The result was superseded and ignored. Ordinary race resolution,
    /// not an error.
    Discarded,
}

/// State machine for a two-level dependent picker.
///
/// The engine owns the parent selection, the child selection, and the child
/// option list. It never performs I/O: transitions that require a dependent
/// fetch return a [`FetchTicket`], and the caller delivers the fetch's
/// outcome back through [`absorb_options`](Self::absorb_options) or
/// [`fetch_failed`](Self::fetch_failed). Results arriving under a
/// superseded ticket are discarded without touching state.
#[derive(Debug)]
pub struct SelectionEngine {
    parent: Selection,
    child: Selection,
    child_options: DependentOptions,
    mode: Mode,
    hydrated: bool,
    sequencer: FetchSequencer,
}

impl Default for SelectionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionEngine {
    /// A fresh engine: `Idle`, both levels unset, an empty option list.
    pub fn new() -> Self {
        Self {
            parent: None,
            child: None,
            child_options: DependentOptions::empty(),
            mode: Mode::Idle,
            hydrated: false,
            sequencer: FetchSequencer::new(),
        }
    }

    /// Seed state from an existing record.
    ///
    /// Parent and child become visible in the same step; there is no
    /// intermediate state where only one is set. The hydrated child
    /// survives the fetch this triggers: the fetched list is used for
    /// display validation only, never to clear the child.
    ///
    /// Allowed at most once per session, and only before any user edit.
    pub fn hydrate(
        &mut self,
        record: HydrationRecord,
    ) -> Result<Option<FetchTicket>, EngineError> {
        if self.mode == Mode::UserEditing {
            return Err(EngineError::InvalidTransition("hydrate after a user edit"));
        }
        if self.hydrated {
            return Err(EngineError::InvalidTransition(
                "hydrate called twice in one session",
            ));
        }
        self.hydrated = true;
        self.mode = Mode::Hydrating;

        let Some(parent) = record.parent else {
            // The record carries no assignment. Nothing to seed, nothing
            // to fetch; a child without a parent is not representable.
            return Ok(None);
        };

        let key = parent.id.clone();
        self.parent = Some(parent);
        self.child = record.child;
        self.child_options = DependentOptions::Loading;
        Ok(Some(self.sequencer.request(key)))
    }

    /// User-driven parent change.
    ///
    /// Unconditionally clears the child and invalidates the option list,
    /// whether or not the parent actually differs. Selecting a parent
    /// issues a dependent fetch and returns its ticket; clearing the
    /// parent cancels any outstanding fetch and empties the options.
    pub fn set_parent(&mut self, selection: Selection) -> Option<FetchTicket> {
        self.mode = Mode::UserEditing;
        self.child = None;
        match selection {
            Some(choice) => {
                let key = choice.id.clone();
                self.parent = Some(choice);
                self.child_options = DependentOptions::Loading;
                Some(self.sequencer.request(key))
            }
            None => {
                self.parent = None;
                self.child_options = DependentOptions::empty();
                self.sequencer.cancel_all();
                None
            }
        }
    }

    /// User-driven child change. Clearing (`None`) is allowed; selecting
    /// anything requires a parent to be set first.
    pub fn set_child(&mut self, selection: Selection) -> Result<(), EngineError> {
        if self.parent.is_none() {
            return Err(EngineError::InvalidTransition(
                "set_child with no parent selected",
            ));
        }
        self.mode = Mode::UserEditing;
        self.child = selection;
        Ok(())
    }

    /// Deliver a successful fetch result. Applied only if `ticket` is still
    /// authoritative for the current parent; otherwise the result is
    /// dropped and state is untouched. The child selection is never
    /// modified by a delivery.
    pub fn absorb_options(&mut self, ticket: &FetchTicket, options: Vec<Choice>) -> Delivery {
        if !self.is_authoritative(ticket) {
            return Delivery::Discarded;
        }
        self.sequencer.settle();
        self.child_options = DependentOptions::Ready(options);
        Delivery::Applied
    }

    /// Deliver a fetch failure. An authoritative failure marks the option
    /// list `Stale` (distinguishable from a ready-but-empty list) and
    /// preserves both selections; a superseded failure is dropped.
    pub fn fetch_failed(&mut self, ticket: &FetchTicket) -> Delivery {
        if !self.is_authoritative(ticket) {
            return Delivery::Discarded;
        }
        self.sequencer.settle();
        self.child_options = DependentOptions::Stale;
        Delivery::Applied
    }

    /// Extract the bare keys for submission. Fails with
    /// `IncompleteSelection` naming the first missing level.
    pub fn resolve_submission(&self) -> Result<ResolvedSelection, EngineError> {
        let parent = self.parent.as_ref().ok_or(EngineError::IncompleteSelection {
            missing: SelectionField::Parent,
        })?;
        let child = self.child.as_ref().ok_or(EngineError::IncompleteSelection {
            missing: SelectionField::Child,
        })?;
        Ok(ResolvedSelection {
            parent_id: parent.id.clone(),
            child_id: child.id.clone(),
        })
    }

    /// Return to the freshly-constructed state. Any outstanding fetch is
    /// cancelled, so a late-arriving result cannot mutate the new session.
    pub fn reset(&mut self) {
        self.sequencer.cancel_all();
        self.parent = None;
        self.child = None;
        self.child_options = DependentOptions::empty();
        self.mode = Mode::Idle;
        self.hydrated = false;
    }

    pub fn parent(&self) -> Option<&Choice> {
        self.parent.as_ref()
    }

    pub fn child(&self) -> Option<&Choice> {
        self.child.as_ref()
    }

    pub fn child_options(&self) -> &DependentOptions {
        &self.child_options
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// True when the child id is absent from a `Ready` option list. The
    /// child is kept and displayed regardless; this flag only tells the
    /// caller to prompt for a re-selection.
    pub fn child_needs_reselection(&self) -> bool {
        match (&self.child, &self.child_options) {
            (Some(choice), DependentOptions::Ready(_)) => {
                !self.child_options.contains(&choice.id)
            }
            _ => false,
        }
    }

    fn is_authoritative(&self, ticket: &FetchTicket) -> bool {
        let current = self.parent.as_ref().map(|c| &c.id);
        self.sequencer.is_authoritative(ticket, current)
    }
}
