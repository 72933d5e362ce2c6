use std::sync::Arc;

use cascata_core::{
    Choice, Delivery, DependentOptions, EngineError, FetchTicket, Key, Mode, Selection,
    SelectionEngine,
};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::config::FormLimits;
use crate::record::RecordProvider;
use crate::source::{OptionSource, SourceError};
use crate::submit::{SubmissionPayload, SubmissionSink, SubmitError, SubmitReceipt};
use crate::validate::{self, FieldError};

/// Errors surfaced by an editing session. Fetch and submission failures
/// leave the session state exactly as it was before the failed call.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// An option load failed. `parent` is `None` for the top-level list.
    /// Retryable; the affected level's options are marked stale.
    #[error("failed to load options for {parent:?}: {source}")]
    OptionFetchFailed {
        parent: Option<Key>,
        source: SourceError,
    },

    #[error("submission failed: {0}")]
    SubmissionFailed(#[from] SubmitError),

    #[error(transparent)]
    Field(#[from] FieldError),
}

/// One editing session over a record: the drawer-equivalent lifecycle.
///
/// Owns a [`SelectionEngine`] plus the sibling form fields, and drives the
/// engine's fetch tickets through the [`OptionSource`]. Created when the
/// surrounding editing UI opens and discarded (or [`close`](Self::close)d)
/// when it goes away; never shared between sessions.
pub struct EditSession {
    engine: SelectionEngine,
    source: Arc<dyn OptionSource>,
    records: Arc<dyn RecordProvider>,
    sink: Arc<dyn SubmissionSink>,
    limits: FormLimits,
    record_id: Option<String>,
    fields: Map<String, Value>,
    parent_options: DependentOptions,
}

impl EditSession {
    pub fn new(
        source: Arc<dyn OptionSource>,
        records: Arc<dyn RecordProvider>,
        sink: Arc<dyn SubmissionSink>,
        limits: FormLimits,
    ) -> Self {
        Self {
            engine: SelectionEngine::new(),
            source,
            records,
            sink,
            limits,
            record_id: None,
            fields: Map::new(),
            parent_options: DependentOptions::empty(),
        }
    }

    /// Open the session: snapshot the current record, hydrate the engine
    /// from it, load the top-level options, and resolve the dependent
    /// fetch the hydration demanded.
    ///
    /// With no current record this is a cold start; only the top-level
    /// options are loaded.
    pub async fn open(&mut self) -> Result<(), SessionError> {
        self.close();

        let pending = match self.records.current() {
            Some(record) => {
                self.record_id = record.id.clone();
                self.fields = record.fields.clone();
                self.engine.hydrate(record.assignment())?
            }
            None => None,
        };

        self.load_parent_options().await?;

        if let Some(ticket) = pending {
            self.resolve_fetch(ticket).await?;
        }
        Ok(())
    }

    /// Fetch the top-level option list. Retryable after failure.
    pub async fn load_parent_options(&mut self) -> Result<(), SessionError> {
        self.parent_options = DependentOptions::Loading;
        let source = Arc::clone(&self.source);
        let result = source.fetch(None).await;
        match result {
            Ok(options) => {
                self.parent_options = DependentOptions::Ready(options);
                Ok(())
            }
            Err(err) => {
                self.parent_options = DependentOptions::Stale;
                Err(SessionError::OptionFetchFailed {
                    parent: None,
                    source: err,
                })
            }
        }
    }

    /// User-driven parent change. Applies the transition synchronously and
    /// returns the fetch ticket to resolve, if one was issued. The caller
    /// decides when to await [`resolve_fetch`](Self::resolve_fetch); state
    /// observed in between already shows the cleared child and the loading
    /// option list.
    pub fn select_parent(&mut self, selection: Selection) -> Option<FetchTicket> {
        self.engine.set_parent(selection)
    }

    pub fn select_child(&mut self, selection: Selection) -> Result<(), SessionError> {
        self.engine.set_child(selection)?;
        Ok(())
    }

    /// Run the fetch a ticket stands for and deliver its outcome to the
    /// engine. A superseded result resolves to `Discarded` silently; a
    /// failure of the authoritative fetch surfaces as
    /// [`SessionError::OptionFetchFailed`] after marking the options stale.
    pub async fn resolve_fetch(&mut self, ticket: FetchTicket) -> Result<Delivery, SessionError> {
        let source = Arc::clone(&self.source);
        let result = source.fetch(Some(ticket.key())).await;
        match result {
            Ok(options) => Ok(self.engine.absorb_options(&ticket, options)),
            Err(err) => match self.engine.fetch_failed(&ticket) {
                Delivery::Applied => Err(SessionError::OptionFetchFailed {
                    parent: Some(ticket.key().clone()),
                    source: err,
                }),
                Delivery::Discarded => Ok(Delivery::Discarded),
            },
        }
    }

    /// Convenience for the common interactive path: change the parent and
    /// immediately resolve the dependent fetch.
    pub async fn select_parent_and_load(
        &mut self,
        selection: Selection,
    ) -> Result<(), SessionError> {
        if let Some(ticket) = self.select_parent(selection) {
            self.resolve_fetch(ticket).await?;
        }
        Ok(())
    }

    /// Set a sibling form field. Values are opaque pass-through; they are
    /// only checked against the form rules at submission time.
    pub fn set_field(&mut self, name: impl Into<String>, value: Value) {
        self.fields.insert(name.into(), value);
    }

    /// Validate, resolve the selection to bare keys, and hand the payload
    /// to the sink. Session state is untouched by a failed submission, so
    /// the user can correct and retry.
    pub async fn submit(&mut self) -> Result<SubmitReceipt, SessionError> {
        validate::check_fields(&self.fields, &self.limits)?;
        let resolved = self.engine.resolve_submission()?;

        let payload = SubmissionPayload {
            id: self.record_id.clone(),
            parent_id: resolved.parent_id,
            child_id: resolved.child_id,
            fields: self.fields.clone(),
        };

        let sink = Arc::clone(&self.sink);
        let receipt = sink.submit(&payload).await?;
        Ok(receipt)
    }

    /// Abandon the session: reset the engine (cancelling any outstanding
    /// fetch) and drop the record snapshot and field edits.
    pub fn close(&mut self) {
        self.engine.reset();
        self.record_id = None;
        self.fields.clear();
        self.parent_options = DependentOptions::empty();
    }

    pub fn parent(&self) -> Option<&Choice> {
        self.engine.parent()
    }

    pub fn child(&self) -> Option<&Choice> {
        self.engine.child()
    }

    pub fn parent_options(&self) -> &DependentOptions {
        &self.parent_options
    }

    pub fn child_options(&self) -> &DependentOptions {
        self.engine.child_options()
    }

    pub fn child_needs_reselection(&self) -> bool {
        self.engine.child_needs_reselection()
    }

    pub fn mode(&self) -> Mode {
        self.engine.mode()
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn record_id(&self) -> Option<&str> {
        self.record_id.as_deref()
    }
}
