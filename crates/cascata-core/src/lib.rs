//! Core of the dependent selection engine: a synchronous state machine that
//! owns a parent selection, the dependent option list it implies, and the
//! dependent selection, across cold start, user edits, and hydration from an
//! existing record. Async transport lives in `cascata-engine`; this crate
//! only hands out fetch tickets and judges results delivered against them.

pub mod engine;
pub mod error;
pub mod selection;
pub mod sequencer;
pub mod state;

pub use engine::{Delivery, HydrationRecord, ResolvedSelection, SelectionEngine};
pub use error::{EngineError, SelectionField};
pub use selection::{Choice, Key, Selection, filter_by_label};
pub use sequencer::{FetchSequencer, FetchTicket};
pub use state::{DependentOptions, Mode};
