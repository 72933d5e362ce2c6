//! Async integration layer around `cascata-core`: the collaborator traits a
//! host application implements (option source, record provider, submission
//! sink), the editing session that drives the core engine through them, and
//! the ambient pieces the session needs (field validation, config, message
//! mapping).

pub mod config;
pub mod error_mapping;
pub mod record;
pub mod session;
pub mod source;
pub mod submit;
pub mod validate;

pub use cascata_core::{
    Choice, Delivery, DependentOptions, EngineError, FetchTicket, HydrationRecord, Key, Mode,
    Selection, SelectionEngine, SelectionField,
};

pub use record::{EditRecord, RecordProvider};
pub use session::{EditSession, SessionError};
pub use source::{OptionSource, SourceError};
pub use submit::{SubmissionPayload, SubmissionSink, SubmitError, SubmitReceipt};
