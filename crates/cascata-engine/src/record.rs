use cascata_core::{Choice, HydrationRecord};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A record being edited: its identity, its current two-level assignment,
/// and the sibling form fields the engine passes through untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EditRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub parent: Option<Choice>,
    #[serde(default)]
    pub child: Option<Choice>,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl EditRecord {
    /// The assignment half of the record, in the shape the core engine
    /// hydrates from.
    pub fn assignment(&self) -> HydrationRecord {
        HydrationRecord {
            parent: self.parent.clone(),
            child: self.child.clone(),
        }
    }
}

/// Snapshot access to the record an editing session should hydrate from.
/// Polled once when the session opens; not a subscription.
pub trait RecordProvider: Send + Sync {
    fn current(&self) -> Option<EditRecord>;
}
