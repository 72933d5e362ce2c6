//! In-memory collaborators backed by a YAML catalog, standing in for the
//! HTTP-backed option source and record store a host application would
//! provide.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use cascata_engine::record::{EditRecord, RecordProvider};
use cascata_engine::source::{OptionSource, SourceError};
use cascata_engine::submit::{SubmissionPayload, SubmissionSink, SubmitError, SubmitReceipt};
use cascata_engine::{Choice, Key};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogParent {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub children: Vec<CatalogEntry>,
}

/// The fixture data set: parent groups with their dependent options, plus
/// an optional record to hydrate from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    pub parents: Vec<CatalogParent>,
    #[serde(default)]
    pub record: Option<EditRecord>,
}

impl Catalog {
    pub async fn load(path: &Path) -> anyhow::Result<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        let catalog: Catalog = serde_yaml::from_str(&content)?;
        Ok(catalog)
    }

    /// A small built-in data set for running without `--catalog`.
    pub fn demo() -> Self {
        let electronics = CatalogParent {
            id: "c1".to_string(),
            label: "Electronics".to_string(),
            children: vec![
                CatalogEntry {
                    id: "s1".to_string(),
                    label: "Phones".to_string(),
                },
                CatalogEntry {
                    id: "s2".to_string(),
                    label: "Laptops".to_string(),
                },
            ],
        };
        let clothing = CatalogParent {
            id: "c2".to_string(),
            label: "Clothing".to_string(),
            children: vec![
                CatalogEntry {
                    id: "s10".to_string(),
                    label: "Shirts".to_string(),
                },
                CatalogEntry {
                    id: "s11".to_string(),
                    label: "Shoes".to_string(),
                },
            ],
        };
        Catalog {
            parents: vec![electronics, clothing],
            record: None,
        }
    }
}

/// Option source reading from the catalog, optionally sleeping per fetch to
/// make the loading phases observable at the prompt.
pub struct CatalogSource {
    catalog: Catalog,
    latency: Option<Duration>,
}

impl CatalogSource {
    pub fn new(catalog: Catalog, latency: Option<Duration>) -> Self {
        Self { catalog, latency }
    }
}

#[async_trait]
impl OptionSource for CatalogSource {
    async fn fetch(&self, parent: Option<&Key>) -> Result<Vec<Choice>, SourceError> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        match parent {
            None => Ok(self
                .catalog
                .parents
                .iter()
                .map(|p| Choice::new(p.id.as_str(), p.label.as_str()))
                .collect()),
            Some(key) => {
                let group = self
                    .catalog
                    .parents
                    .iter()
                    .find(|p| p.id == key.as_str())
                    .ok_or_else(|| SourceError::UnknownParent(key.clone()))?;
                Ok(group
                    .children
                    .iter()
                    .map(|c| Choice::new(c.id.as_str(), c.label.as_str()))
                    .collect())
            }
        }
    }
}

/// Hands out the catalog's record snapshot.
pub struct CatalogRecords {
    record: Option<EditRecord>,
}

impl CatalogRecords {
    pub fn new(record: Option<EditRecord>) -> Self {
        Self { record }
    }
}

impl RecordProvider for CatalogRecords {
    fn current(&self) -> Option<EditRecord> {
        self.record.clone()
    }
}

/// Prints accepted payloads to stdout; `--reject` turns every submission
/// into a failure to exercise the error path.
pub struct ConsoleSink {
    reject_with: Option<String>,
}

impl ConsoleSink {
    pub fn new(reject_with: Option<String>) -> Self {
        Self { reject_with }
    }
}

#[async_trait]
impl SubmissionSink for ConsoleSink {
    async fn submit(&self, payload: &SubmissionPayload) -> Result<SubmitReceipt, SubmitError> {
        if let Some(message) = &self.reject_with {
            return Err(SubmitError::Rejected(message.clone()));
        }
        let wire = serde_json::to_string_pretty(payload)
            .map_err(|e| SubmitError::Transport(e.to_string()))?;
        println!("{}", wire);
        Ok(SubmitReceipt {
            message: "Record updated".to_string(),
        })
    }
}
