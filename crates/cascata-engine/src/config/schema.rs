use serde::{Deserialize, Serialize};

/// One sibling form field the session validates before submitting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRule {
    pub name: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub max_len: Option<usize>,
}

/// Validation rules for the sibling fields. The selection levels themselves
/// are validated by the core engine, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormLimits {
    #[serde(default)]
    pub fields: Vec<FieldRule>,
}

impl Default for FormLimits {
    fn default() -> Self {
        FormLimits {
            fields: vec![
                FieldRule {
                    name: "name".to_string(),
                    required: true,
                    max_len: Some(120),
                },
                FieldRule {
                    name: "description".to_string(),
                    required: true,
                    max_len: Some(500),
                },
            ],
        }
    }
}

/// Knobs for option sources that support them (the fixture source uses
/// `latency_ms` to simulate a slow transport).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub latency_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CascataConfig {
    pub form: FormLimits,
    pub source: SourceConfig,
}
