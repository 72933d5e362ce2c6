use crate::config::FormLimits;
use serde_json::{Map, Value};
use thiserror::Error;

/// Recoverable sibling-field validation failures, surfaced to the user as
/// form messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Please enter a {field}")]
    Required { field: String },
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },
}

/// Check the sibling fields against the form's rules. Fields without a rule
/// and non-string values are opaque pass-through and never rejected here.
pub fn check_fields(fields: &Map<String, Value>, limits: &FormLimits) -> Result<(), FieldError> {
    for rule in &limits.fields {
        let value = fields.get(&rule.name);
        let text = match value {
            Some(Value::String(s)) => Some(s.as_str()),
            Some(Value::Null) | None => None,
            Some(_) => continue,
        };

        match text {
            None | Some("") if rule.required => {
                return Err(FieldError::Required {
                    field: rule.name.clone(),
                });
            }
            Some(s) => {
                if let Some(max) = rule.max_len {
                    if s.chars().count() > max {
                        return Err(FieldError::TooLong {
                            field: rule.name.clone(),
                            max,
                        });
                    }
                }
            }
            None => {}
        }
    }
    Ok(())
}
