use crate::source::SourceError;
use crate::submit::SubmitError;

/// Fallback shown when a submission fails without a usable message.
pub const GENERIC_SUBMIT_FAILURE: &str = "There was an issue updating the record.";

/// Message shown when submission fails: the sink's own words when it has
/// any, else the generic fallback.
pub fn submit_failure_message(err: &SubmitError) -> String {
    match err {
        SubmitError::Rejected(msg) if !msg.is_empty() => msg.clone(),
        _ => GENERIC_SUBMIT_FAILURE.to_string(),
    }
}

/// Message shown on a picker level whose options failed to load. The load
/// is retryable; the selection itself is untouched.
pub fn load_failure_message(err: &SourceError) -> String {
    format!("Failed to load options: {err}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_message_is_shown_verbatim() {
        let err = SubmitError::Rejected("Name already taken".to_string());
        assert_eq!(submit_failure_message(&err), "Name already taken");
    }

    #[test]
    fn test_transport_failure_falls_back_to_generic_text() {
        let err = SubmitError::Transport("connection refused".to_string());
        assert_eq!(submit_failure_message(&err), GENERIC_SUBMIT_FAILURE);
    }

    #[test]
    fn test_empty_rejection_falls_back_to_generic_text() {
        let err = SubmitError::Rejected(String::new());
        assert_eq!(submit_failure_message(&err), GENERIC_SUBMIT_FAILURE);
    }
}
