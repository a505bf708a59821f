//! Confirmation seam for destructive bulk clears.

use thiserror::Error;

/// The prompt mechanism itself failed (closed stdin, broken terminal).
/// Distinct from the user answering "no".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("confirmation prompt failed: {reason}")]
pub struct PromptError {
    reason: String,
}

impl PromptError {
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Presents a yes/no question and blocks until answered.
pub trait ConfirmPrompt {
    fn confirm(&mut self, message: &str) -> Result<bool, PromptError>;
}

/// Prompt that consents to everything, for non-interactive use.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoConfirm;

impl ConfirmPrompt for AutoConfirm {
    fn confirm(&mut self, _message: &str) -> Result<bool, PromptError> {
        Ok(true)
    }
}

/// Fail-open policy: a broken prompt mechanism counts as consent. A decline
/// is only a decline when the user actually answered no.
#[must_use]
pub fn resolve_consent(outcome: Result<bool, PromptError>) -> bool {
    outcome.unwrap_or(true)
}

/// Result of a confirmation-gated clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearOutcome {
    Cleared,
    Declined,
}

#[cfg(test)]
mod tests {
    use super::{resolve_consent, PromptError};

    #[test]
    fn consent_follows_the_answer_when_the_prompt_works() {
        assert!(resolve_consent(Ok(true)));
        assert!(!resolve_consent(Ok(false)));
    }

    #[test]
    fn a_failing_prompt_counts_as_consent() {
        assert!(resolve_consent(Err(PromptError::new("stdin closed"))));
    }
}
