//! Caller-side validation for lead drafts.
//!
//! # Responsibility
//! - Check required fields and email shape before a draft reaches the store.
//!
//! # Invariants
//! - The store itself never re-validates: a failing draft must not be
//!   submitted to `add_leads`.

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::model::lead::LeadDraft;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// Why a lead draft was rejected before reaching the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftValidationError {
    MissingName,
    MissingEmail,
    InvalidEmail(String),
}

impl Display for DraftValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingName => write!(f, "lead name is required"),
            Self::MissingEmail => write!(f, "lead email is required"),
            Self::InvalidEmail(value) => write!(f, "lead email is not valid: `{value}`"),
        }
    }
}

impl Error for DraftValidationError {}

/// Validates a draft the way the edit form does: name and email are
/// required, and the email must look like an address.
pub fn validate_draft(draft: &LeadDraft) -> Result<(), DraftValidationError> {
    if draft.name.trim().is_empty() {
        return Err(DraftValidationError::MissingName);
    }
    if draft.email.trim().is_empty() {
        return Err(DraftValidationError::MissingEmail);
    }
    if !EMAIL_RE.is_match(&draft.email) {
        return Err(DraftValidationError::InvalidEmail(draft.email.clone()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{validate_draft, DraftValidationError};
    use crate::model::lead::{LeadDraft, LeadStatus};

    fn draft(name: &str, email: &str) -> LeadDraft {
        LeadDraft {
            name: name.to_string(),
            company: "Acme".to_string(),
            email: email.to_string(),
            source: "web".to_string(),
            score: 50,
            status: LeadStatus::New,
        }
    }

    #[test]
    fn accepts_a_well_formed_draft() {
        assert_eq!(validate_draft(&draft("Ana", "ana@acme.example")), Ok(()));
    }

    #[test]
    fn rejects_blank_name_and_blank_email() {
        assert_eq!(
            validate_draft(&draft("   ", "ana@acme.example")),
            Err(DraftValidationError::MissingName)
        );
        assert_eq!(
            validate_draft(&draft("Ana", "")),
            Err(DraftValidationError::MissingEmail)
        );
    }

    #[test]
    fn rejects_malformed_email() {
        for bad in ["no-at-sign", "two@@at.example", "no@dot", "spa ce@x.example"] {
            assert!(
                matches!(
                    validate_draft(&draft("Ana", bad)),
                    Err(DraftValidationError::InvalidEmail(_))
                ),
                "`{bad}` should be rejected"
            );
        }
    }
}
