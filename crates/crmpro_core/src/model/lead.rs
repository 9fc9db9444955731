//! Lead domain model.
//!
//! # Responsibility
//! - Define the canonical lead record and its qualification status.
//! - Provide the draft input shape consumed by bulk import and creation.
//! - Provide partial-update (patch) merge semantics.
//!
//! # Invariants
//! - `id` is unique within the collection and never reassigned.
//! - Patch merges preserve every field the patch leaves unset.
//! - `score` is expected in 0..=100 but is not hard-enforced.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a lead record.
pub type LeadId = Uuid;

/// Qualification lifecycle state of a lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadStatus {
    /// Freshly captured, not yet worked.
    New,
    /// First outreach has happened.
    Contacted,
    /// Meets the qualification bar.
    Qualified,
    /// Worked and ruled out.
    Unqualified,
}

/// A prospective customer record with a qualification score and status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    /// Stable global ID used for linking and patch addressing.
    pub id: LeadId,
    pub name: String,
    pub company: String,
    pub email: String,
    /// Acquisition channel tag, free-form (`web`, `referral`, ...).
    pub source: String,
    pub score: i64,
    pub status: LeadStatus,
}

impl Lead {
    /// Creates a lead from a draft with a freshly generated stable ID.
    pub fn new(draft: LeadDraft) -> Self {
        Self::with_id(Uuid::new_v4(), draft)
    }

    /// Creates a lead from a draft with a caller-provided stable ID.
    ///
    /// Used by seed and test paths where identity is fixed up front.
    pub fn with_id(id: LeadId, draft: LeadDraft) -> Self {
        Self {
            id,
            name: draft.name,
            company: draft.company,
            email: draft.email,
            source: draft.source,
            score: draft.score,
            status: draft.status,
        }
    }

    /// Merges `patch` onto this record; unset patch fields are preserved.
    ///
    /// The `id` is not patchable.
    pub fn apply(&mut self, patch: &LeadPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(company) = &patch.company {
            self.company = company.clone();
        }
        if let Some(email) = &patch.email {
            self.email = email.clone();
        }
        if let Some(source) = &patch.source {
            self.source = source.clone();
        }
        if let Some(score) = patch.score {
            self.score = score;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }
}

/// Pre-validated input for lead creation and bulk import.
///
/// Carries every lead field except `id`, which the store assigns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadDraft {
    pub name: String,
    pub company: String,
    pub email: String,
    pub source: String,
    pub score: i64,
    pub status: LeadStatus,
}

impl LeadDraft {
    /// Builds a draft from raw imported cell values.
    ///
    /// Collaborator contract for file importers:
    /// - an unparsable `raw_score` is coerced to `0`;
    /// - a blank `source` falls back to `imported`;
    /// - `status` always starts as [`LeadStatus::New`].
    pub fn from_raw(
        name: impl Into<String>,
        company: impl Into<String>,
        email: impl Into<String>,
        source: impl Into<String>,
        raw_score: &str,
    ) -> Self {
        let source = source.into();
        let source = if source.trim().is_empty() {
            "imported".to_string()
        } else {
            source
        };
        Self {
            name: name.into(),
            company: company.into(),
            email: email.into(),
            source,
            score: raw_score.trim().parse().unwrap_or(0),
            status: LeadStatus::New,
        }
    }
}

/// Partial update carrier for [`Lead::apply`].
///
/// Every field is optional; `None` means "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadPatch {
    pub name: Option<String>,
    pub company: Option<String>,
    pub email: Option<String>,
    pub source: Option<String>,
    pub score: Option<i64>,
    pub status: Option<LeadStatus>,
}

impl LeadPatch {
    /// Shorthand for the single most common patch: a status transition.
    pub fn status(status: LeadStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}
