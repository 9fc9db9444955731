//! Opportunity domain model.
//!
//! # Responsibility
//! - Define the sales-pipeline record created from leads or direct entry.
//! - Keep the persisted wire shape camelCase (`accountName`, `leadId`,
//!   `createdAt`).
//!
//! # Invariants
//! - `created_at` is stamped once at creation and never changes.
//! - `lead_id` is a weak reference: the core does not guarantee it resolves
//!   to an existing lead.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::lead::LeadId;

/// Stable identifier for an opportunity record.
pub type OpportunityId = Uuid;

/// Pipeline stage of an opportunity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OpportunityStage {
    Prospecting,
    Qualification,
    Proposal,
    Negotiation,
    ClosedWon,
    ClosedLost,
}

/// A potential deal, optionally originated from a lead.
///
/// Records are append-only: there is no update operation on opportunities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Opportunity {
    pub id: OpportunityId,
    pub name: String,
    pub stage: OpportunityStage,
    /// Deal size; non-negative when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    pub account_name: String,
    /// Weak back-reference to the originating lead, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lead_id: Option<LeadId>,
    /// Creation instant, ISO-8601 on the wire.
    pub created_at: DateTime<Utc>,
}

impl Opportunity {
    /// Creates an opportunity from a draft, stamping id and creation time.
    pub fn new(draft: OpportunityDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: draft.name,
            stage: draft.stage,
            amount: draft.amount,
            account_name: draft.account_name,
            lead_id: draft.lead_id,
            created_at,
        }
    }
}

/// Input for opportunity creation; id and `created_at` are store-assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct OpportunityDraft {
    pub name: String,
    pub stage: OpportunityStage,
    pub amount: Option<f64>,
    pub account_name: String,
    pub lead_id: Option<LeadId>,
}
