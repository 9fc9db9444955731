//! Filter/sort configuration applied to the lead collection.
//!
//! # Responsibility
//! - Define the fully replaceable filter value object and its enums.
//!
//! # Invariants
//! - `FilterState::default()` is the UI's reset state: empty search, all
//!   statuses, score descending.

use serde::{Deserialize, Serialize};

use crate::model::lead::LeadStatus;

/// Status facet: a concrete status or the `all` aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    All,
    New,
    Contacted,
    Qualified,
    Unqualified,
}

impl StatusFilter {
    /// Whether a lead with `status` passes this facet.
    pub fn matches(self, status: LeadStatus) -> bool {
        match self {
            Self::All => true,
            Self::New => status == LeadStatus::New,
            Self::Contacted => status == LeadStatus::Contacted,
            Self::Qualified => status == LeadStatus::Qualified,
            Self::Unqualified => status == LeadStatus::Unqualified,
        }
    }
}

/// Field the lead list is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Score,
    Name,
    Company,
    Source,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// The active search/filter/sort configuration.
///
/// A plain value object: replaced wholesale via the store's `set_filters`,
/// persisted independently from the entity collections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    pub search: String,
    pub status: StatusFilter,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search: String::new(),
            status: StatusFilter::All,
            sort_by: SortField::Score,
            sort_order: SortOrder::Desc,
        }
    }
}

impl FilterState {
    /// Whether anything deviates from the reset state.
    pub fn has_active_filters(&self) -> bool {
        !self.search.is_empty()
            || self.status != StatusFilter::All
            || self.sort_by != SortField::Score
    }
}
