//! Core domain logic for CRM Pro.
//! This crate is the single source of truth for lead/opportunity invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod notify;
pub mod query;
pub mod repo;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::filter::{FilterState, SortField, SortOrder, StatusFilter};
pub use model::lead::{Lead, LeadDraft, LeadId, LeadPatch, LeadStatus};
pub use model::opportunity::{Opportunity, OpportunityDraft, OpportunityId, OpportunityStage};
pub use model::validate::{validate_draft, DraftValidationError};
pub use notify::queue::{
    Notification, NotificationId, NotificationKind, NotificationQueue, DEFAULT_DISMISS_AFTER,
};
pub use query::debounce::{SearchDebouncer, DEFAULT_QUIET_INTERVAL};
pub use query::paginate::{paginate, Page};
pub use query::select::{average_score, normalize_text, select};
pub use repo::snapshot_repo::{
    load_slot, save_slot, RepoError, RepoResult, SnapshotRepository, SqliteSnapshotRepository,
};
pub use store::app_store::{
    AppStore, ConvertError, ConvertRequest, StatusCounts, StoreError, StoreEvent, SubscriptionId,
    SLOT_FILTERS, SLOT_LEADS, SLOT_OPPORTUNITIES,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
