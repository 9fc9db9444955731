//! Store orchestration layer.
//!
//! # Responsibility
//! - Own the canonical entity collections and the single write path.
//! - Wire mutations to snapshot persistence, events, and notifications.
//!
//! # Invariants
//! - All writes to leads and opportunities go through [`app_store::AppStore`];
//!   read views never mutate.

pub mod app_store;
