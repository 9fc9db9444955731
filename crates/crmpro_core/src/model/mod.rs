//! Canonical domain model for the CRM core.
//!
//! # Responsibility
//! - Define the lead and opportunity records owned by the store.
//! - Define the filter/sort value object applied to the lead collection.
//! - Provide caller-side draft validation helpers.
//!
//! # Invariants
//! - Every record is identified by a stable uuid assigned at creation.
//! - Leads are mutated in place via patches; opportunities are immutable
//!   after creation.

pub mod filter;
pub mod lead;
pub mod opportunity;
pub mod validate;
