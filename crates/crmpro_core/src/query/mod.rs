//! Derived read views over the lead collection.
//!
//! # Responsibility
//! - Expose pure filter/sort selection, pagination, and the debounced
//!   search-input commit abstraction.
//!
//! # Invariants
//! - Nothing in this module mutates store state; every function maps input
//!   to a fresh output value.

pub mod debounce;
pub mod paginate;
pub mod select;
