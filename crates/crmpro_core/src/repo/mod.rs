//! Snapshot persistence layer.
//!
//! # Responsibility
//! - Define the keyed-slot read/write contract used by the store.
//! - Isolate SQLite details from store orchestration.
//!
//! # Invariants
//! - Each slot is independent: a corrupt record in one never affects another.
//! - Load falls back to a caller-supplied default; save failures are logged
//!   and swallowed. Neither ever raises through the store contract.

pub mod snapshot_repo;
