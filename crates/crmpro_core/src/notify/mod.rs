//! Transient user-facing notifications.
//!
//! # Responsibility
//! - Own the ordered queue of toast-style messages and their independent
//!   auto-dismiss lifetimes.
//!
//! # Invariants
//! - This subsystem has no dependency on entity data; the store feeds it
//!   operation outcomes, nothing flows back.

pub mod queue;
