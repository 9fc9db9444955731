//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `crmpro_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("crmpro_core ping={}", crmpro_core::ping());
    println!("crmpro_core version={}", crmpro_core::core_version());
}
