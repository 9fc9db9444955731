//! Schema migration registry and executor.
//!
//! # Responsibility
//! - Keep the ordered list of schema steps and apply the pending ones.
//!
//! # Invariants
//! - Step versions are strictly increasing.
//! - The applied version is mirrored to `PRAGMA user_version` inside the
//!   same transaction as the DDL.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

/// One schema step: DDL that brings the database to `to_version`.
#[derive(Debug, Clone, Copy)]
struct SchemaStep {
    to_version: u32,
    ddl: &'static str,
}

const SCHEMA_STEPS: &[SchemaStep] = &[SchemaStep {
    to_version: 1,
    ddl: include_str!("0001_init.sql"),
}];

/// Latest schema version this binary knows how to produce.
pub fn latest_version() -> u32 {
    SCHEMA_STEPS.last().map_or(0, |step| step.to_version)
}

/// Brings the connection's schema up to [`latest_version`].
///
/// A database written by a newer binary (version above ours) is rejected
/// rather than guessed at.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let from_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;

    if from_version > latest_version() {
        return Err(DbError::SchemaTooNew {
            db_version: from_version,
            supported: latest_version(),
        });
    }

    let pending: Vec<&SchemaStep> = SCHEMA_STEPS
        .iter()
        .filter(|step| step.to_version > from_version)
        .collect();
    if pending.is_empty() {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for step in &pending {
        tx.execute_batch(step.ddl)?;
        tx.execute_batch(&format!("PRAGMA user_version = {};", step.to_version))?;
    }
    tx.commit()?;

    info!(
        "event=db_migrate module=db status=ok from={from_version} to={} steps={}",
        latest_version(),
        pending.len()
    );
    Ok(())
}
