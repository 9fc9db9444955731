//! Snapshot slot contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable keyed read/write APIs over the `snapshots` table.
//! - Provide the fallback/swallow wrappers the store persists through.
//!
//! # Invariants
//! - A repository is only constructed over a fully migrated connection.
//! - `load_slot` never raises: absence, read failure, and parse failure all
//!   yield the supplied default.
//! - `save_slot` never raises: failures are logged and swallowed.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use log::{debug, warn};
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence-layer error for snapshot slot access.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// The connection has not been migrated to the expected schema version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// The migrated schema is missing the snapshots table.
    MissingSnapshotsTable,
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection not migrated: schema version {actual_version}, expected {expected_version}"
            ),
            Self::MissingSnapshotsTable => write!(f, "snapshots table is missing"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::UninitializedConnection { .. } => None,
            Self::MissingSnapshotsTable => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Keyed-slot persistence contract.
///
/// One slot holds one JSON-encoded snapshot; slots are independent.
pub trait SnapshotRepository {
    /// Reads the raw JSON text stored under `key`, if any.
    fn read_slot(&self, key: &str) -> RepoResult<Option<String>>;

    /// Writes `json` under `key`, replacing any previous value.
    fn write_slot(&self, key: &str, json: &str) -> RepoResult<()>;
}

/// SQLite-backed snapshot repository.
pub struct SqliteSnapshotRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSnapshotRepository<'conn> {
    /// Wraps a migrated connection, rejecting un-bootstrapped ones.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let actual_version =
            conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
        let expected_version = latest_version();
        if actual_version < expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        let has_table = conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'snapshots'
            );",
            [],
            |row| row.get::<_, bool>(0),
        )?;
        if !has_table {
            return Err(RepoError::MissingSnapshotsTable);
        }

        Ok(Self { conn })
    }
}

impl SnapshotRepository for SqliteSnapshotRepository<'_> {
    fn read_slot(&self, key: &str) -> RepoResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM snapshots WHERE key = ?1;",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write_slot(&self, key: &str, json: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO snapshots (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, json],
        )?;
        Ok(())
    }
}

/// Loads and decodes the snapshot under `key`, falling back to `default`.
///
/// Absence, read failure, and parse failure all return `default`; a
/// malformed record at one key must never crash startup or leak into the
/// store contract.
pub fn load_slot<T, R>(repo: &R, key: &str, default: T) -> T
where
    T: DeserializeOwned,
    R: SnapshotRepository + ?Sized,
{
    match repo.read_slot(key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => {
                debug!("event=snapshot_load module=repo status=ok key={key}");
                value
            }
            Err(err) => {
                warn!(
                    "event=snapshot_load module=repo status=fallback key={key} \
                     reason=parse_error error={err}"
                );
                default
            }
        },
        Ok(None) => {
            debug!("event=snapshot_load module=repo status=fallback key={key} reason=absent");
            default
        }
        Err(err) => {
            warn!(
                "event=snapshot_load module=repo status=fallback key={key} \
                 reason=read_error error={err}"
            );
            default
        }
    }
}

/// Encodes and writes `value` under `key`; failures are logged, not raised.
///
/// The caller's in-memory state is already mutated when this runs, so a
/// failed write must not unwind through the store contract.
pub fn save_slot<T, R>(repo: &R, key: &str, value: &T)
where
    T: Serialize,
    R: SnapshotRepository + ?Sized,
{
    let json = match serde_json::to_string(value) {
        Ok(json) => json,
        Err(err) => {
            warn!(
                "event=snapshot_save module=repo status=error key={key} \
                 reason=encode_error error={err}"
            );
            return;
        }
    };

    match repo.write_slot(key, &json) {
        Ok(()) => debug!("event=snapshot_save module=repo status=ok key={key}"),
        Err(err) => warn!(
            "event=snapshot_save module=repo status=error key={key} \
             reason=write_error error={err}"
        ),
    }
}
