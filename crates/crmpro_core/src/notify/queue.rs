//! Ordered notification queue with per-entry auto-dismiss deadlines.
//!
//! # Responsibility
//! - Append, dismiss, and expire transient messages.
//!
//! # Invariants
//! - Entries append at the end; display order is a rendering concern.
//! - Expiry deadlines are plain data driven by the host loop, not timer
//!   threads. Sweeping at a deadline is equivalent to an explicit dismiss.
//! - Dismissing an unknown id is a no-op; double removal cannot happen.

use log::debug;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Stable identifier for a queued notification.
pub type NotificationId = Uuid;

/// Auto-dismiss delay applied when the caller does not specify one.
pub const DEFAULT_DISMISS_AFTER: Duration = Duration::from_secs(5);

/// Severity/outcome flavor of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Warning,
    Info,
}

/// One transient user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    pub kind: NotificationKind,
    pub title: String,
    pub message: Option<String>,
    /// The effective auto-dismiss delay (default applied when unset).
    pub dismiss_after: Duration,
    deadline: Instant,
}

impl Notification {
    /// Instant at which the entry expires unless dismissed first.
    pub fn deadline(&self) -> Instant {
        self.deadline
    }
}

/// Ordered collection of live notifications.
#[derive(Debug, Default)]
pub struct NotificationQueue {
    entries: Vec<Notification>,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry whose expiry timer starts at `now`.
    ///
    /// `dismiss_after = None` applies [`DEFAULT_DISMISS_AFTER`].
    pub fn push(
        &mut self,
        kind: NotificationKind,
        title: impl Into<String>,
        message: Option<String>,
        dismiss_after: Option<Duration>,
        now: Instant,
    ) -> NotificationId {
        let id = Uuid::new_v4();
        let dismiss_after = dismiss_after.unwrap_or(DEFAULT_DISMISS_AFTER);
        self.entries.push(Notification {
            id,
            kind,
            title: title.into(),
            message,
            dismiss_after,
            deadline: now + dismiss_after,
        });
        id
    }

    /// [`push`](Self::push) stamped with the current instant.
    pub fn notify(
        &mut self,
        kind: NotificationKind,
        title: impl Into<String>,
        message: Option<String>,
        dismiss_after: Option<Duration>,
    ) -> NotificationId {
        self.push(kind, title, message, dismiss_after, Instant::now())
    }

    /// Removes the matching entry; unknown ids are a no-op.
    ///
    /// Removal also cancels the pending expiry: the deadline dies with the
    /// entry.
    pub fn dismiss(&mut self, id: NotificationId) {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        if self.entries.len() == before {
            debug!("event=notification_dismiss module=notify status=skipped id={id}");
        }
    }

    /// Removes every entry whose deadline has passed, returning their ids.
    ///
    /// Equivalent to calling [`dismiss`](Self::dismiss) for each due entry.
    pub fn sweep_expired(&mut self, now: Instant) -> Vec<NotificationId> {
        let expired: Vec<NotificationId> = self
            .entries
            .iter()
            .filter(|entry| entry.deadline <= now)
            .map(|entry| entry.id)
            .collect();
        self.entries.retain(|entry| entry.deadline > now);
        expired
    }

    /// Earliest pending deadline, for host wake-up scheduling.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries.iter().map(|entry| entry.deadline).min()
    }

    /// Live entries in append order.
    pub fn entries(&self) -> &[Notification] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
