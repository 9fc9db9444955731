//! The application store: canonical collections and their write path.
//!
//! # Responsibility
//! - Own the lead and opportunity collections, the filter state, and the
//!   notification queue.
//! - Persist each mutation's slot and notify subscribers.
//! - Run the lead-to-opportunity conversion as one logical unit.
//!
//! # Invariants
//! - Both collections are most-recent-first; new records insert at the head.
//! - Derived aggregates are recomputed per read, never cached incrementally.
//! - Persistence is fire-and-forget: the in-memory effect is visible to
//!   subsequent reads whether or not the write landed.

use chrono::Utc;
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;
use uuid::Uuid;

use crate::model::filter::FilterState;
use crate::model::lead::{Lead, LeadDraft, LeadId, LeadPatch, LeadStatus};
use crate::model::opportunity::{Opportunity, OpportunityDraft, OpportunityStage};
use crate::notify::queue::{Notification, NotificationId, NotificationKind, NotificationQueue};
use crate::query::paginate::{paginate, Page};
use crate::query::select::{average_score, select};
use crate::repo::snapshot_repo::{load_slot, save_slot, SnapshotRepository};

/// Persisted slot holding the lead collection, most-recent-first.
pub const SLOT_LEADS: &str = "leads";
/// Persisted slot holding the opportunity collection, most-recent-first.
pub const SLOT_OPPORTUNITIES: &str = "opportunities";
/// Persisted slot holding the last-used filter/sort configuration.
pub const SLOT_FILTERS: &str = "leadFilters";

/// Stable identifier for a store subscription.
pub type SubscriptionId = Uuid;

/// What changed in the store, delivered to subscribers after the mutation
/// and its persistence write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    LeadsChanged,
    OpportunitiesChanged,
    FiltersChanged,
}

/// Store-level mutation error.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreError {
    /// Opportunity amounts must be non-negative when present.
    NegativeAmount(f64),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NegativeAmount(amount) => {
                write!(f, "opportunity amount must be non-negative, got {amount}")
            }
        }
    }
}

impl Error for StoreError {}

/// Why a conversion was aborted.
#[derive(Debug, Clone, PartialEq)]
pub enum ConvertError {
    LeadNotFound(LeadId),
    Opportunity(StoreError),
}

impl Display for ConvertError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LeadNotFound(id) => write!(f, "lead not found: {id}"),
            Self::Opportunity(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ConvertError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::LeadNotFound(_) => None,
            Self::Opportunity(err) => Some(err),
        }
    }
}

impl From<StoreError> for ConvertError {
    fn from(value: StoreError) -> Self {
        Self::Opportunity(value)
    }
}

/// Caller-supplied overrides for the conversion workflow.
///
/// Unset fields fall back to the source lead: name to
/// `"{company} Opportunity"`, account name to the company, amount to 0.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConvertRequest {
    pub name: Option<String>,
    pub amount: Option<f64>,
    pub account_name: Option<String>,
}

/// Lead tally per status plus the `all` aggregate.
///
/// Recomputed with a single pass on every call; `all` always equals the
/// collection length and the four statuses always sum to `all`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub all: usize,
    pub new: usize,
    pub contacted: usize,
    pub qualified: usize,
    pub unqualified: usize,
}

struct Subscriber {
    id: SubscriptionId,
    callback: Box<dyn Fn(StoreEvent)>,
}

/// The single writer for both entity collections.
///
/// Explicitly constructed and handed to consumers; there is no ambient
/// global instance. All mutations take `&mut self`, which serializes them
/// in this single-threaded core.
pub struct AppStore<R: SnapshotRepository> {
    repo: R,
    leads: Vec<Lead>,
    opportunities: Vec<Opportunity>,
    filters: FilterState,
    notifications: NotificationQueue,
    subscribers: Vec<Subscriber>,
}

impl<R: SnapshotRepository> AppStore<R> {
    /// Loads the three snapshot slots and builds the store.
    ///
    /// `seed_leads` is the environment-supplied first-run dataset: it is the
    /// load default for the `leads` slot, so both an absent and a corrupt
    /// record fall back to it. Opportunities default to empty, filters to
    /// [`FilterState::default`].
    pub fn open(repo: R, seed_leads: Vec<Lead>) -> Self {
        let leads = load_slot(&repo, SLOT_LEADS, seed_leads);
        let opportunities = load_slot(&repo, SLOT_OPPORTUNITIES, Vec::new());
        let filters = load_slot(&repo, SLOT_FILTERS, FilterState::default());

        info!(
            "event=store_open module=store status=ok leads={} opportunities={}",
            leads.len(),
            opportunities.len()
        );

        Self {
            repo,
            leads,
            opportunities,
            filters,
            notifications: NotificationQueue::new(),
            subscribers: Vec::new(),
        }
    }

    // ---- leads ----

    /// Inserts pre-validated drafts at the head of the collection.
    ///
    /// Each draft gets a fresh id; batch order is preserved, so the first
    /// draft becomes the newest lead. Returns the assigned ids in batch
    /// order.
    pub fn add_leads(&mut self, drafts: Vec<LeadDraft>) -> Vec<LeadId> {
        if drafts.is_empty() {
            return Vec::new();
        }

        let mut fresh: Vec<Lead> = drafts.into_iter().map(Lead::new).collect();
        let ids: Vec<LeadId> = fresh.iter().map(|lead| lead.id).collect();

        fresh.extend(self.leads.drain(..));
        self.leads = fresh;

        debug!(
            "event=leads_add module=store status=ok count={} total={}",
            ids.len(),
            self.leads.len()
        );
        save_slot(&self.repo, SLOT_LEADS, &self.leads);
        self.emit(StoreEvent::LeadsChanged);
        ids
    }

    /// Merges `patch` onto the lead matching `id`.
    ///
    /// An unknown id is a silent no-op: the collection is untouched, nothing
    /// persists, no event fires.
    pub fn update_lead(&mut self, id: LeadId, patch: &LeadPatch) {
        let Some(lead) = self.leads.iter_mut().find(|lead| lead.id == id) else {
            debug!("event=lead_update module=store status=skipped reason=not_found id={id}");
            return;
        };

        lead.apply(patch);
        save_slot(&self.repo, SLOT_LEADS, &self.leads);
        self.emit(StoreEvent::LeadsChanged);
    }

    /// Lead by id, if present.
    pub fn lead(&self, id: LeadId) -> Option<&Lead> {
        self.leads.iter().find(|lead| lead.id == id)
    }

    /// The full lead collection, most-recent-first.
    pub fn leads(&self) -> &[Lead] {
        &self.leads
    }

    /// Single-pass status tally over the current collection.
    pub fn status_counts(&self) -> StatusCounts {
        let mut counts = StatusCounts {
            all: self.leads.len(),
            ..StatusCounts::default()
        };
        for lead in &self.leads {
            match lead.status {
                LeadStatus::New => counts.new += 1,
                LeadStatus::Contacted => counts.contacted += 1,
                LeadStatus::Qualified => counts.qualified += 1,
                LeadStatus::Unqualified => counts.unqualified += 1,
            }
        }
        counts
    }

    // ---- opportunities ----

    /// Creates an opportunity at the head of the collection.
    ///
    /// Rejects a negative `amount`; stamps id and creation time. A draft
    /// without `lead_id` stays unlinked.
    pub fn add_opportunity(
        &mut self,
        draft: OpportunityDraft,
    ) -> Result<Opportunity, StoreError> {
        if let Some(amount) = draft.amount {
            if amount < 0.0 {
                return Err(StoreError::NegativeAmount(amount));
            }
        }

        let opportunity = Opportunity::new(draft, Utc::now());
        self.opportunities.insert(0, opportunity.clone());

        save_slot(&self.repo, SLOT_OPPORTUNITIES, &self.opportunities);
        self.emit(StoreEvent::OpportunitiesChanged);
        Ok(opportunity)
    }

    /// The full opportunity collection, most-recent-first.
    pub fn opportunities(&self) -> &[Opportunity] {
        &self.opportunities
    }

    // ---- conversion workflow ----

    /// Converts a lead into an opportunity as one logical unit.
    ///
    /// Creates the opportunity (`stage = prospecting`, back-referencing the
    /// lead) and, only once that succeeded, advances the lead's status to
    /// `qualified`. On success a success notification is enqueued; on any
    /// failure an error notification is enqueued and the error is returned
    /// so the caller can reset its busy state. A failed creation leaves the
    /// lead untouched.
    pub fn convert_lead_to_opportunity(
        &mut self,
        lead_id: LeadId,
        request: ConvertRequest,
    ) -> Result<Opportunity, ConvertError> {
        let Some(lead) = self.lead(lead_id).cloned() else {
            warn!("event=lead_convert module=store status=error reason=not_found id={lead_id}");
            self.notifications.notify(
                NotificationKind::Error,
                "Lead conversion failed",
                Some(format!("lead not found: {lead_id}")),
                None,
            );
            return Err(ConvertError::LeadNotFound(lead_id));
        };

        let draft = OpportunityDraft {
            name: non_blank(request.name)
                .unwrap_or_else(|| format!("{} Opportunity", lead.company)),
            stage: OpportunityStage::Prospecting,
            amount: Some(request.amount.unwrap_or(0.0)),
            account_name: non_blank(request.account_name).unwrap_or_else(|| lead.company.clone()),
            lead_id: Some(lead.id),
        };

        match self.add_opportunity(draft) {
            Ok(opportunity) => {
                self.update_lead(lead_id, &LeadPatch::status(LeadStatus::Qualified));
                info!(
                    "event=lead_convert module=store status=ok lead={lead_id} opportunity={}",
                    opportunity.id
                );
                self.notifications.notify(
                    NotificationKind::Success,
                    "Lead converted to opportunity",
                    Some(format!("{} is now in your pipeline", opportunity.name)),
                    None,
                );
                Ok(opportunity)
            }
            Err(err) => {
                warn!("event=lead_convert module=store status=error lead={lead_id} error={err}");
                self.notifications.notify(
                    NotificationKind::Error,
                    "Lead conversion failed",
                    Some(err.to_string()),
                    None,
                );
                Err(err.into())
            }
        }
    }

    // ---- filters and views ----

    /// Replaces the filter/sort configuration.
    ///
    /// Callers paging through `filtered_view` must go back to page 1 after
    /// this: the visible sequence may have changed shape.
    pub fn set_filters(&mut self, filters: FilterState) {
        self.filters = filters;
        save_slot(&self.repo, SLOT_FILTERS, &self.filters);
        self.emit(StoreEvent::FiltersChanged);
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// One page of the filtered, sorted lead view.
    pub fn filtered_view(&self, page: usize, page_size: usize) -> Page<Lead> {
        let selected = select(&self.leads, &self.filters);
        paginate(&selected, page_size, page)
    }

    /// Rounded mean score of the currently visible selection, 0 when empty.
    pub fn average_score(&self) -> i64 {
        average_score(&select(&self.leads, &self.filters))
    }

    // ---- notifications ----

    /// Enqueues a notification; see [`NotificationQueue::notify`].
    pub fn notify(
        &mut self,
        kind: NotificationKind,
        title: impl Into<String>,
        message: Option<String>,
        dismiss_after: Option<std::time::Duration>,
    ) -> NotificationId {
        self.notifications.notify(kind, title, message, dismiss_after)
    }

    /// Dismisses a notification; unknown ids are a no-op.
    pub fn dismiss(&mut self, id: NotificationId) {
        self.notifications.dismiss(id);
    }

    /// Expires due notifications; see [`NotificationQueue::sweep_expired`].
    pub fn sweep_notifications(&mut self, now: Instant) -> Vec<NotificationId> {
        self.notifications.sweep_expired(now)
    }

    /// Live notifications in append order.
    pub fn notifications(&self) -> &[Notification] {
        self.notifications.entries()
    }

    // ---- subscriptions ----

    /// Registers a callback invoked after every committed mutation.
    pub fn subscribe(&mut self, callback: Box<dyn Fn(StoreEvent)>) -> SubscriptionId {
        let id = Uuid::new_v4();
        self.subscribers.push(Subscriber { id, callback });
        id
    }

    /// Removes a subscription; unknown ids are a no-op.
    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.subscribers.retain(|subscriber| subscriber.id != id);
    }

    fn emit(&self, event: StoreEvent) {
        for subscriber in &self.subscribers {
            (subscriber.callback)(event);
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}
