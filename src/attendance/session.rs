use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;
use utoipa::ToSchema;

use crate::attendance::aggregate::{Stats, aggregate};
use crate::attendance::reconcile::{DayEntries, reconcile};
use crate::attendance::submit::{Confirmation, SubmitOutcome, submit};
use crate::model::{AttendanceStatus, DayEntry, Employee};
use crate::store::{EventStore, RecordStore, RosterStore};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("employee {0} is not on the roster")]
    UnknownEmployee(u64),
}

/// State of one attendance view, from entry to exit.
///
/// Owns the cached roster and events, the viewed date and the editable
/// entries. Entries and stats are rebuilt wholesale whenever the date or one
/// of the collections changes, so edits made for one date never survive a
/// switch to another.
pub struct AttendanceSession {
    store: Arc<dyn RecordStore>,
    roster: RosterStore,
    events: EventStore,
    date: NaiveDate,
    today: NaiveDate,
    entries: DayEntries,
    stats: Stats,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SessionSnapshot {
    #[schema(example = "2024-01-10", value_type = String, format = "date")]
    pub date: NaiveDate,
    pub employees: Vec<Employee>,
    /// Keyed by employee id
    #[schema(value_type = Object)]
    pub entries: DayEntries,
    pub stats: Stats,
    /// Fetch failures the view should report
    pub warnings: Vec<String>,
}

impl AttendanceSession {
    /// Fetches roster and history once and derives the first view of `date`.
    ///
    /// Stats are computed relative to `today`.
    pub async fn open(
        store: Arc<dyn RecordStore>,
        date: NaiveDate,
        today: NaiveDate,
        event_fetch_limit: Option<u32>,
    ) -> Self {
        let mut roster = RosterStore::default();
        let mut events = EventStore::with_fetch_limit(event_fetch_limit);
        roster.refresh(store.as_ref()).await;
        events.refresh(store.as_ref()).await;

        let entries = reconcile(date, roster.employees(), events.events());
        let stats = aggregate(roster.employees(), events.events(), today);

        Self {
            store,
            roster,
            events,
            date,
            today,
            entries,
            stats,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn entries(&self) -> &DayEntries {
        &self.entries
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn warnings(&self) -> Vec<String> {
        [self.roster.last_error(), self.events.last_error()]
            .into_iter()
            .flatten()
            .map(str::to_string)
            .collect()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            date: self.date,
            employees: self.roster.employees().to_vec(),
            entries: self.entries.clone(),
            stats: self.stats.clone(),
            warnings: self.warnings(),
        }
    }

    /// Switches the viewed date; pending edits are discarded.
    pub fn set_date(&mut self, date: NaiveDate) {
        if date != self.date {
            debug!(from = %self.date, to = %date, "Attendance view date changed");
        }
        self.date = date;
        self.rederive();
    }

    /// Moves the stats reference day forward, for sessions left open past
    /// midnight. Entries and pending edits are untouched.
    pub fn set_today(&mut self, today: NaiveDate) {
        if today == self.today {
            return;
        }
        debug!(from = %self.today, to = %today, "Attendance stats reference day rolled over");
        self.today = today;
        self.stats = aggregate(self.roster.employees(), self.events.events(), today);
    }

    pub fn set_status(&mut self, employee_id: u64, status: AttendanceStatus) -> Result<&DayEntry, SessionError> {
        let entry = self.entry_mut(employee_id)?;
        entry.status = status;
        Ok(&*entry)
    }

    /// Blank notes clear the field.
    pub fn set_note(&mut self, employee_id: u64, note: Option<String>) -> Result<&DayEntry, SessionError> {
        let entry = self.entry_mut(employee_id)?;
        entry.note = note.filter(|n| !n.trim().is_empty());
        Ok(&*entry)
    }

    /// Re-fetches both collections; pending edits are discarded.
    pub async fn refresh(&mut self) {
        self.roster.refresh(self.store.as_ref()).await;
        self.events.refresh(self.store.as_ref()).await;
        self.rederive();
    }

    /// Submits the current entries, then rebuilds the view from the refreshed
    /// history.
    pub async fn submit(&mut self, confirmation: Confirmation) -> SubmitOutcome {
        let outcome = submit(
            self.store.as_ref(),
            &mut self.events,
            self.date,
            &self.entries,
            confirmation,
        )
        .await;

        if outcome != SubmitOutcome::Cancelled {
            self.rederive();
        }
        outcome
    }

    fn entry_mut(&mut self, employee_id: u64) -> Result<&mut DayEntry, SessionError> {
        self.entries
            .get_mut(&employee_id)
            .ok_or(SessionError::UnknownEmployee(employee_id))
    }

    fn rederive(&mut self) {
        self.entries = reconcile(self.date, self.roster.employees(), self.events.events());
        self.stats = aggregate(self.roster.employees(), self.events.events(), self.today);
    }
}
