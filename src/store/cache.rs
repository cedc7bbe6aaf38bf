//! Read-only cached copies of the two collections the engine joins.
//!
//! A failed fetch never propagates: the collection becomes empty and the
//! error is kept as a warning for the presentation layer.

use tracing::{debug, error};

use crate::model::{AttendanceEvent, Employee};
use crate::store::RecordStore;

#[derive(Debug, Default, Clone)]
pub struct RosterStore {
    employees: Vec<Employee>,
    last_error: Option<String>,
}

impl RosterStore {
    pub async fn refresh<S: RecordStore + ?Sized>(&mut self, store: &S) {
        match store.list_employees().await {
            Ok(employees) => {
                debug!(count = employees.len(), "Roster fetched");
                self.employees = employees;
                self.last_error = None;
            }
            Err(e) => {
                error!(error = %e, "Failed to fetch employee roster");
                self.employees.clear();
                self.last_error = Some(format!("Employee roster unavailable: {}", e));
            }
        }
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

#[derive(Debug, Default, Clone)]
pub struct EventStore {
    events: Vec<AttendanceEvent>,
    fetch_limit: Option<u32>,
    last_error: Option<String>,
}

impl EventStore {
    pub fn with_fetch_limit(fetch_limit: Option<u32>) -> Self {
        Self {
            fetch_limit,
            ..Self::default()
        }
    }

    pub async fn refresh<S: RecordStore + ?Sized>(&mut self, store: &S) {
        match store.list_attendance(self.fetch_limit).await {
            Ok(events) => {
                debug!(count = events.len(), "Attendance events fetched");
                self.events = events;
                self.last_error = None;
            }
            Err(e) => {
                error!(error = %e, "Failed to fetch attendance events");
                self.events.clear();
                self.last_error = Some(format!("Attendance history unavailable: {}", e));
            }
        }
    }

    pub fn events(&self) -> &[AttendanceEvent] {
        &self.events
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AttendanceStatus;
    use crate::store::MemoryRecordStore;
    use chrono::NaiveDate;

    fn store() -> MemoryRecordStore {
        MemoryRecordStore::with_data(
            vec![Employee {
                id: 1,
                full_name: "A".into(),
                email: "a@corp.io".into(),
                department: "Ops".into(),
            }],
            vec![AttendanceEvent {
                id: Some(1),
                employee_id: 1,
                date: NaiveDate::from_ymd_opt(2024, 1, 9).unwrap(),
                status: AttendanceStatus::Absent,
            }],
        )
    }

    #[actix_web::test]
    async fn refresh_loads_collections() {
        let store = store();
        let mut roster = RosterStore::default();
        let mut events = EventStore::default();

        roster.refresh(&store).await;
        events.refresh(&store).await;

        assert_eq!(roster.employees().len(), 1);
        assert_eq!(events.events().len(), 1);
        assert!(roster.last_error().is_none());
        assert!(events.last_error().is_none());
    }

    #[actix_web::test]
    async fn fetch_failure_degrades_to_empty_with_warning() {
        let store = store();
        let mut roster = RosterStore::default();
        let mut events = EventStore::default();
        roster.refresh(&store).await;
        events.refresh(&store).await;

        store.set_listing_unavailable(true).await;
        roster.refresh(&store).await;
        events.refresh(&store).await;

        assert!(roster.employees().is_empty());
        assert!(events.events().is_empty());
        assert!(roster.last_error().unwrap().contains("unavailable"));
        assert!(events.last_error().is_some());

        store.set_listing_unavailable(false).await;
        roster.refresh(&store).await;
        assert_eq!(roster.employees().len(), 1);
        assert!(roster.last_error().is_none());
    }
}
