use std::collections::HashSet;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::model::{AttendanceEvent, Employee, NewAttendance, NewEmployee};
use crate::store::{RecordStore, StoreError, StoreResult};

#[derive(Default)]
struct State {
    employees: Vec<Employee>,
    events: Vec<AttendanceEvent>,
    next_employee_id: u64,
    next_event_id: u64,
    upserts: Vec<NewAttendance>,
    failing_upserts: HashSet<u64>,
    listing_unavailable: bool,
}

/// Record store kept in process memory.
///
/// Mirrors the behavior of the real store: ids are assigned on insert, emails
/// are unique, attendance is appended without any per-day uniqueness. Failures
/// can be injected per employee for upserts, or globally for list calls.
#[derive(Default)]
pub struct MemoryRecordStore {
    state: Mutex<State>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(employees: Vec<Employee>, events: Vec<AttendanceEvent>) -> Self {
        let next_employee_id = employees.iter().map(|e| e.id).max().unwrap_or(0);
        let next_event_id = events.iter().filter_map(|e| e.id).max().unwrap_or(0);
        Self {
            state: Mutex::new(State {
                employees,
                events,
                next_employee_id,
                next_event_id,
                ..State::default()
            }),
        }
    }

    /// Upserts for these employees fail with a 500 from now on.
    pub async fn fail_upserts_for(&self, employee_ids: impl IntoIterator<Item = u64>) {
        self.state.lock().await.failing_upserts.extend(employee_ids);
    }

    pub async fn set_listing_unavailable(&self, unavailable: bool) {
        self.state.lock().await.listing_unavailable = unavailable;
    }

    /// Every upsert payload received, failed ones included.
    pub async fn upsert_calls(&self) -> Vec<NewAttendance> {
        self.state.lock().await.upserts.clone()
    }

    pub async fn events(&self) -> Vec<AttendanceEvent> {
        self.state.lock().await.events.clone()
    }

    fn unavailable() -> StoreError {
        StoreError::Status {
            status: 503,
            detail: "record store unavailable".to_string(),
        }
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn list_employees(&self) -> StoreResult<Vec<Employee>> {
        let state = self.state.lock().await;
        if state.listing_unavailable {
            return Err(Self::unavailable());
        }
        Ok(state.employees.clone())
    }

    async fn list_attendance(&self, limit: Option<u32>) -> StoreResult<Vec<AttendanceEvent>> {
        let state = self.state.lock().await;
        if state.listing_unavailable {
            return Err(Self::unavailable());
        }
        let limit = limit.map_or(usize::MAX, |l| l as usize);
        Ok(state.events.iter().take(limit).cloned().collect())
    }

    async fn list_attendance_for(&self, employee_id: u64) -> StoreResult<Vec<AttendanceEvent>> {
        let state = self.state.lock().await;
        if state.listing_unavailable {
            return Err(Self::unavailable());
        }
        Ok(state
            .events
            .iter()
            .filter(|e| e.employee_id == employee_id)
            .cloned()
            .collect())
    }

    async fn upsert_attendance(&self, attendance: &NewAttendance) -> StoreResult<AttendanceEvent> {
        let mut state = self.state.lock().await;
        state.upserts.push(attendance.clone());

        if state.failing_upserts.contains(&attendance.employee_id) {
            return Err(StoreError::Status {
                status: 500,
                detail: "Internal Server Error".to_string(),
            });
        }
        if !state.employees.iter().any(|e| e.id == attendance.employee_id) {
            return Err(StoreError::NotFound("employee".to_string()));
        }

        state.next_event_id += 1;
        let event = AttendanceEvent {
            id: Some(state.next_event_id),
            employee_id: attendance.employee_id,
            date: attendance.date,
            status: attendance.status,
        };
        state.events.push(event.clone());
        Ok(event)
    }

    async fn create_employee(&self, employee: &NewEmployee) -> StoreResult<Employee> {
        let mut state = self.state.lock().await;
        if state.employees.iter().any(|e| e.email == employee.email) {
            return Err(StoreError::Rejected("Email already registered".to_string()));
        }

        state.next_employee_id += 1;
        let created = Employee {
            id: state.next_employee_id,
            full_name: employee.full_name.clone(),
            email: employee.email.clone(),
            department: employee.department.clone(),
        };
        state.employees.push(created.clone());
        Ok(created)
    }

    async fn delete_employee(&self, employee_id: u64) -> StoreResult<()> {
        let mut state = self.state.lock().await;
        let before = state.employees.len();
        state.employees.retain(|e| e.id != employee_id);
        if state.employees.len() == before {
            return Err(StoreError::NotFound("employee".to_string()));
        }
        Ok(())
    }
}
