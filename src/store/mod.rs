//! Access to the external record store that owns employees and attendance.
//!
//! The engine only ever talks to the store through [`RecordStore`]; the HTTP
//! implementation is what the service runs with, the in-memory one backs tests
//! and local runs.

use async_trait::async_trait;
use thiserror::Error;

use crate::model::{AttendanceEvent, Employee, NewAttendance, NewEmployee};

pub mod cache;
pub mod http;
pub mod memory;

pub use cache::{EventStore, RosterStore};
pub use http::HttpRecordStore;
pub use memory::MemoryRecordStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record store request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("record store returned {status}: {detail}")]
    Status { status: u16, detail: String },

    #[error("{0} not found")]
    NotFound(String),

    #[error("record store rejected the request: {0}")]
    Rejected(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn list_employees(&self) -> StoreResult<Vec<Employee>>;

    /// All attendance events, optionally bounded to `limit` records.
    async fn list_attendance(&self, limit: Option<u32>) -> StoreResult<Vec<AttendanceEvent>>;

    async fn list_attendance_for(&self, employee_id: u64) -> StoreResult<Vec<AttendanceEvent>>;

    /// Not idempotent: calling twice may leave two events for the same day.
    async fn upsert_attendance(&self, attendance: &NewAttendance) -> StoreResult<AttendanceEvent>;

    async fn create_employee(&self, employee: &NewEmployee) -> StoreResult<Employee>;

    async fn delete_employee(&self, employee_id: u64) -> StoreResult<()>;
}
