use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    ToSchema,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum AttendanceStatus {
    #[default]
    Present,
    Absent,
}

/// One persisted attendance record as served by the record store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "id": 10,
        "employee_id": 1,
        "date": "2024-01-10",
        "status": "Present"
    })
)]
pub struct AttendanceEvent {
    /// `None` until the store has persisted the event
    #[schema(example = 10, nullable = true)]
    pub id: Option<u64>,

    #[schema(example = 1)]
    pub employee_id: u64,

    #[schema(example = "2024-01-10", value_type = String, format = "date")]
    pub date: NaiveDate,

    pub status: AttendanceStatus,
}

/// Payload of the "upsert attendance" call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NewAttendance {
    #[schema(example = 1)]
    pub employee_id: u64,
    #[schema(example = "2024-01-10", value_type = String, format = "date")]
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}
