use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::attendance::AttendanceStatus;

/// Editable attendance state of one employee for the viewed date.
///
/// Derived from the roster and the event history, never persisted. `note`
/// only lives in memory: the record store has no field for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DayEntry {
    #[schema(example = 1)]
    pub employee_id: u64,
    pub status: AttendanceStatus,
    #[schema(example = "left early", nullable = true)]
    pub note: Option<String>,
    /// Event being edited, `None` when submit will create a new one
    #[schema(example = 10, nullable = true)]
    pub source_event_id: Option<u64>,
}

impl DayEntry {
    pub fn unrecorded(employee_id: u64) -> Self {
        Self {
            employee_id,
            status: AttendanceStatus::Present,
            note: None,
            source_event_id: None,
        }
    }
}
