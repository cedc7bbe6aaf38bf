//! Bulk submission of one day's edited entries.

use chrono::NaiveDate;
use futures::future::join_all;
use tracing::{info, warn};

use crate::attendance::reconcile::DayEntries;
use crate::model::NewAttendance;
use crate::store::{EventStore, RecordStore};

/// Answer of the user to the pre-submission prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Cancelled,
}

impl From<bool> for Confirmation {
    fn from(confirmed: bool) -> Self {
        if confirmed {
            Confirmation::Confirmed
        } else {
            Confirmation::Cancelled
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionResult {
    AllSucceeded,
    /// Number of employees whose write failed
    PartialFailure(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Cancelled,
    Completed(SubmissionResult),
}

/// Writes every entry of `date` to the store, one independent upsert per
/// employee, all in flight at once.
///
/// Waits for every request to settle; a failed write neither aborts nor rolls
/// back the others. Afterwards `events` is re-fetched so that whatever subset
/// succeeded becomes visible. Notes stay local: the store has no field for
/// them. A cancelled confirmation performs no writes and no refresh.
pub async fn submit<S: RecordStore + ?Sized>(
    store: &S,
    events: &mut EventStore,
    date: NaiveDate,
    entries: &DayEntries,
    confirmation: Confirmation,
) -> SubmitOutcome {
    if confirmation == Confirmation::Cancelled {
        info!(%date, "Attendance submission cancelled");
        return SubmitOutcome::Cancelled;
    }

    let requests = entries.values().map(|entry| {
        let payload = NewAttendance {
            employee_id: entry.employee_id,
            date,
            status: entry.status,
        };
        async move {
            let outcome = store.upsert_attendance(&payload).await;
            (payload.employee_id, outcome)
        }
    });

    let settled = join_all(requests).await;

    let mut failed = 0;
    for (employee_id, outcome) in &settled {
        if let Err(e) = outcome {
            warn!(error = %e, employee_id, %date, "Attendance upsert failed");
            failed += 1;
        }
    }

    info!(%date, submitted = settled.len(), failed, "Attendance submission settled");

    events.refresh(store).await;

    let result = if failed == 0 {
        SubmissionResult::AllSucceeded
    } else {
        SubmissionResult::PartialFailure(failed)
    };
    SubmitOutcome::Completed(result)
}
