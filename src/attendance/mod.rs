//! The attendance engine: reconciliation, aggregation and bulk submission.

pub mod aggregate;
pub mod reconcile;
pub mod session;
pub mod submit;

pub use aggregate::{DayRate, RecentAttendance, Stats, TodaySummary, aggregate, recent_attendance, today_summary};
pub use reconcile::{DayEntries, reconcile};
pub use session::{AttendanceSession, SessionError, SessionSnapshot};
pub use submit::{Confirmation, SubmissionResult, SubmitOutcome, submit};
