pub mod attendance;
pub mod day_entry;
pub mod employee;

pub use attendance::{AttendanceEvent, AttendanceStatus, NewAttendance};
pub use day_entry::DayEntry;
pub use employee::{Employee, NewEmployee};
