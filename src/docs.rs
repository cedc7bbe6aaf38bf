use crate::api::attendance::{
    ChangeDate, EditEntry, OpenSession, SessionResponse, SubmitAttendance, SubmitResponse,
};
use crate::api::dashboard::{DashboardStats, RecentAttendanceResponse, RecentQuery, StatsQuery};
use crate::api::employee::EmployeeListResponse;
use crate::attendance::{DayRate, RecentAttendance, SessionSnapshot, Stats, TodaySummary};
use crate::model::{AttendanceEvent, AttendanceStatus, DayEntry, Employee, NewEmployee};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HRMS Attendance API",
        version = "0.1.0",
        description = r#"
## HRMS Attendance

Daily attendance administration on top of the HRMS record store.

### 🔹 Key Features
- **Employee Management**
  - List, create and delete employees, view one employee's attendance history
- **Daily Attendance Sessions**
  - Open a day, get one editable entry per employee (unrecorded days default to Present)
  - Edit statuses and notes, switch dates, submit the whole day at once
  - Partial failures are reported as a count, successful writes are kept
- **Dashboard**
  - Yesterday's attendance rate, trailing 7-day average, overall absenteeism
  - Today's present/absent counts and the most recent records

### ⚠️ Notes
- Notes are kept in the session only, the record store has no field for them.
- When the record store is unreachable, collections come back empty with a `warnings` entry.

---
Built with **Rust**, **Actix Web**, **reqwest**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::employee::list_employees,
        crate::api::employee::create_employee,
        crate::api::employee::delete_employee,
        crate::api::employee::employee_attendance,

        crate::api::attendance::open_session,
        crate::api::attendance::get_session,
        crate::api::attendance::change_date,
        crate::api::attendance::edit_entry,
        crate::api::attendance::refresh_session,
        crate::api::attendance::submit_session,
        crate::api::attendance::close_session,

        crate::api::dashboard::stats,
        crate::api::dashboard::recent
    ),
    components(
        schemas(
            Employee,
            NewEmployee,
            EmployeeListResponse,
            AttendanceEvent,
            AttendanceStatus,
            DayEntry,
            OpenSession,
            ChangeDate,
            EditEntry,
            SubmitAttendance,
            SessionSnapshot,
            SessionResponse,
            SubmitResponse,
            Stats,
            DayRate,
            TodaySummary,
            RecentAttendance,
            StatsQuery,
            RecentQuery,
            DashboardStats,
            RecentAttendanceResponse
        )
    ),
    tags(
        (name = "Employee", description = "Employee roster APIs"),
        (name = "Attendance", description = "Daily attendance session APIs"),
        (name = "Dashboard", description = "Attendance statistics APIs"),
    )
)]
pub struct ApiDoc;
