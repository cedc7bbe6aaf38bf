//! Rolling attendance statistics, always recomputed from the raw events.

use std::collections::HashMap;

use chrono::{Days, NaiveDate};
use serde::Serialize;
use utoipa::ToSchema;

use crate::model::{AttendanceEvent, AttendanceStatus, Employee};

const UNKNOWN_EMPLOYEE: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DayRate {
    #[schema(example = 18)]
    pub present: usize,
    #[schema(example = 20)]
    pub total: usize,
    #[schema(example = 90.0)]
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Stats {
    pub yesterday: DayRate,
    #[schema(example = 87.5)]
    pub last_week_average_percentage: f64,
    #[schema(example = 6.25)]
    pub absenteeism_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct TodaySummary {
    #[schema(example = 20)]
    pub total_employees: usize,
    #[schema(example = 17)]
    pub present: usize,
    #[schema(example = 2)]
    pub absent: usize,
    /// Rounded share of the whole roster
    #[schema(example = 85)]
    pub present_percentage: u32,
    #[schema(example = 10)]
    pub absent_percentage: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct RecentAttendance {
    #[schema(example = 42, nullable = true)]
    pub event_id: Option<u64>,
    #[schema(example = "2024-01-10", value_type = String, format = "date")]
    pub date: NaiveDate,
    #[schema(example = 1)]
    pub employee_id: u64,
    #[schema(example = "John Doe")]
    pub employee_name: String,
    pub status: AttendanceStatus,
}

fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

fn count_present<'a>(events: impl IntoIterator<Item = &'a AttendanceEvent>) -> (usize, usize) {
    events.into_iter().fold((0, 0), |(present, total), e| {
        let present = present + usize::from(e.status == AttendanceStatus::Present);
        (present, total + 1)
    })
}

/// Yesterday's rate, the trailing seven-day average and all-time absenteeism
/// relative to `reference_date`.
pub fn aggregate(employees: &[Employee], events: &[AttendanceEvent], reference_date: NaiveDate) -> Stats {
    let yesterday = reference_date.checked_sub_days(Days::new(1));
    let week_start = reference_date.checked_sub_days(Days::new(7));

    let (present, recorded) = count_present(events.iter().filter(|e| Some(e.date) == yesterday));
    // no events yesterday: fall back to the roster so the rate reads 0 of N
    let total = if recorded == 0 { employees.len() } else { recorded };

    let (week_present, week_total) = count_present(events.iter().filter(|e| {
        week_start.is_some_and(|start| start <= e.date) && e.date < reference_date
    }));

    let absent = events
        .iter()
        .filter(|e| e.status == AttendanceStatus::Absent)
        .count();

    Stats {
        yesterday: DayRate {
            present,
            total,
            percentage: percentage(present, total),
        },
        last_week_average_percentage: percentage(week_present, week_total),
        absenteeism_percentage: percentage(absent, events.len()),
    }
}

/// Counts of events dated `today`, with percentages of the whole roster.
pub fn today_summary(employees: &[Employee], events: &[AttendanceEvent], today: NaiveDate) -> TodaySummary {
    let (present, recorded) = count_present(events.iter().filter(|e| e.date == today));
    let absent = recorded - present;

    let total_employees = employees.len();
    TodaySummary {
        total_employees,
        present,
        absent,
        present_percentage: percentage(present, total_employees).round() as u32,
        absent_percentage: percentage(absent, total_employees).round() as u32,
    }
}

/// The `limit` most recent events, newest first, joined with employee names.
///
/// Event id is the recency order; events that were never persisted sort last.
pub fn recent_attendance(
    employees: &[Employee],
    events: &[AttendanceEvent],
    limit: usize,
) -> Vec<RecentAttendance> {
    let names: HashMap<u64, &str> = employees
        .iter()
        .map(|e| (e.id, e.full_name.as_str()))
        .collect();

    let mut recent: Vec<&AttendanceEvent> = events.iter().collect();
    recent.sort_by(|a, b| b.id.cmp(&a.id));

    recent
        .into_iter()
        .take(limit)
        .map(|e| RecentAttendance {
            event_id: e.id,
            date: e.date,
            employee_id: e.employee_id,
            employee_name: names
                .get(&e.employee_id)
                .copied()
                .unwrap_or(UNKNOWN_EMPLOYEE)
                .to_string(),
            status: e.status,
        })
        .collect()
}
