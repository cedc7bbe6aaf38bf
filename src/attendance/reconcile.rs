//! Joins the roster with the event history into one editable entry per
//! employee for a single date.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use tracing::debug;

use crate::model::{AttendanceEvent, DayEntry, Employee};

pub type DayEntries = BTreeMap<u64, DayEntry>;

/// Builds the dense view of `date` for every employee in `employees`.
///
/// Employees without an event that day default to `Present` with no source
/// event. When the store holds several events for the same employee and day,
/// the highest id wins (`None` ranks below any persisted id); on equal ids
/// the later event in `events` wins.
pub fn reconcile(date: NaiveDate, employees: &[Employee], events: &[AttendanceEvent]) -> DayEntries {
    let mut authoritative: HashMap<u64, &AttendanceEvent> = HashMap::new();

    for event in events.iter().filter(|e| e.date == date) {
        match authoritative.get(&event.employee_id) {
            Some(current) if current.id > event.id => {
                debug!(employee_id = event.employee_id, %date, "Duplicate attendance event ignored");
            }
            Some(_) => {
                debug!(employee_id = event.employee_id, %date, "Duplicate attendance event supersedes earlier one");
                authoritative.insert(event.employee_id, event);
            }
            None => {
                authoritative.insert(event.employee_id, event);
            }
        }
    }

    employees
        .iter()
        .map(|employee| {
            let entry = match authoritative.get(&employee.id) {
                Some(event) => DayEntry {
                    employee_id: employee.id,
                    status: event.status,
                    note: None,
                    source_event_id: event.id,
                },
                None => DayEntry::unrecorded(employee.id),
            };
            (employee.id, entry)
        })
        .collect()
}
