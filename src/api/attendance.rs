use actix_web::{HttpResponse, Responder, web};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    attendance::{AttendanceSession, SessionSnapshot, SubmissionResult, SubmitOutcome},
    config::Config,
    error::ApiError,
    model::{AttendanceStatus, DayEntry},
    store::RecordStore,
    utils::session_cache::{SessionRegistry, SharedSession},
};

#[derive(Deserialize, ToSchema)]
pub struct OpenSession {
    /// Day to edit, today when omitted
    #[schema(example = "2024-01-10", format = "date", value_type = Option<String>)]
    pub date: Option<NaiveDate>,
}

#[derive(Deserialize, ToSchema)]
pub struct ChangeDate {
    #[schema(example = "2024-01-11", format = "date", value_type = String)]
    pub date: NaiveDate,
}

#[derive(Deserialize, ToSchema)]
pub struct EditEntry {
    pub status: Option<AttendanceStatus>,
    /// Kept in memory only, never sent to the record store. Blank clears it.
    #[schema(example = "doctor appointment")]
    pub note: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct SubmitAttendance {
    /// Must be true, anything else cancels without writing
    #[schema(example = true)]
    pub confirm: bool,
}

#[derive(Serialize, ToSchema)]
pub struct SessionResponse {
    #[schema(example = "5b0c3a4e-3c43-4b9f-a1f5-7f4f1c1f0e2d", value_type = String)]
    pub session_id: Uuid,
    #[serde(flatten)]
    pub snapshot: SessionSnapshot,
}

#[derive(Serialize, ToSchema)]
pub struct SubmitResponse {
    #[schema(example = "partial_failure", value_type = String)]
    pub outcome: &'static str,
    #[schema(example = 2)]
    pub failed: usize,
    #[schema(example = "Attendance submitted, 2 record(s) failed")]
    pub message: String,
    #[schema(example = "5b0c3a4e-3c43-4b9f-a1f5-7f4f1c1f0e2d", value_type = String)]
    pub session_id: Uuid,
    #[serde(flatten)]
    pub snapshot: SessionSnapshot,
}

impl SubmitResponse {
    fn new(session_id: Uuid, outcome: SubmitOutcome, snapshot: SessionSnapshot) -> Self {
        let (outcome, failed, message) = match outcome {
            SubmitOutcome::Cancelled => ("cancelled", 0, "Submission cancelled".to_string()),
            SubmitOutcome::Completed(SubmissionResult::AllSucceeded) => (
                "all_succeeded",
                0,
                "Attendance submitted successfully".to_string(),
            ),
            SubmitOutcome::Completed(SubmissionResult::PartialFailure(failed)) => (
                "partial_failure",
                failed,
                format!("Attendance submitted, {} record(s) failed", failed),
            ),
        };

        Self {
            outcome,
            failed,
            message,
            session_id,
            snapshot,
        }
    }
}

async fn find_session(sessions: &SessionRegistry, id: Uuid) -> Result<SharedSession, ApiError> {
    sessions
        .get(&id)
        .await
        .ok_or_else(|| ApiError::NotFound("Attendance session".to_string()))
}

/// Open an attendance session
#[utoipa::path(
    post,
    path = "/api/attendance/sessions",
    request_body = OpenSession,
    responses(
        (status = 201, description = "Session opened with one entry per employee", body = SessionResponse)
    ),
    tag = "Attendance"
)]
#[instrument(name = "open_attendance_session", skip_all)]
pub async fn open_session(
    store: web::Data<dyn RecordStore>,
    sessions: web::Data<SessionRegistry>,
    config: web::Data<Config>,
    payload: web::Json<OpenSession>,
) -> impl Responder {
    let today = Local::now().date_naive();
    let date = payload.date.unwrap_or(today);

    let session =
        AttendanceSession::open(store.into_inner(), date, today, config.event_fetch_limit).await;
    let snapshot = session.snapshot();
    let session_id = sessions.insert(session).await;

    info!(%session_id, %date, entries = snapshot.entries.len(), "Attendance session opened");

    HttpResponse::Created().json(SessionResponse {
        session_id,
        snapshot,
    })
}

/// Current state of an attendance session
#[utoipa::path(
    get,
    path = "/api/attendance/sessions/{session_id}",
    params(
        ("session_id", Path, description = "Session ID")
    ),
    responses(
        (status = 200, description = "Entries, stats and fetch warnings", body = SessionResponse),
        (status = 404, description = "Unknown or expired session")
    ),
    tag = "Attendance"
)]
pub async fn get_session(
    sessions: web::Data<SessionRegistry>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let session_id = path.into_inner();
    let session = find_session(&sessions, session_id).await?;
    let snapshot = {
        let mut session = session.lock().await;
        session.set_today(Local::now().date_naive());
        session.snapshot()
    };

    Ok(HttpResponse::Ok().json(SessionResponse {
        session_id,
        snapshot,
    }))
}

/// Switch the viewed date, discarding unsaved edits
#[utoipa::path(
    put,
    path = "/api/attendance/sessions/{session_id}/date",
    params(
        ("session_id", Path, description = "Session ID")
    ),
    request_body = ChangeDate,
    responses(
        (status = 200, description = "Entries rebuilt for the new date", body = SessionResponse),
        (status = 404, description = "Unknown or expired session")
    ),
    tag = "Attendance"
)]
pub async fn change_date(
    sessions: web::Data<SessionRegistry>,
    path: web::Path<Uuid>,
    payload: web::Json<ChangeDate>,
) -> Result<HttpResponse, ApiError> {
    let session_id = path.into_inner();
    let session = find_session(&sessions, session_id).await?;

    let snapshot = {
        let mut session = session.lock().await;
        session.set_today(Local::now().date_naive());
        session.set_date(payload.date);
        session.snapshot()
    };

    Ok(HttpResponse::Ok().json(SessionResponse {
        session_id,
        snapshot,
    }))
}

/// Edit the status and/or note of one employee
#[utoipa::path(
    patch,
    path = "/api/attendance/sessions/{session_id}/entries/{employee_id}",
    params(
        ("session_id", Path, description = "Session ID"),
        ("employee_id", Path, description = "Employee ID")
    ),
    request_body = EditEntry,
    responses(
        (status = 200, description = "Updated entry", body = DayEntry),
        (status = 400, description = "Nothing to update"),
        (status = 404, description = "Unknown session or employee")
    ),
    tag = "Attendance"
)]
pub async fn edit_entry(
    sessions: web::Data<SessionRegistry>,
    path: web::Path<(Uuid, u64)>,
    payload: web::Json<EditEntry>,
) -> Result<HttpResponse, ApiError> {
    let (session_id, employee_id) = path.into_inner();
    let EditEntry { status, note } = payload.into_inner();

    if status.is_none() && note.is_none() {
        return Err(ApiError::BadRequest(
            "Provide a status or a note to update".to_string(),
        ));
    }

    let session = find_session(&sessions, session_id).await?;
    let mut session = session.lock().await;

    if let Some(status) = status {
        session.set_status(employee_id, status)?;
    }
    let entry = match note {
        Some(note) => session.set_note(employee_id, Some(note))?,
        None => session
            .entries()
            .get(&employee_id)
            .ok_or_else(|| ApiError::NotFound(format!("Employee {}", employee_id)))?,
    };

    debug!(%session_id, employee_id, status = %entry.status, "Attendance entry edited");
    Ok(HttpResponse::Ok().json(entry))
}

/// Re-fetch roster and history, discarding unsaved edits
#[utoipa::path(
    post,
    path = "/api/attendance/sessions/{session_id}/refresh",
    params(
        ("session_id", Path, description = "Session ID")
    ),
    responses(
        (status = 200, description = "Session rebuilt from the record store", body = SessionResponse),
        (status = 404, description = "Unknown or expired session")
    ),
    tag = "Attendance"
)]
pub async fn refresh_session(
    sessions: web::Data<SessionRegistry>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let session_id = path.into_inner();
    let session = find_session(&sessions, session_id).await?;

    let snapshot = {
        let mut session = session.lock().await;
        session.set_today(Local::now().date_naive());
        session.refresh().await;
        session.snapshot()
    };

    Ok(HttpResponse::Ok().json(SessionResponse {
        session_id,
        snapshot,
    }))
}

/// Submit every entry of the viewed date
#[utoipa::path(
    post,
    path = "/api/attendance/sessions/{session_id}/submit",
    params(
        ("session_id", Path, description = "Session ID")
    ),
    request_body = SubmitAttendance,
    responses(
        (status = 200, description = "Submission settled or cancelled; failures are counted, not listed", body = SubmitResponse),
        (status = 404, description = "Unknown or expired session")
    ),
    tag = "Attendance"
)]
#[instrument(name = "submit_attendance", skip_all)]
pub async fn submit_session(
    sessions: web::Data<SessionRegistry>,
    path: web::Path<Uuid>,
    payload: web::Json<SubmitAttendance>,
) -> Result<HttpResponse, ApiError> {
    let session_id = path.into_inner();
    let session = find_session(&sessions, session_id).await?;

    let (outcome, snapshot) = {
        let mut session = session.lock().await;
        session.set_today(Local::now().date_naive());
        let outcome = session.submit(payload.confirm.into()).await;
        (outcome, session.snapshot())
    };

    info!(%session_id, ?outcome, "Attendance submission finished");
    Ok(HttpResponse::Ok().json(SubmitResponse::new(session_id, outcome, snapshot)))
}

/// Close an attendance session
#[utoipa::path(
    delete,
    path = "/api/attendance/sessions/{session_id}",
    params(
        ("session_id", Path, description = "Session ID")
    ),
    responses(
        (status = 200, description = "Session closed", body = Object, example = json!({
            "message": "Session closed"
        })),
        (status = 404, description = "Unknown or expired session")
    ),
    tag = "Attendance"
)]
pub async fn close_session(
    sessions: web::Data<SessionRegistry>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let session_id = path.into_inner();

    if !sessions.remove(&session_id).await {
        return Err(ApiError::NotFound("Attendance session".to_string()));
    }

    debug!(%session_id, "Attendance session closed");
    Ok(HttpResponse::Ok().json(json!({
        "message": "Session closed"
    })))
}
