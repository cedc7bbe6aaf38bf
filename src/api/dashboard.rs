use actix_web::{HttpResponse, Responder, web};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    attendance::{RecentAttendance, Stats, TodaySummary, aggregate, recent_attendance, today_summary},
    config::Config,
    store::{EventStore, RecordStore, RosterStore},
};

const DEFAULT_RECENT_LIMIT: usize = 5;
const MAX_RECENT_LIMIT: usize = 50;

#[derive(Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct StatsQuery {
    /// Day the rolling windows are measured from, today when omitted
    #[schema(example = "2024-01-10", format = "date", value_type = Option<String>)]
    #[param(value_type = Option<String>)]
    pub reference_date: Option<NaiveDate>,
}

#[derive(Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct RecentQuery {
    /// Number of rows, 5 by default
    #[schema(example = 5)]
    pub limit: Option<usize>,
}

#[derive(Serialize, ToSchema)]
pub struct DashboardStats {
    #[schema(example = "2024-01-10", format = "date", value_type = String)]
    pub reference_date: NaiveDate,
    pub stats: Stats,
    /// Always the current day, whatever `reference_date` is
    pub today: TodaySummary,
    pub warnings: Vec<String>,
}

#[derive(Serialize, ToSchema)]
pub struct RecentAttendanceResponse {
    pub data: Vec<RecentAttendance>,
    pub warnings: Vec<String>,
}

async fn load(store: &dyn RecordStore, config: &Config) -> (RosterStore, EventStore) {
    let mut roster = RosterStore::default();
    let mut events = EventStore::with_fetch_limit(config.event_fetch_limit);
    roster.refresh(store).await;
    events.refresh(store).await;
    (roster, events)
}

fn warnings(roster: &RosterStore, events: &EventStore) -> Vec<String> {
    [roster.last_error(), events.last_error()]
        .into_iter()
        .flatten()
        .map(str::to_string)
        .collect()
}

/// Rolling attendance statistics
#[utoipa::path(
    get,
    path = "/api/dashboard/stats",
    params(StatsQuery),
    responses(
        (status = 200, description = "Yesterday's rate, weekly average, absenteeism and today's counts", body = DashboardStats)
    ),
    tag = "Dashboard"
)]
pub async fn stats(
    store: web::Data<dyn RecordStore>,
    config: web::Data<Config>,
    query: web::Query<StatsQuery>,
) -> impl Responder {
    let reference_date = query
        .reference_date
        .unwrap_or_else(|| Local::now().date_naive());
    let (roster, events) = load(store.get_ref(), &config).await;

    HttpResponse::Ok().json(DashboardStats {
        reference_date,
        stats: aggregate(roster.employees(), events.events(), reference_date),
        today: today_summary(roster.employees(), events.events(), Local::now().date_naive()),
        warnings: warnings(&roster, &events),
    })
}

/// Most recent attendance records with employee names
#[utoipa::path(
    get,
    path = "/api/dashboard/recent",
    params(RecentQuery),
    responses(
        (status = 200, description = "Newest records first", body = RecentAttendanceResponse)
    ),
    tag = "Dashboard"
)]
pub async fn recent(
    store: web::Data<dyn RecordStore>,
    config: web::Data<Config>,
    query: web::Query<RecentQuery>,
) -> impl Responder {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_RECENT_LIMIT)
        .clamp(1, MAX_RECENT_LIMIT);
    let (roster, events) = load(store.get_ref(), &config).await;

    HttpResponse::Ok().json(RecentAttendanceResponse {
        data: recent_attendance(roster.employees(), events.events(), limit),
        warnings: warnings(&roster, &events),
    })
}
