use crate::{
    api::{attendance, dashboard, employee},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfig, GovernorConfigBuilder, PeerIpKeyExtractor,
    governor::middleware::NoOpMiddleware,
};
use actix_web::web;

pub type RateLimit = GovernorConfig<PeerIpKeyExtractor, NoOpMiddleware>;

/// Per-IP limiter allowing `requests_per_min`, bursting up to the same amount.
pub fn build_limiter(requests_per_min: u32) -> Option<RateLimit> {
    let requests_per_min = requests_per_min.max(1);
    let per_ms = (60_000 / requests_per_min as u64).max(1);
    GovernorConfigBuilder::default()
        .per_millisecond(per_ms)
        .burst_size(requests_per_min)
        .key_extractor(PeerIpKeyExtractor)
        .finish()
}

pub fn configure(cfg: &mut web::ServiceConfig, config: &Config, limiter: &RateLimit) {
    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(Governor::new(limiter)) // rate limiting
            .service(
                web::scope("/employees")
                    // /employees
                    .service(
                        web::resource("")
                            .route(web::get().to(employee::list_employees))
                            .route(web::post().to(employee::create_employee)),
                    )
                    // /employees/{id}
                    .service(
                        web::resource("/{id}").route(web::delete().to(employee::delete_employee)),
                    )
                    // /employees/{id}/attendance
                    .service(
                        web::resource("/{id}/attendance")
                            .route(web::get().to(employee::employee_attendance)),
                    ),
            )
            .service(
                web::scope("/attendance/sessions")
                    // /attendance/sessions
                    .service(web::resource("").route(web::post().to(attendance::open_session)))
                    // /attendance/sessions/{id}
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(attendance::get_session))
                            .route(web::delete().to(attendance::close_session)),
                    )
                    .service(
                        web::resource("/{id}/date").route(web::put().to(attendance::change_date)),
                    )
                    .service(
                        web::resource("/{id}/entries/{employee_id}")
                            .route(web::patch().to(attendance::edit_entry)),
                    )
                    .service(
                        web::resource("/{id}/refresh")
                            .route(web::post().to(attendance::refresh_session)),
                    )
                    .service(
                        web::resource("/{id}/submit")
                            .route(web::post().to(attendance::submit_session)),
                    ),
            )
            .service(
                web::scope("/dashboard")
                    .service(web::resource("/stats").route(web::get().to(dashboard::stats)))
                    .service(web::resource("/recent").route(web::get().to(dashboard::recent))),
            ),
    );
}

// OPEN VIEW
//  └─ POST /attendance/sessions            → session_id + one entry per employee

// EDIT
//  ├─ PATCH /attendance/sessions/{id}/entries/{employee_id}
//  └─ PUT   /attendance/sessions/{id}/date (drops unsaved edits)

// SUBMIT
//  └─ POST /attendance/sessions/{id}/submit {confirm}
//       └─ upserts settle, history re-fetched, stats recomputed
