use std::sync::Arc;

use actix_web::middleware::NormalizePath;
use actix_web::web::Data;
use actix_web::{App, HttpServer, Responder, get};
use dotenvy::dotenv;

use hrms_attendance::config::Config;
use hrms_attendance::docs::ApiDoc;
use hrms_attendance::routes;
use hrms_attendance::store::{HttpRecordStore, RecordStore};
use hrms_attendance::utils::session_cache::SessionRegistry;

use tracing::{error, info};
use tracing_appender::rolling;
use utoipa::OpenApi; // ← needed for ApiDoc::openapi()
use utoipa_swagger_ui::SwaggerUi;

#[get("/")]
async fn index() -> impl Responder {
    "HRMS attendance service is running"
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    // Rolling daily log
    let file_appender = rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(config.log_level)
        .with_ansi(false)
        .with_target(false) // removes module path
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!(record_api = %config.record_api_url, "Server starting...");

    let store: Arc<dyn RecordStore> = match HttpRecordStore::new(
        &config.record_api_url,
        config.request_timeout,
        config.employee_fetch_limit,
    ) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            error!(error = %e, "Failed to build record store client");
            return Err(std::io::Error::other(e.to_string()));
        }
    };

    let limiter = routes::build_limiter(config.rate_per_min)
        .ok_or_else(|| std::io::Error::other("invalid rate limit configuration"))?;

    let sessions = SessionRegistry::new(config.max_sessions, config.session_ttl);
    let server_addr = config.server_addr.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}") // ← important: wildcard {_:.*} to match JS/CSS files
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(Data::from(store.clone()))
            .app_data(Data::new(sessions.clone()))
            .app_data(Data::new(config.clone()))
            .service(index)
            .configure(|cfg| routes::configure(cfg, &config, &limiter))
    })
    .bind(server_addr)?
    .run()
    .await
}
