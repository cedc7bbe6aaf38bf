//! Wire contract of the HTTP record store client, checked against a local
//! actix server that speaks the record service's routes.

use std::sync::Mutex;
use std::time::Duration;

use actix_web::{App, HttpResponse, HttpServer, web};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;

use hrms_attendance::model::{AttendanceStatus, NewAttendance, NewEmployee};
use hrms_attendance::store::{HttpRecordStore, RecordStore, StoreError};

#[derive(Default)]
struct Seen {
    employee_queries: Vec<String>,
    attendance_queries: Vec<String>,
    upserts: Vec<serde_json::Value>,
}

#[derive(Deserialize)]
struct LimitQuery {
    limit: Option<u32>,
}

async fn list_employees(seen: web::Data<Mutex<Seen>>, req: actix_web::HttpRequest) -> HttpResponse {
    seen.lock().unwrap().employee_queries.push(req.query_string().to_string());
    HttpResponse::Ok().json(json!([
        { "id": 1, "full_name": "A", "email": "a@corp.io", "department": "Ops" },
        { "id": 2, "full_name": "B", "email": "b@corp.io", "department": "Ops" }
    ]))
}

async fn list_attendance(
    seen: web::Data<Mutex<Seen>>,
    req: actix_web::HttpRequest,
    query: web::Query<LimitQuery>,
) -> HttpResponse {
    seen.lock().unwrap().attendance_queries.push(req.query_string().to_string());
    let events = json!([
        { "id": 1, "employee_id": 1, "date": "2024-01-09", "status": "Present" },
        { "id": 2, "employee_id": 2, "date": "2024-01-09", "status": "Absent" }
    ]);
    let limit = query.limit.unwrap_or(u32::MAX) as usize;
    let events: Vec<_> = events.as_array().unwrap().iter().take(limit).cloned().collect();
    HttpResponse::Ok().json(events)
}

async fn employee_attendance(path: web::Path<u64>) -> HttpResponse {
    let employee_id = path.into_inner();
    HttpResponse::Ok().json(json!([
        { "id": 5, "employee_id": employee_id, "date": "2024-01-09", "status": "Absent" }
    ]))
}

async fn mark_attendance(
    seen: web::Data<Mutex<Seen>>,
    body: web::Json<serde_json::Value>,
) -> HttpResponse {
    let body = body.into_inner();
    seen.lock().unwrap().upserts.push(body.clone());

    match body["employee_id"].as_u64() {
        Some(404) => HttpResponse::NotFound().json(json!({ "detail": "Employee not found" })),
        Some(500) => HttpResponse::InternalServerError().body("boom"),
        Some(employee_id) => HttpResponse::Ok().json(json!({
            "id": 77,
            "employee_id": employee_id,
            "date": body["date"],
            "status": body["status"]
        })),
        None => HttpResponse::UnprocessableEntity().json(json!({ "detail": "bad payload" })),
    }
}

async fn create_employee(body: web::Json<serde_json::Value>) -> HttpResponse {
    if body["email"] == "taken@corp.io" {
        return HttpResponse::BadRequest().json(json!({ "detail": "Email already registered" }));
    }
    HttpResponse::Ok().json(json!({
        "id": 3,
        "full_name": body["full_name"],
        "email": body["email"],
        "department": body["department"]
    }))
}

async fn delete_employee(path: web::Path<u64>) -> HttpResponse {
    match path.into_inner() {
        1 => HttpResponse::Ok().json(json!({
            "id": 1, "full_name": "A", "email": "a@corp.io", "department": "Ops"
        })),
        _ => HttpResponse::NotFound().json(json!({ "detail": "Employee not found" })),
    }
}

async fn start_record_service() -> (String, web::Data<Mutex<Seen>>) {
    let seen = web::Data::new(Mutex::new(Seen::default()));
    let state = seen.clone();

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .route("/employees/", web::get().to(list_employees))
            .route("/employees/", web::post().to(create_employee))
            .route("/employees/{id}", web::delete().to(delete_employee))
            .route("/attendance/", web::get().to(list_attendance))
            .route("/attendance/", web::post().to(mark_attendance))
            .route("/attendance/{employee_id}", web::get().to(employee_attendance))
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .unwrap();

    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());

    (format!("http://{}/", addr), seen)
}

fn client(base_url: &str) -> HttpRecordStore {
    HttpRecordStore::new(base_url, Duration::from_secs(5), 50).unwrap()
}

#[actix_web::test]
async fn lists_roster_and_history() {
    let (base_url, seen) = start_record_service().await;
    let store = client(&base_url);

    let employees = store.list_employees().await.unwrap();
    assert_eq!(employees.len(), 2);
    assert_eq!(employees[1].full_name, "B");

    let events = store.list_attendance(None).await.unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[1].status, AttendanceStatus::Absent);

    let bounded = store.list_attendance(Some(1)).await.unwrap();
    assert_eq!(bounded.len(), 1);

    let history = store.list_attendance_for(2).await.unwrap();
    assert_eq!(history[0].employee_id, 2);

    let seen = seen.lock().unwrap();
    assert_eq!(seen.employee_queries, vec!["skip=0&limit=50"]);
    assert_eq!(seen.attendance_queries, vec!["", "limit=1"]);
}

#[actix_web::test]
async fn upsert_sends_status_without_note() {
    let (base_url, seen) = start_record_service().await;
    let store = client(&base_url);

    let event = store
        .upsert_attendance(&NewAttendance {
            employee_id: 2,
            date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            status: AttendanceStatus::Absent,
        })
        .await
        .unwrap();

    assert_eq!(event.id, Some(77));
    assert_eq!(
        seen.lock().unwrap().upserts,
        vec![json!({ "employee_id": 2, "date": "2024-01-10", "status": "Absent" })]
    );
}

#[actix_web::test]
async fn error_statuses_map_to_store_errors() {
    let (base_url, _seen) = start_record_service().await;
    let store = client(&base_url);
    let date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();

    let missing = store
        .upsert_attendance(&NewAttendance {
            employee_id: 404,
            date,
            status: AttendanceStatus::Present,
        })
        .await;
    assert!(matches!(missing, Err(StoreError::NotFound(_))));

    let failed = store
        .upsert_attendance(&NewAttendance {
            employee_id: 500,
            date,
            status: AttendanceStatus::Present,
        })
        .await;
    assert!(matches!(failed, Err(StoreError::Status { status: 500, .. })));

    let duplicate = store
        .create_employee(&NewEmployee {
            full_name: "C".into(),
            email: "taken@corp.io".into(),
            department: "Ops".into(),
        })
        .await;
    match duplicate {
        Err(StoreError::Rejected(detail)) => assert_eq!(detail, "Email already registered"),
        other => panic!("expected rejection, got {:?}", other),
    }

    assert!(store.delete_employee(1).await.is_ok());
    assert!(matches!(store.delete_employee(9).await, Err(StoreError::NotFound(_))));
}

#[actix_web::test]
async fn unreachable_store_is_a_transport_error() {
    let store = client("http://127.0.0.1:9");
    assert!(matches!(store.list_employees().await, Err(StoreError::Transport(_))));
}
