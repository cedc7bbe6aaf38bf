use actix_web::{HttpResponse, Responder, web};
use serde::Serialize;
use serde_json::json;
use tracing::{error, info};
use utoipa::ToSchema;

use crate::{
    error::ApiError,
    model::{AttendanceEvent, Employee, NewEmployee},
    store::{RecordStore, RosterStore},
};

#[derive(Serialize, ToSchema)]
pub struct EmployeeListResponse {
    #[schema(
    example = json!([{
        "id": 1,
        "full_name": "John Doe",
        "email": "john.doe@company.com",
        "department": "Engineering"
    }])
)]
    pub data: Vec<Employee>,
    #[schema(example = 1)]
    pub total: usize,
    /// Set when the roster could not be fetched
    #[schema(example = json!([]))]
    pub warnings: Vec<String>,
}

/// List Employees
#[utoipa::path(
    get,
    path = "/api/employees",
    responses(
        (status = 200, description = "Current roster, empty with a warning when the record store is down", body = EmployeeListResponse)
    ),
    tag = "Employee"
)]
pub async fn list_employees(store: web::Data<dyn RecordStore>) -> impl Responder {
    let mut roster = RosterStore::default();
    roster.refresh(store.get_ref()).await;

    let data = roster.employees().to_vec();
    HttpResponse::Ok().json(EmployeeListResponse {
        total: data.len(),
        data,
        warnings: roster.last_error().map(str::to_string).into_iter().collect(),
    })
}

/// Create Employee
#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = NewEmployee,
    responses(
        (status = 201, description = "Employee created successfully", body = Employee),
        (status = 400, description = "Invalid payload", body = Object, example = json!({
            "message": "'john' is not a valid email address"
        })),
        (status = 409, description = "Email already registered", body = Object, example = json!({
            "message": "Email already registered"
        })),
        (status = 502, description = "Record store unavailable")
    ),
    tag = "Employee"
)]
pub async fn create_employee(
    store: web::Data<dyn RecordStore>,
    payload: web::Json<NewEmployee>,
) -> Result<HttpResponse, ApiError> {
    let employee = payload.into_inner().normalized().map_err(ApiError::BadRequest)?;

    let created = store.create_employee(&employee).await.map_err(|e| {
        error!(error = %e, email = %employee.email, "Failed to create employee");
        ApiError::from(e)
    })?;

    info!(employee_id = created.id, "Employee created");
    Ok(HttpResponse::Created().json(created))
}

/// Delete Employee
#[utoipa::path(
    delete,
    path = "/api/employees/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Successfully deleted", body = Object, example = json!({
            "message": "Successfully deleted"
        })),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee not found"
        })),
        (status = 502, description = "Record store unavailable")
    ),
    tag = "Employee"
)]
pub async fn delete_employee(
    store: web::Data<dyn RecordStore>,
    path: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    let employee_id = path.into_inner();

    store.delete_employee(employee_id).await?;

    info!(employee_id, "Employee deleted");
    Ok(HttpResponse::Ok().json(json!({
        "message": "Successfully deleted"
    })))
}

/// Attendance history of one employee, newest first
#[utoipa::path(
    get,
    path = "/api/employees/{employee_id}/attendance",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Attendance records of the employee", body = [AttendanceEvent]),
        (status = 502, description = "Record store unavailable")
    ),
    tag = "Employee"
)]
pub async fn employee_attendance(
    store: web::Data<dyn RecordStore>,
    path: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    let employee_id = path.into_inner();

    let mut records = store.list_attendance_for(employee_id).await?;
    records.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));

    Ok(HttpResponse::Ok().json(records))
}
