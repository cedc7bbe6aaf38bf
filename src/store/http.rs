use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Deserialize, de::DeserializeOwned};
use tracing::{debug, error};

use crate::model::{AttendanceEvent, Employee, NewAttendance, NewEmployee};
use crate::store::{RecordStore, StoreError, StoreResult};

/// Error body of the record store, `{"detail": "..."}`.
#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

#[derive(Clone)]
pub struct HttpRecordStore {
    client: Client,
    base_url: String,
    employee_limit: u32,
}

impl HttpRecordStore {
    pub fn new(base_url: &str, timeout: Duration, employee_limit: u32) -> StoreResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            employee_limit,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, request: RequestBuilder, what: &str) -> StoreResult<reqwest::Response> {
        let response = request.send().await.map_err(|e| {
            error!(error = %e, what, "Record store unreachable");
            StoreError::Transport(e)
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let detail = match response.json::<ErrorBody>().await {
            Ok(ErrorBody {
                detail: Some(detail),
            }) => detail,
            _ => status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string(),
        };

        debug!(status = status.as_u16(), %detail, what, "Record store rejected request");

        Err(match status {
            StatusCode::NOT_FOUND => StoreError::NotFound(what.to_string()),
            StatusCode::BAD_REQUEST | StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => {
                StoreError::Rejected(detail)
            }
            _ => StoreError::Status {
                status: status.as_u16(),
                detail,
            },
        })
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder, what: &str) -> StoreResult<T> {
        let response = self.send(request, what).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl RecordStore for HttpRecordStore {
    async fn list_employees(&self) -> StoreResult<Vec<Employee>> {
        let request = self
            .client
            .get(self.url("/employees/"))
            .query(&[("skip", 0), ("limit", self.employee_limit)]);
        self.fetch(request, "employees").await
    }

    async fn list_attendance(&self, limit: Option<u32>) -> StoreResult<Vec<AttendanceEvent>> {
        let mut request = self.client.get(self.url("/attendance/"));
        if let Some(limit) = limit {
            request = request.query(&[("limit", limit)]);
        }
        self.fetch(request, "attendance").await
    }

    async fn list_attendance_for(&self, employee_id: u64) -> StoreResult<Vec<AttendanceEvent>> {
        let request = self
            .client
            .get(self.url(&format!("/attendance/{}", employee_id)));
        self.fetch(request, "employee attendance").await
    }

    async fn upsert_attendance(&self, attendance: &NewAttendance) -> StoreResult<AttendanceEvent> {
        let request = self.client.post(self.url("/attendance/")).json(attendance);
        self.fetch(request, "employee").await
    }

    async fn create_employee(&self, employee: &NewEmployee) -> StoreResult<Employee> {
        let request = self.client.post(self.url("/employees/")).json(employee);
        self.fetch(request, "employee").await
    }

    async fn delete_employee(&self, employee_id: u64) -> StoreResult<()> {
        let request = self
            .client
            .delete(self.url(&format!("/employees/{}", employee_id)));
        self.send(request, "employee").await?;
        Ok(())
    }
}
