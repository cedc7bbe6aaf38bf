use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::attendance::AttendanceSession;

pub type SharedSession = Arc<Mutex<AttendanceSession>>;

/// Live attendance views keyed by session id.
///
/// A session is dropped when its view closes it, or once it has been idle for
/// longer than the configured TTL.
#[derive(Clone)]
pub struct SessionRegistry {
    sessions: Cache<Uuid, SharedSession>,
}

impl SessionRegistry {
    pub fn new(max_sessions: u64, idle_ttl: Duration) -> Self {
        let sessions = Cache::builder()
            .max_capacity(max_sessions)
            .time_to_idle(idle_ttl)
            .eviction_listener(|id, _session, cause| {
                if cause.was_evicted() {
                    log::info!("Attendance session {} dropped ({:?})", id, cause);
                }
            })
            .build();

        Self { sessions }
    }

    pub async fn insert(&self, session: AttendanceSession) -> Uuid {
        let id = Uuid::new_v4();
        self.sessions
            .insert(id, Arc::new(Mutex::new(session)))
            .await;
        id
    }

    pub async fn get(&self, id: &Uuid) -> Option<SharedSession> {
        self.sessions.get(id).await
    }

    /// true => the session existed
    pub async fn remove(&self, id: &Uuid) -> bool {
        self.sessions.remove(id).await.is_some()
    }
}
