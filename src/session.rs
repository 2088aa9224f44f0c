use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};
use uuid::Uuid;

use crate::browser::ArticleBrowser;

pub const SESSION_COOKIE: &str = "nugget_session";

struct Session {
    browser: Arc<Mutex<ArticleBrowser>>,
    last_seen: Instant,
}

/// One Article Browser per visitor, keyed by the session cookie.
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, Session>>,
    ttl: Duration,
}

pub struct SessionHandle {
    pub id: Uuid,
    pub browser: Arc<Mutex<ArticleBrowser>>,
    /// True when the id was unknown and a new browser was created
    pub created: bool,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Look up a live session and refresh its last-seen time. Never creates
    /// one.
    pub async fn get(&self, id: Uuid) -> Option<Arc<Mutex<ArticleBrowser>>> {
        let mut sessions = self.sessions.write().await;
        self.touch(&mut sessions, id, Instant::now())
    }

    /// Look up `id` and refresh its last-seen time, or start a new session.
    pub async fn get_or_create(&self, id: Option<Uuid>) -> SessionHandle {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;

        if let Some(id) = id {
            if let Some(browser) = self.touch(&mut sessions, id, now) {
                return SessionHandle {
                    id,
                    browser,
                    created: false,
                };
            }
        }

        let id = Uuid::new_v4();
        let browser = Arc::new(Mutex::new(ArticleBrowser::new()));
        sessions.insert(
            id,
            Session {
                browser: browser.clone(),
                last_seen: now,
            },
        );
        debug!("Created session {}", id);

        SessionHandle {
            id,
            browser,
            created: true,
        }
    }

    fn touch(
        &self,
        sessions: &mut HashMap<Uuid, Session>,
        id: Uuid,
        now: Instant,
    ) -> Option<Arc<Mutex<ArticleBrowser>>> {
        let session = sessions.get_mut(&id)?;
        if now.saturating_duration_since(session.last_seen) > self.ttl {
            sessions.remove(&id);
            return None;
        }
        session.last_seen = now;
        Some(session.browser.clone())
    }

    /// Drop sessions idle for longer than the TTL as of `now`.
    pub async fn sweep(&self, now: Instant) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| now.saturating_duration_since(s.last_seen) <= self.ttl);
        before - sessions.len()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

pub async fn start_session_sweeper(store: Arc<SessionStore>, interval: Duration) {
    loop {
        tokio::time::sleep(interval).await;
        let removed = store.sweep(Instant::now()).await;
        if removed > 0 {
            info!("Expired {} idle sessions", removed);
        }
    }
}
