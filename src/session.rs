use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::SessionConfig;
use crate::view::SearchView;

pub const SESSION_COOKIE: &str = "explorer_session";

pub type SharedView = Arc<Mutex<SearchView>>;

struct Entry {
    view: SharedView,
    last_seen: Instant,
}

pub struct SessionStore {
    views: RwLock<HashMap<Uuid, Entry>>,
    default_query: String,
    idle: Duration,
    max_sessions: usize,
}

impl SessionStore {
    pub fn new(default_query: &str, config: &SessionConfig) -> Self {
        Self {
            views: RwLock::new(HashMap::new()),
            default_query: default_query.to_string(),
            idle: Duration::from_secs(config.idle_secs),
            max_sessions: config.max_sessions.max(1),
        }
    }

    async fn touch(&self, id: &Uuid) -> Option<SharedView> {
        let mut views = self.views.write().await;
        let entry = views.get_mut(id)?;
        entry.last_seen = Instant::now();
        Some(entry.view.clone())
    }

    /// The caller's view, if its cookie names a live session. Never creates one.
    pub async fn existing(&self, jar: &CookieJar) -> Option<SharedView> {
        let id = jar
            .get(SESSION_COOKIE)
            .and_then(|c| Uuid::parse_str(c.value()).ok())?;
        self.touch(&id).await
    }

    pub async fn resolve(&self, jar: CookieJar) -> (CookieJar, SharedView) {
        if let Some(view) = self.existing(&jar).await {
            return (jar, view);
        }

        let id = Uuid::new_v4();
        let view = Arc::new(Mutex::new(SearchView::new(&self.default_query)));
        {
            let mut views = self.views.write().await;
            if views.len() >= self.max_sessions {
                let oldest = views
                    .iter()
                    .min_by_key(|(_, e)| e.last_seen)
                    .map(|(id, _)| *id);
                if let Some(oldest) = oldest {
                    views.remove(&oldest);
                    debug!(session = %oldest, "session limit reached, evicted oldest");
                }
            }
            views.insert(
                id,
                Entry {
                    view: view.clone(),
                    last_seen: Instant::now(),
                },
            );
        }
        debug!(session = %id, "created view session");

        let cookie = Cookie::build((SESSION_COOKIE, id.to_string()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax);

        (jar.add(cookie), view)
    }

    pub async fn sweep(&self) -> usize {
        self.sweep_older_than(Instant::now()).await
    }

    async fn sweep_older_than(&self, now: Instant) -> usize {
        let mut views = self.views.write().await;
        let before = views.len();
        views.retain(|_, e| now.saturating_duration_since(e.last_seen) <= self.idle);
        before - views.len()
    }

    pub fn start_background_sweep(self: Arc<Self>, interval_secs: u64) {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(interval_secs.max(1)));
            loop {
                interval.tick().await;
                let removed = self.sweep().await;
                if removed > 0 {
                    info!("Expired {} idle sessions", removed);
                }
            }
        });
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.views.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(max_sessions: usize) -> SessionStore {
        SessionStore::new(
            "batman",
            &SessionConfig {
                idle_secs: 60,
                max_sessions,
            },
        )
    }

    #[tokio::test]
    async fn test_resolve_creates_and_reuses() {
        let store = store(100);

        let (jar, view) = store.resolve(CookieJar::new()).await;
        let cookie = jar.get(SESSION_COOKIE).unwrap().clone();
        assert_eq!(view.lock().await.query(), "batman");
        assert_eq!(store.len().await, 1);

        view.lock().await.set_query("alien");

        let (_, again) = store.resolve(CookieJar::new().add(cookie)).await;
        assert_eq!(again.lock().await.query(), "alien");
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_unknown_cookie_gets_new_session() {
        let store = store(100);
        let stale = Cookie::new(SESSION_COOKIE, Uuid::new_v4().to_string());

        let (jar, _) = store.resolve(CookieJar::new().add(stale.clone())).await;
        assert_ne!(jar.get(SESSION_COOKIE).unwrap().value(), stale.value());

        let garbage = Cookie::new(SESSION_COOKIE, "not-a-uuid");
        store.resolve(CookieJar::new().add(garbage)).await;
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_existing_never_creates() {
        let store = store(100);
        assert!(store.existing(&CookieJar::new()).await.is_none());

        let stale = Cookie::new(SESSION_COOKIE, Uuid::new_v4().to_string());
        assert!(store.existing(&CookieJar::new().add(stale)).await.is_none());
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn test_sweep_drops_idle_sessions() {
        let store = store(100);
        let (jar, _) = store.resolve(CookieJar::new()).await;
        store.resolve(CookieJar::new()).await;

        assert_eq!(store.sweep().await, 0);
        assert_eq!(store.len().await, 2);

        let later = Instant::now() + Duration::from_secs(61);
        assert_eq!(store.sweep_older_than(later).await, 2);
        assert_eq!(store.len().await, 0);
        assert!(store.existing(&jar).await.is_none());
    }

    #[tokio::test]
    async fn test_session_cap_evicts_oldest() {
        let store = store(3);
        let (first, _) = store.resolve(CookieJar::new()).await;
        tokio::time::sleep(Duration::from_millis(5)).await;
        for _ in 0..10 {
            store.resolve(CookieJar::new()).await;
        }

        assert_eq!(store.len().await, 3);
        assert!(store.existing(&first).await.is_none());
    }
}
