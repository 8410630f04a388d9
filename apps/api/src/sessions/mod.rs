//! In-memory session container. Each session owns one `Wizard`; nothing is
//! persisted and a session ends on delete or after sitting idle.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};
use uuid::Uuid;

use crate::wizard::controller::Wizard;

/// A wizard plus the bookkeeping needed for idle expiry.
#[derive(Debug)]
pub struct Session {
    pub wizard: Wizard,
    pub created_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
}

impl Session {
    fn new() -> Self {
        let now = Utc::now();
        Self {
            wizard: Wizard::new(),
            created_at: now,
            last_active: now,
        }
    }

    pub fn touch(&mut self) {
        self.last_active = Utc::now();
    }
}

pub type SessionHandle = Arc<Mutex<Session>>;

#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, SessionHandle>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self) -> (Uuid, SessionHandle) {
        let id = Uuid::new_v4();
        let handle = Arc::new(Mutex::new(Session::new()));
        self.inner.write().await.insert(id, handle.clone());
        info!("Session {id} started");
        (id, handle)
    }

    pub async fn get(&self, id: Uuid) -> Option<SessionHandle> {
        self.inner.read().await.get(&id).cloned()
    }

    /// Ends a session. A generation still in flight for it finishes against
    /// the detached handle and its result is dropped with it.
    pub async fn remove(&self, id: Uuid) -> bool {
        let removed = self.inner.write().await.remove(&id).is_some();
        if removed {
            info!("Session {id} ended");
        }
        removed
    }

    pub async fn contains(&self, id: Uuid) -> bool {
        self.inner.read().await.contains_key(&id)
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Drops sessions idle for longer than `ttl`. Sessions with a generation
    /// in flight are kept. Returns how many were dropped.
    pub async fn prune_idle(&self, ttl: Duration) -> usize {
        let Ok(ttl) = chrono::Duration::from_std(ttl) else {
            return 0;
        };
        // A ttl reaching before the earliest representable time expires nothing.
        let Some(cutoff) = Utc::now().checked_sub_signed(ttl) else {
            return 0;
        };

        let mut sessions = self.inner.write().await;
        let mut expired = Vec::new();
        for (id, handle) in sessions.iter() {
            // A locked session is in use, so it is not idle.
            let Ok(session) = handle.try_lock() else {
                continue;
            };
            if session.last_active < cutoff && !session.wizard.is_generating() {
                expired.push(*id);
            }
        }
        for id in &expired {
            sessions.remove(id);
            debug!("Session {id} expired");
        }
        expired.len()
    }
}

/// Periodically prunes idle sessions until the runtime shuts down.
pub fn spawn_idle_sweeper(store: SessionStore, ttl: Duration) -> tokio::task::JoinHandle<()> {
    let period = (ttl / 4).max(Duration::from_secs(1));
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            let dropped = store.prune_idle(ttl).await;
            if dropped > 0 {
                info!("Expired {dropped} idle sessions, {} still active", store.len().await);
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_get_remove() {
        let store = SessionStore::new();
        let (id, _) = store.create().await;
        assert!(store.get(id).await.is_some());
        assert_eq!(store.len().await, 1);
        assert!(store.remove(id).await);
        assert!(!store.remove(id).await);
        assert!(store.get(id).await.is_none());
    }

    #[tokio::test]
    async fn test_sessions_are_independent() {
        let store = SessionStore::new();
        let (a, handle_a) = store.create().await;
        let (b, _) = store.create().await;
        assert_ne!(a, b);
        handle_a.lock().await.wizard.set_about_me("only in a".to_string());
        let handle_b = store.get(b).await.unwrap();
        assert!(handle_b.lock().await.wizard.cv().about_me.is_empty());
    }

    #[tokio::test]
    async fn test_prune_idle_drops_stale_sessions() {
        let store = SessionStore::new();
        let (stale, handle) = store.create().await;
        let (fresh, _) = store.create().await;
        handle.lock().await.last_active = Utc::now() - chrono::Duration::hours(2);

        let dropped = store.prune_idle(Duration::from_secs(3600)).await;

        assert_eq!(dropped, 1);
        assert!(!store.contains(stale).await);
        assert!(store.contains(fresh).await);
    }

    #[tokio::test]
    async fn test_prune_with_huge_ttl_keeps_everything() {
        let store = SessionStore::new();
        let (id, handle) = store.create().await;
        handle.lock().await.last_active = Utc::now() - chrono::Duration::days(365);

        let dropped = store
            .prune_idle(Duration::from_secs(1_000_000_000_000_000))
            .await;

        assert_eq!(dropped, 0);
        assert!(store.contains(id).await);
    }

    #[tokio::test]
    async fn test_prune_keeps_generating_sessions() {
        let store = SessionStore::new();
        let (id, handle) = store.create().await;
        {
            let mut session = handle.lock().await;
            session.last_active = Utc::now() - chrono::Duration::hours(2);
            session.wizard.begin_submit();
        }
        assert_eq!(store.prune_idle(Duration::from_secs(60)).await, 0);
        assert!(store.contains(id).await);
    }
}
