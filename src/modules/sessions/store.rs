use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use uuid::Uuid;

struct Entry<T> {
    state: Arc<Mutex<T>>,
    /// Milliseconds since the store epoch
    last_seen: AtomicU64,
}

/// Resolved session for one request
pub struct SessionHandle<T> {
    pub id: Uuid,
    /// The id was minted for this request and must be sent back as a cookie
    pub is_new: bool,
    pub state: Arc<Mutex<T>>,
}

impl<T> Clone for SessionHandle<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            is_new: self.is_new,
            state: Arc::clone(&self.state),
        }
    }
}

/// In-memory per-browser state keyed by an opaque UUIDv7 id.
///
/// Entries idle longer than `idle_ttl` are dropped by [`SessionStore::prune`].
pub struct SessionStore<T> {
    sessions: RwLock<HashMap<Uuid, Entry<T>>>,
    idle_ttl: Duration,
    epoch: Instant,
}

impl<T: Default + Send + 'static> SessionStore<T> {
    pub fn new(idle_ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            idle_ttl,
            epoch: Instant::now(),
        }
    }

    fn now_ms(&self) -> u64 {
        self.epoch.elapsed().as_millis() as u64
    }

    /// Look up the session for `id`, creating a fresh one when absent or expired
    pub async fn resolve(&self, id: Option<Uuid>) -> SessionHandle<T> {
        let now = self.now_ms();

        if let Some(id) = id {
            let sessions = self.sessions.read().await;
            if let Some(entry) = sessions.get(&id) {
                entry.last_seen.store(now, Ordering::Relaxed);
                return SessionHandle {
                    id,
                    is_new: false,
                    state: Arc::clone(&entry.state),
                };
            }
        }

        let id = Uuid::now_v7();
        let state = Arc::new(Mutex::new(T::default()));
        self.sessions.write().await.insert(
            id,
            Entry {
                state: Arc::clone(&state),
                last_seen: AtomicU64::new(now),
            },
        );
        tracing::debug!("Created view session {}", id);

        SessionHandle {
            id,
            is_new: true,
            state,
        }
    }

    /// Drop idle sessions that no request is holding; returns how many were removed
    pub async fn prune(&self) -> usize {
        let now = self.now_ms();
        let ttl = self.idle_ttl.as_millis() as u64;

        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| {
            let idle = now.saturating_sub(entry.last_seen.load(Ordering::Relaxed));
            idle < ttl || Arc::strong_count(&entry.state) > 1
        });
        before - sessions.len()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Prune on a fixed interval for the lifetime of the process
    pub fn spawn_pruner(self: Arc<Self>, interval: Duration) -> JoinHandle<()>
    where
        T: Sync,
    {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let removed = self.prune().await;
                if removed > 0 {
                    tracing::info!("Pruned {} idle view sessions", removed);
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_resolve_reuses_known_id() {
        let store: SessionStore<Vec<u8>> = SessionStore::new(Duration::from_secs(60));
        let first = store.resolve(None).await;
        assert!(first.is_new);
        first.state.lock().await.push(7);

        let second = store.resolve(Some(first.id)).await;
        assert!(!second.is_new);
        assert_eq!(*second.state.lock().await, vec![7]);
    }

    #[tokio::test]
    async fn test_unknown_id_gets_fresh_session() {
        let store: SessionStore<Vec<u8>> = SessionStore::new(Duration::from_secs(60));
        let stale = Uuid::now_v7();
        let handle = store.resolve(Some(stale)).await;
        assert!(handle.is_new);
        assert_ne!(handle.id, stale);
    }

    #[tokio::test]
    async fn test_prune_keeps_sessions_in_use() {
        let store: SessionStore<Vec<u8>> = SessionStore::new(Duration::ZERO);
        let held = store.resolve(None).await;
        {
            let dropped = store.resolve(None).await;
            assert!(dropped.is_new);
        }

        assert_eq!(store.prune().await, 1);
        assert_eq!(store.len().await, 1);
        drop(held);
        assert_eq!(store.prune().await, 1);
    }
}
