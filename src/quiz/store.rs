use std::collections::HashMap;
use std::hash::Hash;

use tokio::sync::Mutex;

use crate::quiz::session::Session;

/// In-memory sessions keyed by user. Nothing expires; a session lives until
/// it is replaced or the process exits.
#[derive(Debug)]
pub struct SessionStore<K> {
    sessions: Mutex<HashMap<K, Session>>,
}

impl<K: Eq + Hash> SessionStore<K> {
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
        }
    }

    pub async fn get(&self, key: &K) -> Option<Session> {
        self.sessions.lock().await.get(key).cloned()
    }

    /// Stores `session`, dropping whatever the user had before.
    pub async fn put(&self, key: K, session: Session) {
        self.sessions.lock().await.insert(key, session);
    }

    /// Runs `f` on the user's session while holding the lock.
    /// Returns `None` when the user has no session.
    pub async fn update<F, T>(&self, key: &K, f: F) -> Option<T>
    where
        F: FnOnce(&mut Session) -> T,
    {
        let mut sessions = self.sessions.lock().await;
        sessions.get_mut(key).map(f)
    }

    #[cfg(test)]
    pub(crate) async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }
}

impl<K: Eq + Hash> Default for SessionStore<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::tests::sample_bank;

    #[tokio::test]
    async fn get_returns_none_for_unknown_user() {
        let store: SessionStore<u64> = SessionStore::new();
        assert!(store.get(&1).await.is_none());
        assert_eq!(store.update(&1, |s| s.score()).await, None);
    }

    #[tokio::test]
    async fn put_replaces_the_previous_session() {
        let store = SessionStore::new();
        let mut old = Session::new(sample_bank(3));
        old.submit_answer(old.current_question().unwrap().correct_idx());
        store.put(1u64, old).await;

        store.put(1u64, Session::new(sample_bank(3))).await;
        let current = store.get(&1).await.unwrap();
        assert_eq!(current.score(), 0);
        assert_eq!(current.current_index(), 0);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn users_do_not_share_sessions() {
        let store = SessionStore::new();
        store.put(1u64, Session::new(sample_bank(2))).await;
        store.put(2u64, Session::new(sample_bank(2))).await;

        store.update(&1, |s| s.submit_answer(0)).await;

        assert_eq!(store.get(&1).await.unwrap().current_index(), 1);
        assert_eq!(store.get(&2).await.unwrap().current_index(), 0);
    }
}
