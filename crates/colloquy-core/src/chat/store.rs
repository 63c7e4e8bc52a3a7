//! In-memory session store.
//!
//! `SessionStore` maps a [`SessionId`] to that session's ordered history. The
//! `DashMap` only ever hands out a cloned `Arc` to the entry; the history
//! itself sits behind its own mutex. A map guard is therefore never held
//! while a history is locked, and work on one session never waits on another.
//!
//! Sessions are never evicted: an entry lives as long as the store.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::debug;

use colloquy_types::chat::SessionId;
use colloquy_types::error::StoreError;
use colloquy_types::message::{Message, Role};

type History = Arc<Mutex<Vec<Message>>>;

/// Concurrent map of session id to append-only message history.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: DashMap<SessionId, History>,
}

impl SessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    /// Create a session and return its id.
    ///
    /// The history starts empty, or with a single user message when `seed`
    /// is given and not blank.
    pub fn create(&self, seed: Option<&str>) -> SessionId {
        let history: Vec<Message> = seed
            .filter(|s| !s.trim().is_empty())
            .map(|s| vec![Message::user(s)])
            .unwrap_or_default();
        let seeded = !history.is_empty();
        let history: History = Arc::new(Mutex::new(history));

        loop {
            let id = SessionId::new();
            if let Entry::Vacant(slot) = self.sessions.entry(id) {
                slot.insert(Arc::clone(&history));
                debug!(session_id = %id, seeded, "Chat session created");
                return id;
            }
        }
    }

    /// Append a message to the end of a session's history.
    pub fn append(&self, id: SessionId, message: Message) -> Result<(), StoreError> {
        let entry = self.entry(id)?;
        lock(&entry).push(message);
        Ok(())
    }

    /// Ordered snapshot of a session's history.
    pub fn history(&self, id: SessionId) -> Result<Vec<Message>, StoreError> {
        let entry = self.entry(id)?;
        let snapshot = lock(&entry).clone();
        Ok(snapshot)
    }

    /// The most recently appended assistant message, if there is one.
    pub fn last_assistant_message(&self, id: SessionId) -> Result<Option<Message>, StoreError> {
        let entry = self.entry(id)?;
        let last = lock(&entry)
            .iter()
            .rev()
            .find(|m| m.role() == Role::Assistant)
            .cloned();
        Ok(last)
    }

    pub fn contains(&self, id: SessionId) -> bool {
        self.sessions.contains_key(&id)
    }

    /// Number of sessions in the store.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Clone the entry handle out of the map so the shard guard drops here.
    fn entry(&self, id: SessionId) -> Result<History, StoreError> {
        self.sessions
            .get(&id)
            .map(|r| Arc::clone(r.value()))
            .ok_or(StoreError::NotFound(id))
    }
}

// A panic while holding the lock cannot leave a half-written Vec push behind,
// so a poisoned history is still consistent.
fn lock(history: &Mutex<Vec<Message>>) -> MutexGuard<'_, Vec<Message>> {
    history.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn create_without_seed_is_empty() {
        let store = SessionStore::new();
        let id = store.create(None);
        assert!(store.contains(id));
        assert!(store.history(id).unwrap().is_empty());
    }

    #[test]
    fn create_with_seed_adds_user_message() {
        let store = SessionStore::new();
        let id = store.create(Some("You are terse."));
        let history = store.history(id).unwrap();
        assert_eq!(history, vec![Message::user("You are terse.")]);
    }

    #[test]
    fn create_with_blank_seed_is_empty() {
        let store = SessionStore::new();
        let id = store.create(Some("   \n"));
        assert!(store.history(id).unwrap().is_empty());
    }

    #[test]
    fn create_returns_distinct_ids() {
        let store = SessionStore::new();
        let a = store.create(None);
        let b = store.create(None);
        assert_ne!(a, b);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn append_preserves_order() {
        let store = SessionStore::new();
        let id = store.create(None);
        store.append(id, Message::user("one")).unwrap();
        store.append(id, Message::assistant("two")).unwrap();
        store.append(id, Message::user("three")).unwrap();

        let contents: Vec<_> = store
            .history(id)
            .unwrap()
            .iter()
            .map(|m| m.content().to_string())
            .collect();
        assert_eq!(contents, vec!["one", "two", "three"]);
    }

    #[test]
    fn unknown_id_is_not_found() {
        let store = SessionStore::new();
        let id = SessionId::new();
        assert!(matches!(
            store.append(id, Message::user("x")),
            Err(StoreError::NotFound(found)) if found == id
        ));
        assert!(matches!(store.history(id), Err(StoreError::NotFound(_))));
        assert!(matches!(
            store.last_assistant_message(id),
            Err(StoreError::NotFound(_))
        ));
        assert!(!store.contains(id));
    }

    #[test]
    fn last_assistant_message_picks_most_recent() {
        let store = SessionStore::new();
        let id = store.create(Some("seed"));
        assert_eq!(store.last_assistant_message(id).unwrap(), None);

        store.append(id, Message::assistant("first")).unwrap();
        store.append(id, Message::assistant("second")).unwrap();
        store.append(id, Message::user("question")).unwrap();

        let last = store.last_assistant_message(id).unwrap().unwrap();
        assert_eq!(last.content(), "second");
    }

    #[test]
    fn history_is_a_snapshot() {
        let store = SessionStore::new();
        let id = store.create(None);
        store.append(id, Message::user("a")).unwrap();
        let snapshot = store.history(id).unwrap();
        store.append(id, Message::user("b")).unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(store.history(id).unwrap().len(), 2);
    }

    #[test]
    fn concurrent_appends_are_not_lost() {
        let store = Arc::new(SessionStore::new());
        let id = store.create(None);

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for i in 0..100 {
                        store.append(id, Message::user(format!("{t}:{i}"))).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let history = store.history(id).unwrap();
        assert_eq!(history.len(), 800);

        // Each writer's own messages keep their relative order.
        for t in 0..8 {
            let prefix = format!("{t}:");
            let seq: Vec<usize> = history
                .iter()
                .filter_map(|m| m.content().strip_prefix(&prefix))
                .map(|n| n.parse().unwrap())
                .collect();
            assert_eq!(seq, (0..100).collect::<Vec<_>>());
        }
    }

    #[test]
    fn locked_session_does_not_block_another() {
        let store = Arc::new(SessionStore::new());
        let busy = store.create(None);
        let free = store.create(None);

        let busy_entry = store.entry(busy).unwrap();
        let _guard = lock(&busy_entry);

        let (tx, rx) = mpsc::channel();
        let worker_store = Arc::clone(&store);
        thread::spawn(move || {
            worker_store.append(free, Message::user("hi")).unwrap();
            let len = worker_store.history(free).unwrap().len();
            tx.send(len).unwrap();
        });

        let len = rx
            .recv_timeout(Duration::from_secs(5))
            .expect("append on an unrelated session was blocked");
        assert_eq!(len, 1);
    }
}
