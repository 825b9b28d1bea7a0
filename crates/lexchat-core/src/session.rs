use std::{collections::HashMap, sync::Arc};

use chrono::{Duration, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::{
    dialogue::{DraftingSession, Turn},
    types::PartyFormat,
};

pub const DEFAULT_SESSION_MAX_AGE_HOURS: i64 = 24;

/// In-memory drafting sessions keyed by session id.
///
/// Sessions share nothing; the lock only serializes access so that one
/// message is fully handled before the next one for the same session.
/// Sessions older than `max_age` are dropped by `evict_expired`, which
/// also runs on every `create`.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<String, DraftingSession>>>,
    party_format: PartyFormat,
    max_age: Duration,
}

impl SessionStore {
    pub fn new(party_format: PartyFormat) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            party_format,
            max_age: Duration::hours(DEFAULT_SESSION_MAX_AGE_HOURS),
        }
    }

    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = max_age;
        self
    }

    /// Start a new session in the intro stage. Returns a snapshot of it.
    pub async fn create(&self) -> DraftingSession {
        let mut sessions = self.sessions.lock().await;
        self.evict_locked(&mut sessions);
        let id = loop {
            let candidate = new_session_id();
            if !sessions.contains_key(&candidate) {
                break candidate;
            }
        };
        let session = DraftingSession::new(id.clone(), self.party_format);
        sessions.insert(id.clone(), session.clone());
        info!(session_id = %id, "session created");
        session
    }

    pub async fn get(&self, id: &str) -> Option<DraftingSession> {
        self.sessions.lock().await.get(id).cloned()
    }

    /// Feed a user message to a session. `None` if the session is unknown.
    pub async fn handle_message(&self, id: &str, text: &str) -> Option<Turn> {
        let mut sessions = self.sessions.lock().await;
        let session = sessions.get_mut(id)?;
        let turn = session.handle_message(text);
        debug!(session_id = %id, stage = %turn.stage, "message handled");
        Some(turn)
    }

    /// The rendered draft and its download file name, once produced.
    pub async fn draft(&self, id: &str) -> Option<(String, String)> {
        let sessions = self.sessions.lock().await;
        let session = sessions.get(id)?;
        let file_name = session.draft_file_name()?;
        let draft = session.final_draft.clone()?;
        Some((file_name, draft))
    }

    /// Discard a session. Returns whether it existed.
    pub async fn remove(&self, id: &str) -> bool {
        let removed = self.sessions.lock().await.remove(id).is_some();
        if removed {
            info!(session_id = %id, "session discarded");
        }
        removed
    }

    /// Drop sessions created more than `max_age` ago. Returns how many went.
    pub async fn evict_expired(&self) -> usize {
        let mut sessions = self.sessions.lock().await;
        self.evict_locked(&mut sessions)
    }

    fn evict_locked(&self, sessions: &mut HashMap<String, DraftingSession>) -> usize {
        let cutoff = Utc::now() - self.max_age;
        let before = sessions.len();
        sessions.retain(|_, s| s.created_at > cutoff);
        let evicted = before - sessions.len();
        if evicted > 0 {
            info!(evicted, remaining = sessions.len(), "expired sessions evicted");
        }
        evicted
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn new_session_id() -> String {
    format!("{:016x}", rand::random::<u64>())
}
