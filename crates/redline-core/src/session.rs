use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use rand::{distributions::Alphanumeric, Rng};
use tokio::sync::Mutex;
use tracing::debug;

use crate::types::{ChatRole, ChatTurn};

/// A short-lived chat or negotiation session.
///
/// Created on the first message of a conversation, destroyed on
/// explicit reset or by the expiry sweep. Never persisted: sessions
/// die with the process by design.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub turns: Vec<ChatTurn>,
}

/// In-memory session registry guarded by a single async mutex.
pub struct SessionStore {
    sessions: Mutex<HashMap<String, Session>>,
    max_age_hours: i64,
}

impl SessionStore {
    pub fn new(max_age_hours: i64) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            max_age_hours,
        }
    }

    /// Mint a fresh id in the `session_<millis>_<alnum9>` format the
    /// front-end already stores and displays.
    fn mint_id() -> String {
        let suffix: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(9)
            .map(|b| char::from(b.to_ascii_lowercase()))
            .collect();
        format!("session_{}_{}", Utc::now().timestamp_millis(), suffix)
    }

    /// Resolve the session for a request: reuse `requested` if it is
    /// live, re-adopt it if the caller supplied one we no longer hold
    /// (a server restart must not orphan an ongoing conversation), or
    /// mint a new session on the first message.
    pub async fn ensure(&self, requested: Option<&str>) -> String {
        let mut sessions = self.sessions.lock().await;
        if let Some(id) = requested {
            if sessions.contains_key(id) {
                return id.to_string();
            }
        }
        let id = requested
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .unwrap_or_else(Self::mint_id);
        debug!("session {id} created");
        sessions.insert(
            id.clone(),
            Session {
                id: id.clone(),
                created_at: Utc::now(),
                turns: Vec::new(),
            },
        );
        id
    }

    /// Append a turn to a live session. Unknown ids are ignored: the
    /// session may have been reset while a backend call was in flight.
    pub async fn append(&self, id: &str, role: ChatRole, content: &str) {
        let mut sessions = self.sessions.lock().await;
        if let Some(session) = sessions.get_mut(id) {
            let turn_id = format!("{}-{}", id, session.turns.len());
            session.turns.push(ChatTurn {
                id: turn_id,
                role,
                content: content.to_string(),
                timestamp: Utc::now(),
            });
        }
    }

    /// Snapshot of a session's turns, oldest first.
    pub async fn history(&self, id: &str) -> Option<Vec<ChatTurn>> {
        self.sessions.lock().await.get(id).map(|s| s.turns.clone())
    }

    /// Destroy a session. Returns false if it did not exist.
    pub async fn reset(&self, id: &str) -> bool {
        let removed = self.sessions.lock().await.remove(id).is_some();
        if removed {
            debug!("session {id} reset");
        }
        removed
    }

    pub async fn active_count(&self) -> usize {
        self.sessions.lock().await.len()
    }

    /// Drop sessions older than the configured max age.
    /// Returns the number removed.
    pub async fn sweep_expired(&self) -> usize {
        let cutoff = Utc::now() - Duration::hours(self.max_age_hours);
        let mut sessions = self.sessions.lock().await;
        let before = sessions.len();
        sessions.retain(|_, s| s.created_at > cutoff);
        let removed = before - sessions.len();
        if removed > 0 {
            debug!("swept {removed} expired session(s)");
        }
        removed
    }
}
