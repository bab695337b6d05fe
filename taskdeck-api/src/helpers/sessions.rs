use chrono::{DateTime, Duration, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

const TOKEN_LENGTH: usize = 48;

#[derive(Clone)]
pub struct Session {
    pub member_id: i64,
    pub expires_at: DateTime<Utc>,
}

/// Bearer tokens of signed in members, kept in memory only
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<String, Session>>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl_hours: i64) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            ttl: Duration::hours(ttl_hours),
        }
    }

    /// Start a session and return its token
    pub async fn create(&self, member_id: i64) -> (String, Session) {
        let token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(TOKEN_LENGTH)
            .map(char::from)
            .collect();
        let session = Session {
            member_id,
            expires_at: Utc::now() + self.ttl,
        };

        let mut sessions = self.sessions.lock().await;
        sessions.insert(token.clone(), session.clone());
        (token, session)
    }

    /// Member behind a token, dropping the session if it has expired
    pub async fn member_for(&self, token: &str) -> Option<i64> {
        let mut sessions = self.sessions.lock().await;
        match sessions.get(token) {
            Some(session) if Utc::now() < session.expires_at => Some(session.member_id),
            Some(_) => {
                sessions.remove(token);
                None
            }
            None => None,
        }
    }

    pub async fn revoke(&self, token: &str) -> bool {
        let mut sessions = self.sessions.lock().await;
        sessions.remove(token).is_some()
    }
}
