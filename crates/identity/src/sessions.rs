//! Opaque bearer-token sessions with expiry.

use adpilot_core::{AdpilotError, AdpilotResult};
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use rand::Rng;
use uuid::Uuid;

/// All issued tokens carry this prefix so stray strings fail fast.
const TOKEN_PREFIX: &str = "ap_";

struct SessionRecord {
    user_id: Uuid,
    expires_at: DateTime<Utc>,
}

/// Issues and verifies opaque bearer tokens. Tokens are random, unforgeable
/// handles into this table; nothing about the user is encoded in them.
pub struct SessionBroker {
    sessions: DashMap<String, SessionRecord>,
    ttl: Duration,
}

impl SessionBroker {
    pub fn new(ttl_minutes: i64) -> Self {
        Self {
            sessions: DashMap::new(),
            ttl: Duration::minutes(ttl_minutes),
        }
    }

    /// Issue a token for a user. Returns the token and its lifetime in
    /// seconds.
    pub fn issue(&self, user_id: Uuid) -> (String, u64) {
        let token = generate_token();
        let expires_at = Utc::now() + self.ttl;
        self.sessions.insert(
            token.clone(),
            SessionRecord {
                user_id,
                expires_at,
            },
        );
        (token, self.ttl.num_seconds().max(0) as u64)
    }

    /// Resolve a token to its user id. Unknown, malformed, and expired tokens
    /// all produce the same `Unauthenticated` outcome.
    pub fn verify(&self, token: &str) -> AdpilotResult<Uuid> {
        if !token.starts_with(TOKEN_PREFIX) {
            return Err(AdpilotError::Unauthenticated);
        }
        let record = self
            .sessions
            .get(token)
            .ok_or(AdpilotError::Unauthenticated)?;
        if record.expires_at < Utc::now() {
            drop(record);
            self.sessions.remove(token);
            return Err(AdpilotError::Unauthenticated);
        }
        Ok(record.user_id)
    }

    pub fn revoke(&self, token: &str) -> bool {
        self.sessions.remove(token).is_some()
    }

    /// Drop expired sessions. Call periodically from a background task.
    pub fn evict_expired(&self) -> usize {
        let before = self.sessions.len();
        let now = Utc::now();
        self.sessions.retain(|_, record| record.expires_at >= now);
        before - self.sessions.len()
    }
}

fn generate_token() -> String {
    let mut rng = rand::thread_rng();
    let bytes: Vec<u8> = (0..32).map(|_| rng.gen()).collect();
    format!("{}{}", TOKEN_PREFIX, hex::encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_verifies_to_its_user() {
        let broker = SessionBroker::new(30);
        let user_id = Uuid::new_v4();
        let (token, expires_in) = broker.issue(user_id);
        assert!(token.starts_with(TOKEN_PREFIX));
        assert_eq!(expires_in, 30 * 60);
        assert_eq!(broker.verify(&token).expect("verify"), user_id);
    }

    #[test]
    fn foreign_and_malformed_tokens_are_rejected() {
        let broker = SessionBroker::new(30);
        assert!(broker.verify("Bearer nonsense").is_err());
        assert!(broker.verify("ap_0000000000000000").is_err());
    }

    #[test]
    fn expired_tokens_are_rejected_and_evicted() {
        let broker = SessionBroker::new(-1);
        let (token, _) = broker.issue(Uuid::new_v4());
        assert!(broker.verify(&token).is_err());
        // Second lookup misses entirely: the record was dropped on first use.
        assert!(broker.sessions.get(&token).is_none());
    }

    #[test]
    fn evict_expired_removes_only_stale_sessions() {
        let broker = SessionBroker::new(30);
        let (live, _) = broker.issue(Uuid::new_v4());
        broker.sessions.insert(
            "ap_stale".to_string(),
            SessionRecord {
                user_id: Uuid::new_v4(),
                expires_at: Utc::now() - Duration::minutes(5),
            },
        );
        assert_eq!(broker.evict_expired(), 1);
        assert!(broker.verify(&live).is_ok());
    }
}
