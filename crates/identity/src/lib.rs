//! User directory, session tokens, and the credential verifier.
//!
//! Development: self-contained in-memory directory with salted digests and
//! opaque bearer tokens. Production: replace with a hosted identity provider
//! behind the same `IdentityService` surface.

#![warn(clippy::unwrap_used)]

pub mod directory;
pub mod sessions;

use adpilot_core::config::AuthConfig;
use adpilot_core::types::{Token, User};
use adpilot_core::{AdpilotError, AdpilotResult};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

pub use directory::UserDirectory;
pub use sessions::SessionBroker;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub role: Option<adpilot_core::types::UserRole>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Authentication facade handed to request handlers.
pub struct IdentityService {
    directory: UserDirectory,
    sessions: SessionBroker,
}

impl IdentityService {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            directory: UserDirectory::new(),
            sessions: SessionBroker::new(config.token_ttl_minutes),
        }
    }

    pub fn directory(&self) -> &UserDirectory {
        &self.directory
    }

    /// Register a new user. A directory failure during the existence check is
    /// a hard error, never treated as "user does not exist".
    pub fn register(&self, req: RegisterRequest) -> AdpilotResult<User> {
        if self.directory.find_by_email(&req.email)?.is_some() {
            return Err(AdpilotError::Validation(
                "User with this email already exists".to_string(),
            ));
        }
        self.directory.register(req)
    }

    /// Authenticate with email/password and issue a bearer token.
    pub fn login(&self, req: &LoginRequest) -> AdpilotResult<Token> {
        let user = self
            .directory
            .authenticate(&req.email, &req.password)
            .ok_or(AdpilotError::Unauthenticated)?;

        if !user.is_active {
            return Err(AdpilotError::Validation(
                "User account is not active".to_string(),
            ));
        }

        Ok(self.issue_token(user))
    }

    /// Issue a fresh token for an already-verified user (refresh flow).
    pub fn issue_token(&self, user: User) -> Token {
        let (access_token, expires_in) = self.sessions.issue(user.id);
        Token {
            access_token,
            token_type: "bearer".to_string(),
            expires_in,
            user,
        }
    }

    /// Resolve a bearer token to its user. Malformed, expired, and unknown
    /// tokens are indistinguishable to the caller; no provider detail leaks
    /// across this boundary.
    pub fn verify_token(&self, token: &str) -> AdpilotResult<User> {
        let user_id = self.sessions.verify(token)?;
        self.directory.get(user_id).ok_or(AdpilotError::Unauthenticated)
    }

    /// Revoke a bearer token. Idempotent.
    pub fn logout(&self, token: &str) {
        self.sessions.revoke(token);
    }

    /// Drop expired sessions. Call periodically from a background task.
    pub fn evict_expired_sessions(&self) -> usize {
        self.sessions.evict_expired()
    }

    /// Attach an external ads-platform credential to a user profile.
    pub fn link_ads_credential(
        &self,
        user_id: Uuid,
        access_token: String,
        ads_user_id: Option<String>,
    ) -> AdpilotResult<User> {
        self.directory
            .link_ads_credential(user_id, access_token, ads_user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> IdentityService {
        IdentityService::new(&AuthConfig {
            token_ttl_minutes: 30,
        })
    }

    fn register_req(email: &str) -> RegisterRequest {
        RegisterRequest {
            email: email.to_string(),
            password: "hunter2hunter2".to_string(),
            full_name: Some("Test User".to_string()),
            role: None,
        }
    }

    #[test]
    fn register_then_login_roundtrip() {
        let svc = service();
        let user = svc.register(register_req("alice@example.com")).expect("register");
        assert_eq!(user.email, "alice@example.com");

        let token = svc
            .login(&LoginRequest {
                email: "alice@example.com".to_string(),
                password: "hunter2hunter2".to_string(),
            })
            .expect("login");
        assert_eq!(token.token_type, "bearer");

        let verified = svc.verify_token(&token.access_token).expect("verify");
        assert_eq!(verified.id, user.id);
    }

    #[test]
    fn duplicate_email_is_rejected() {
        let svc = service();
        svc.register(register_req("bob@example.com")).expect("first register");
        let err = svc.register(register_req("bob@example.com")).unwrap_err();
        assert!(matches!(err, AdpilotError::Validation(_)));
    }

    #[test]
    fn wrong_password_is_unauthenticated() {
        let svc = service();
        svc.register(register_req("carol@example.com")).expect("register");
        let err = svc
            .login(&LoginRequest {
                email: "carol@example.com".to_string(),
                password: "not-the-password".to_string(),
            })
            .unwrap_err();
        assert!(matches!(err, AdpilotError::Unauthenticated));
    }

    #[test]
    fn revoked_token_no_longer_verifies() {
        let svc = service();
        svc.register(register_req("dave@example.com")).expect("register");
        let token = svc
            .login(&LoginRequest {
                email: "dave@example.com".to_string(),
                password: "hunter2hunter2".to_string(),
            })
            .expect("login");

        svc.logout(&token.access_token);
        assert!(svc.verify_token(&token.access_token).is_err());
    }

    #[test]
    fn linked_credential_shows_up_on_the_user() {
        let svc = service();
        let user = svc.register(register_req("erin@example.com")).expect("register");
        let updated = svc
            .link_ads_credential(user.id, "EAAB-token".to_string(), Some("meta-123".to_string()))
            .expect("link");
        assert_eq!(updated.ads_access_token.as_deref(), Some("EAAB-token"));
        assert_eq!(updated.ads_user_id.as_deref(), Some("meta-123"));
    }
}
