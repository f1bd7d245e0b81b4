//! In-memory user directory backed by DashMap.
//!
//! Production: replace with a hosted identity provider (Auth0, Ory) or a
//! PostgreSQL-backed store; the fallible signatures below are the contract a
//! remote backend plugs into.

use adpilot_core::types::{User, UserRole};
use adpilot_core::{AdpilotError, AdpilotResult};
use chrono::Utc;
use dashmap::DashMap;
use rand::Rng;
use sha2::{Digest, Sha256};
use tracing::info;
use uuid::Uuid;

use crate::RegisterRequest;

const MIN_PASSWORD_LEN: usize = 8;

struct PasswordDigest {
    salt: String,
    digest: String,
}

/// Thread-safe user store with an email index and salted password digests.
pub struct UserDirectory {
    users: DashMap<Uuid, User>,
    email_index: DashMap<String, Uuid>,
    passwords: DashMap<Uuid, PasswordDigest>,
}

impl UserDirectory {
    pub fn new() -> Self {
        let directory = Self {
            users: DashMap::new(),
            email_index: DashMap::new(),
            passwords: DashMap::new(),
        };
        directory.seed_dev_account();
        info!("User directory initialized (in-memory, development mode)");
        directory
    }

    /// Create a user record. Callers check for duplicates first via
    /// [`find_by_email`]; this re-checks under the email index to stay
    /// race-free.
    pub fn register(&self, req: RegisterRequest) -> AdpilotResult<User> {
        let email = normalize_email(&req.email);
        if !email.contains('@') {
            return Err(AdpilotError::Validation(
                "A valid email address is required".to_string(),
            ));
        }
        if req.password.len() < MIN_PASSWORD_LEN {
            return Err(AdpilotError::Validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }

        let id = Uuid::new_v4();
        let now = Utc::now();
        let user = User {
            id,
            email: email.clone(),
            full_name: req.full_name,
            role: req.role.unwrap_or(UserRole::User),
            is_active: true,
            created_at: now,
            updated_at: now,
            ads_access_token: None,
            ads_user_id: None,
        };

        match self.email_index.entry(email) {
            dashmap::mapref::entry::Entry::Occupied(_) => {
                return Err(AdpilotError::Validation(
                    "User with this email already exists".to_string(),
                ));
            }
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                slot.insert(id);
            }
        }

        let salt = random_salt();
        let digest = hash_password(&req.password, &salt);
        self.passwords.insert(id, PasswordDigest { salt, digest });
        self.users.insert(id, user.clone());
        Ok(user)
    }

    /// Look up a user by email. `Ok(None)` means "definitely absent";
    /// a storage failure must surface as `Err`, never as absence.
    pub fn find_by_email(&self, email: &str) -> AdpilotResult<Option<User>> {
        let email = normalize_email(email);
        Ok(self
            .email_index
            .get(&email)
            .and_then(|id| self.users.get(id.value()))
            .map(|entry| entry.value().clone()))
    }

    pub fn get(&self, id: Uuid) -> Option<User> {
        self.users.get(&id).map(|entry| entry.value().clone())
    }

    /// Check an email/password pair. Returns the user on success; any failure
    /// (unknown email, bad password) collapses to `None`.
    pub fn authenticate(&self, email: &str, password: &str) -> Option<User> {
        let email = normalize_email(email);
        let id = *self.email_index.get(&email)?.value();
        let stored = self.passwords.get(&id)?;
        if hash_password(password, &stored.salt) != stored.digest {
            return None;
        }
        drop(stored);
        self.get(id)
    }

    pub fn link_ads_credential(
        &self,
        user_id: Uuid,
        access_token: String,
        ads_user_id: Option<String>,
    ) -> AdpilotResult<User> {
        let mut entry = self
            .users
            .get_mut(&user_id)
            .ok_or_else(|| AdpilotError::NotFound("user".to_string()))?;
        let user = entry.value_mut();
        user.ads_access_token = Some(access_token);
        user.ads_user_id = ads_user_id;
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Development convenience account, mirroring the sandbox ads backend.
    fn seed_dev_account(&self) {
        let req = RegisterRequest {
            email: "admin@adpilot.dev".to_string(),
            password: "adpilot2024".to_string(),
            full_name: Some("AdPilot Admin".to_string()),
            role: Some(UserRole::Admin),
        };
        if let Ok(user) = self.register(req) {
            // Pre-linked so chat works out of the box against the sandbox.
            let _ = self.link_ads_credential(
                user.id,
                "sandbox-access-token".to_string(),
                Some("sandbox-user".to_string()),
            );
        }
    }
}

impl Default for UserDirectory {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

fn random_salt() -> String {
    let mut rng = rand::thread_rng();
    let bytes: [u8; 16] = rng.gen();
    hex::encode(bytes)
}

fn hash_password(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            email: email.to_string(),
            password: password.to_string(),
            full_name: None,
            role: None,
        }
    }

    #[test]
    fn emails_are_normalized_for_lookup() {
        let dir = UserDirectory::new();
        dir.register(req("Mixed.Case@Example.COM", "longpassword"))
            .expect("register");
        let found = dir
            .find_by_email("mixed.case@example.com")
            .expect("lookup")
            .expect("present");
        assert_eq!(found.email, "mixed.case@example.com");
    }

    #[test]
    fn short_password_is_rejected() {
        let dir = UserDirectory::new();
        let err = dir.register(req("a@b.com", "short")).unwrap_err();
        assert!(matches!(err, AdpilotError::Validation(_)));
    }

    #[test]
    fn absent_user_is_ok_none_not_an_error() {
        let dir = UserDirectory::new();
        let found = dir.find_by_email("nobody@example.com").expect("lookup");
        assert!(found.is_none());
    }

    #[test]
    fn digests_differ_per_user_for_same_password() {
        let dir = UserDirectory::new();
        let a = dir.register(req("a@example.com", "samepassword")).expect("a");
        let b = dir.register(req("b@example.com", "samepassword")).expect("b");
        let da = dir.passwords.get(&a.id).expect("a digest").digest.clone();
        let db = dir.passwords.get(&b.id).expect("b digest").digest.clone();
        assert_ne!(da, db);
    }

    #[test]
    fn dev_account_is_seeded_and_linked() {
        let dir = UserDirectory::new();
        let admin = dir
            .find_by_email("admin@adpilot.dev")
            .expect("lookup")
            .expect("seeded");
        assert_eq!(admin.role, UserRole::Admin);
        assert!(admin.ads_access_token.is_some());
    }
}
