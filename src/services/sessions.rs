//! Session-based authentication service.
//!
//! Login verifies the argon2id password hash and mints an opaque random
//! token. Only the SHA-256 of the token is stored, as the Redis key of the
//! session payload; the plain token goes to the client and is never
//! persisted. Session lifetime is sliding: every authenticated request
//! refreshes the TTL.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::{
    config::SessionConfig,
    error::{AppError, AppResult},
    models::audit::{AuditAction, NewAuditEntry},
    models::user::{SessionUser, User, UserStatus},
    repository::Repository,
    services::{audit::AuditService, redis::RedisService},
};

#[derive(Clone)]
pub struct SessionsService {
    repository: Repository,
    config: SessionConfig,
    redis: RedisService,
    audit: AuditService,
}

impl SessionsService {
    pub fn new(
        repository: Repository,
        config: SessionConfig,
        redis: RedisService,
        audit: AuditService,
    ) -> Self {
        Self {
            repository,
            config,
            redis,
            audit,
        }
    }

    /// Authenticate by login and password, returning the session token and
    /// the session payload
    pub async fn login(&self, login: &str, password: &str) -> AppResult<(String, SessionUser)> {
        let user = self
            .repository
            .users
            .get_by_login(login)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid login or password".to_string()))?;

        if UserStatus::from(user.status) == UserStatus::Blocked {
            return Err(AppError::Authentication("Account is blocked".to_string()));
        }

        if !self.verify_password(&user, password)? {
            return Err(AppError::Authentication(
                "Invalid login or password".to_string(),
            ));
        }

        let session = SessionUser {
            user_id: user.id,
            login: user.login.clone(),
            name: user.name.clone(),
            role: user.role,
        };

        let token = mint_token();
        let payload = serde_json::to_string(&session)
            .map_err(|e| AppError::Internal(format!("Failed to serialize session: {}", e)))?;
        self.redis
            .store_session(&hash_token(&token), &payload, self.ttl_seconds())
            .await?;

        self.audit
            .record(NewAuditEntry {
                actor_id: Some(user.id),
                actor_login: user.login.clone(),
                action: AuditAction::Login,
                resource: "session".to_string(),
                resource_id: None,
                detail: None,
            })
            .await?;

        tracing::info!("User {} logged in", user.login);
        Ok((token, session))
    }

    /// Resolve a bearer token to its session, refreshing the sliding TTL
    pub async fn authenticate(&self, token: &str) -> AppResult<SessionUser> {
        let payload = self
            .redis
            .fetch_session(&hash_token(token), self.ttl_seconds())
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid or expired session".to_string()))?;

        serde_json::from_str(&payload)
            .map_err(|e| AppError::Internal(format!("Corrupt session payload: {}", e)))
    }

    /// Delete the session for a token
    pub async fn logout(&self, token: &str) -> AppResult<()> {
        self.redis.delete_session(&hash_token(token)).await
    }

    fn verify_password(&self, user: &User, password: &str) -> AppResult<bool> {
        let parsed = PasswordHash::new(&user.password_hash)
            .map_err(|e| AppError::Internal(format!("Invalid password hash in database: {}", e)))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }

    fn ttl_seconds(&self) -> u64 {
        self.config.ttl_hours * 3600
    }
}

/// Hash a plaintext password with argon2id
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

/// Mint an opaque 256-bit session token
fn mint_token() -> String {
    let mut bytes = [0u8; 32];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Tokens are stored hashed; a leaked session dump yields no usable tokens
fn hash_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_are_unique_and_opaque() {
        let a = mint_token();
        let b = mint_token();
        assert_ne!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_token_hash_is_stable() {
        let token = "abc123";
        assert_eq!(hash_token(token), hash_token(token));
        assert_ne!(hash_token(token), hash_token("abc124"));
    }
}
