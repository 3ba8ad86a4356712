// src/infrastructure/security/token.rs
use std::sync::Arc;

use crate::application::{
    ApplicationResult,
    dto::AuthenticatedUser,
    error::ApplicationError,
    ports::{security::TokenVerifier, time::Clock},
};
use crate::domain::user::{UserId, UserRepository};
use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

const TOKEN_VERSION: &str = "v1";

/// Issue a bearer token of the form `v1.<user-id>.<expiry>.<signature>`,
/// where the signature is HMAC-SHA256 over the first three segments.
/// Tokens are minted out of band (see the `mint_token` binary); this
/// service only verifies them.
pub fn sign_token(secret: &[u8], user_id: i64, expires_at: DateTime<Utc>) -> String {
    let claims = format!("{TOKEN_VERSION}.{user_id}.{}", expires_at.timestamp());
    let mut mac = HmacSha256::new_from_slice(secret).expect("hmac accepts keys of any length");
    mac.update(claims.as_bytes());
    let tag = mac.finalize().into_bytes();
    format!("{claims}.{}", URL_SAFE_NO_PAD.encode(tag))
}

pub struct HmacTokenVerifier {
    secret: Vec<u8>,
    user_repo: Arc<dyn UserRepository>,
    clock: Arc<dyn Clock>,
}

impl HmacTokenVerifier {
    pub fn new(
        secret: impl Into<Vec<u8>>,
        user_repo: Arc<dyn UserRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            secret: secret.into(),
            user_repo,
            clock,
        }
    }
}

fn invalid() -> ApplicationError {
    ApplicationError::unauthorized("invalid token")
}

#[async_trait]
impl TokenVerifier for HmacTokenVerifier {
    async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        let (claims, signature) = token.rsplit_once('.').ok_or_else(invalid)?;

        let mut segments = claims.split('.');
        let version = segments.next().ok_or_else(invalid)?;
        let user_id: i64 = segments
            .next()
            .and_then(|s| s.parse().ok())
            .ok_or_else(invalid)?;
        let expires: i64 = segments
            .next()
            .and_then(|s| s.parse().ok())
            .ok_or_else(invalid)?;
        if version != TOKEN_VERSION || segments.next().is_some() {
            return Err(invalid());
        }

        let tag = URL_SAFE_NO_PAD.decode(signature).map_err(|_| invalid())?;
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .expect("hmac accepts keys of any length");
        mac.update(claims.as_bytes());
        // verify_slice is a constant-time comparison
        mac.verify_slice(&tag).map_err(|_| invalid())?;

        let expires_at = DateTime::from_timestamp(expires, 0).ok_or_else(invalid)?;
        if expires_at <= self.clock.now() {
            return Err(ApplicationError::unauthorized("token expired"));
        }

        let id = UserId::new(user_id).map_err(|_| invalid())?;
        let user = self
            .user_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::unauthorized("unknown token subject"))?;

        Ok(AuthenticatedUser {
            id: user.id,
            username: user.username.into(),
        })
    }
}
