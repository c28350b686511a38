//! Bearer credential signing and verification

use crate::auth::secret::SecretRotator;
use crate::error::{Error, Result};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Claims carried by a bearer credential
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,
    /// The opaque server-side session token issued at login
    pub session_token: String,
    /// Issued at
    pub iat: i64,
    /// Expiration time
    pub exp: i64,
}

/// Signs and verifies bearer credentials with the rotator's current secret.
///
/// Verifying a credential proves signature and expiry only, not that the
/// embedded session is still live; callers confirm that separately through
/// the [`SessionManager`](crate::auth::SessionManager).
#[derive(Clone)]
pub struct TokenCodec {
    rotator: SecretRotator,
}

impl TokenCodec {
    pub fn new(rotator: SecretRotator) -> Self {
        Self { rotator }
    }

    /// Sign a credential binding the username to its session token
    pub async fn issue(
        &self,
        username: &str,
        session_token: &str,
        ttl: chrono::Duration,
    ) -> Result<String> {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: username.to_string(),
            session_token: session_token.to_string(),
            iat: now,
            exp: now + ttl.num_seconds(),
        };

        let secret = self.rotator.current().await;
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .map_err(|e| Error::Other(format!("Failed to sign bearer credential: {e}")))
    }

    /// Verify a credential against the current secret and decode its claims.
    ///
    /// A credential signed with a rotated-out secret is indistinguishable from
    /// a forged one; rotation is mass invalidation.
    pub async fn verify(&self, credential: &str) -> Result<Claims> {
        let secret = self.rotator.current().await;
        let data = decode::<Claims>(
            credential,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => Error::ExpiredCredential,
            _ => Error::InvalidCredential,
        })?;

        let claims = data.claims;
        if claims.sub.is_empty() || claims.session_token.is_empty() {
            return Err(Error::InvalidCredential);
        }
        Ok(claims)
    }
}
