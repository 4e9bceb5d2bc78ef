//! Signed, time-bounded identity tokens.

use std::{fmt, sync::Arc};

use jiff::SignedDuration;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mockall::automock;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use zeroize::Zeroizing;

use crate::clock::Clock;

/// Claims carried by every issued token. Times are seconds since the Unix epoch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Identity email.
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token signature or structure is invalid")]
    InvalidSignature(#[source] jsonwebtoken::errors::Error),

    #[error("token has expired")]
    Expired,

    #[error("failed to encode token")]
    Encoding(#[source] jsonwebtoken::errors::Error),

    #[error("token lifetime must be positive and representable")]
    Lifetime,
}

/// Process-wide symmetric signing key. Wiped from memory on drop.
#[derive(Clone)]
pub struct SigningKey(Zeroizing<Vec<u8>>);

impl SigningKey {
    #[must_use]
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self(Zeroizing::new(secret.into()))
    }

    fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningKey(**redacted**)")
    }
}

#[automock]
pub trait TokenService: Send + Sync {
    /// Issue a token for `subject`, valid from now until now plus the configured lifetime.
    fn issue(&self, subject: &str) -> Result<String, TokenError>;

    /// Verify the signature first, then the expiry against the injected clock.
    fn verify(&self, token: &str) -> Result<Claims, TokenError>;
}

/// HS256 JWT implementation of [`TokenService`].
#[derive(Debug, Clone)]
pub struct JwtTokenService {
    key: SigningKey,
    lifetime: SignedDuration,
    validation: Validation,
    clock: Arc<dyn Clock>,
}

impl JwtTokenService {
    /// # Errors
    ///
    /// Returns [`TokenError::Lifetime`] when `lifetime` is zero or negative.
    pub fn new(
        key: SigningKey,
        lifetime: SignedDuration,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, TokenError> {
        if lifetime.as_secs() <= 0 {
            return Err(TokenError::Lifetime);
        }

        let mut validation = Validation::new(Algorithm::HS256);

        // Expiry is checked against `clock` after the signature verifies.
        validation.validate_exp = false;
        validation.leeway = 0;

        Ok(Self {
            key,
            lifetime,
            validation,
            clock,
        })
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, subject: &str) -> Result<String, TokenError> {
        let iat = self.clock.now().as_second();
        let exp = iat
            .checked_add(self.lifetime.as_secs())
            .ok_or(TokenError::Lifetime)?;

        let claims = Claims {
            sub: subject.to_string(),
            iat,
            exp,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.key.as_bytes()),
        )
        .map_err(TokenError::Encoding)
    }

    fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let claims = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.key.as_bytes()),
            &self.validation,
        )
        .map_err(TokenError::InvalidSignature)?
        .claims;

        if self.clock.now().as_second() >= claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}
