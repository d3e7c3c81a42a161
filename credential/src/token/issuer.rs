use std::collections::HashMap;

use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;

use super::claims::Claims;
use super::errors::TokenError;

/// Issues signed, time-bounded bearer tokens.
///
/// Uses HS256 (HMAC with SHA-256). The signing secret is injected at
/// construction time and shared only with the matching [`TokenValidator`].
///
/// [`TokenValidator`]: super::validator::TokenValidator
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    algorithm: Algorithm,
}

impl TokenIssuer {
    /// Create a token issuer with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    ///
    /// # Errors
    /// * `EmptySecret` - The secret is empty
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::EmptySecret);
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        })
    }

    /// Issue a token asserting `subject`, expiring `ttl` from now.
    ///
    /// The expiry is computed once here and baked into the token; there is no
    /// sliding expiration. Extra claims are signed along with the subject and
    /// expiry but are not encrypted, so callers must not place secrets in them.
    ///
    /// # Arguments
    /// * `subject` - Identifier the token asserts
    /// * `extra_claims` - Additional claims to carry (e.g. a display e-mail)
    /// * `ttl` - Time until the token expires; must be positive
    ///
    /// # Returns
    /// Encoded token string
    ///
    /// # Errors
    /// * `InvalidTtl` - `ttl` is zero or negative
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(
        &self,
        subject: &str,
        extra_claims: HashMap<String, serde_json::Value>,
        ttl: Duration,
    ) -> Result<String, TokenError> {
        if ttl <= Duration::zero() {
            return Err(TokenError::InvalidTtl);
        }

        let now = Utc::now();
        let expiry = now.checked_add_signed(ttl).ok_or(TokenError::InvalidTtl)?;

        let mut claims = Claims::new(subject, expiry.timestamp()).with_issued_at(now.timestamp());
        claims.extra = extra_claims;

        let header = Header::new(self.algorithm);
        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }
}
