use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;

/// Claim set carried by an issued token.
///
/// Subject and expiry are the authoritative claims; anything in `extra` is
/// denormalized convenience data. Unknown keys found in a token are collected
/// into `extra` rather than rejected, so older validators keep working when
/// new claims are added.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject (account identifier)
    #[serde(default)]
    pub sub: String,

    /// Expiration time (Unix timestamp)
    #[serde(default)]
    pub exp: i64,

    /// Issued at (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Additional custom claims (flattened into the token)
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Claims {
    /// Create claims with a subject and an absolute expiry instant.
    pub fn new(sub: impl ToString, exp: i64) -> Self {
        Self {
            sub: sub.to_string(),
            exp,
            iat: None,
            extra: HashMap::new(),
        }
    }

    /// Set issued at (Unix timestamp).
    pub fn with_issued_at(mut self, iat: i64) -> Self {
        self.iat = Some(iat);
        self
    }

    /// Add a custom claim.
    pub fn with_extra(mut self, key: impl ToString, value: impl Serialize) -> Self {
        if let Ok(json_value) = serde_json::to_value(value) {
            self.extra.insert(key.to_string(), json_value);
        }
        self
    }

    /// Get the e-mail carried in the extra claims, if any (convenience method).
    ///
    /// This is display data baked in at issuance, not an authoritative lookup key.
    pub fn email(&self) -> Option<String> {
        self.extra
            .get("email")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
    }
}
