//! Credential primitives library
//!
//! Provides the building blocks for credential-based authentication:
//! - Password hashing (Argon2id, tunable cost)
//! - Bearer token issuance and validation (HS256)
//!
//! The signing secret and hashing cost are injected at construction time so
//! callers can rotate or tune them without touching global state.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use credential::PasswordHasher;
//!
//! let hasher = PasswordHasher::default();
//! let digest = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &digest).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Token Issuance and Validation
//! ```
//! use std::collections::HashMap;
//!
//! use chrono::Duration;
//! use credential::{TokenIssuer, TokenValidator};
//!
//! let secret = b"secret_key_at_least_32_bytes_long!";
//! let issuer = TokenIssuer::new(secret).unwrap();
//! let validator = TokenValidator::new(secret).unwrap();
//!
//! let token = issuer
//!     .issue("account-1", HashMap::new(), Duration::hours(1))
//!     .unwrap();
//! let claims = validator.validate(&token).unwrap();
//! assert_eq!(claims.sub, "account-1");
//! ```

pub mod password;
pub mod token;

// Re-export commonly used items
pub use password::HashingParams;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::Claims;
pub use token::TokenError;
pub use token::TokenIssuer;
pub use token::TokenValidator;
