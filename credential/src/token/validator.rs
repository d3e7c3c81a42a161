use jsonwebtoken::decode;
use jsonwebtoken::decode_header;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::TokenError;

/// Validates bearer tokens and extracts their claims.
///
/// Shares the signing secret with [`TokenIssuer`]. The algorithm declared in
/// a presented token is checked against the expected one before any keyed
/// operation; the token is never allowed to pick the algorithm itself.
///
/// [`TokenIssuer`]: super::issuer::TokenIssuer
pub struct TokenValidator {
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    validation: Validation,
}

impl TokenValidator {
    /// Create a token validator with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key the tokens were signed with
    ///
    /// # Errors
    /// * `EmptySecret` - The secret is empty
    pub fn new(secret: &[u8]) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::EmptySecret);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Ok(Self {
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            validation,
        })
    }

    /// Validate a token and return its claims.
    ///
    /// The returned claims always carry a non-empty subject. Failure reasons
    /// are distinguished for logging, but every failure is equally fatal to
    /// the request that presented the token.
    ///
    /// # Arguments
    /// * `token` - Encoded token string
    ///
    /// # Errors
    /// * `Malformed` - The string cannot be parsed into a token
    /// * `UnexpectedSigningMethod` - The token declares an algorithm other than HS256
    /// * `BadSignature` - Signature verification failed
    /// * `Expired` - The expiry instant has passed
    /// * `MissingClaim` - The expiry or subject claim is absent
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        let header = decode_header(token).map_err(|e| TokenError::Malformed(e.to_string()))?;

        if header.alg != self.algorithm {
            return Err(TokenError::UnexpectedSigningMethod(format!(
                "{:?}",
                header.alg
            )));
        }

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => TokenError::Expired,
                    ErrorKind::InvalidSignature => TokenError::BadSignature,
                    ErrorKind::InvalidAlgorithm => {
                        TokenError::UnexpectedSigningMethod(format!("{:?}", header.alg))
                    }
                    ErrorKind::MissingRequiredClaim(claim) => TokenError::MissingClaim(claim.clone()),
                    _ => TokenError::Malformed(e.to_string()),
                }
            })?;

        let claims = token_data.claims;
        if claims.sub.is_empty() {
            return Err(TokenError::MissingClaim("sub".to_string()));
        }

        Ok(claims)
    }
}
