use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;
use credential::PasswordHasher;
use credential::TokenIssuer;

use crate::account::errors::AccountError;
use crate::account::errors::PasswordPolicyError;
use crate::domain::account::models::Account;
use crate::domain::account::models::LoginCommand;
use crate::domain::account::models::PasswordPolicy;
use crate::domain::account::models::RegisterAccountCommand;
use crate::domain::account::ports::AccountRepository;
use crate::domain::account::ports::AccountServicePort;

/// Domain service implementation for account operations.
///
/// Concrete implementation of AccountServicePort with dependency injection.
/// The hasher, issuer, token lifetime, and password policy are fixed at
/// construction from process configuration.
pub struct AccountService<R>
where
    R: AccountRepository,
{
    repository: Arc<R>,
    password_hasher: PasswordHasher,
    token_issuer: TokenIssuer,
    token_ttl: Duration,
    password_policy: PasswordPolicy,
}

impl<R> AccountService<R>
where
    R: AccountRepository,
{
    /// Create a new account service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Account persistence implementation
    /// * `password_hasher` - Credential hasher configured with process-wide cost
    /// * `token_issuer` - Token issuer holding the signing secret
    /// * `token_ttl` - Lifetime of issued tokens
    /// * `password_policy` - Minimum requirements for registration passwords
    pub fn new(
        repository: Arc<R>,
        password_hasher: PasswordHasher,
        token_issuer: TokenIssuer,
        token_ttl: Duration,
        password_policy: PasswordPolicy,
    ) -> Self {
        Self {
            repository,
            password_hasher,
            token_issuer,
            token_ttl,
            password_policy,
        }
    }
}

#[async_trait]
impl<R> AccountServicePort for AccountService<R>
where
    R: AccountRepository,
{
    async fn register(&self, command: RegisterAccountCommand) -> Result<Account, AccountError> {
        self.password_policy.check(&command.password)?;

        let password_digest = self.password_hasher.hash(&command.password)?;

        let account = self
            .repository
            .create(&command.email, &password_digest)
            .await?;

        tracing::info!(account_id = %account.id, "account registered");

        Ok(account)
    }

    async fn login(&self, command: LoginCommand) -> Result<String, AccountError> {
        if command.password.is_empty() {
            return Err(PasswordPolicyError::Empty.into());
        }

        // Unknown account and wrong password produce the same error; only the
        // log distinguishes them.
        let account = match self.repository.find_by_email(&command.email).await? {
            Some(account) => account,
            None => {
                tracing::warn!(email = %command.email, "login attempt for unknown account");
                return Err(AccountError::InvalidCredentials);
            }
        };

        let password_matches = self
            .password_hasher
            .verify(&command.password, &account.password_digest)?;

        if !password_matches {
            tracing::warn!(account_id = %account.id, "login attempt with wrong password");
            return Err(AccountError::InvalidCredentials);
        }

        let mut extra_claims = HashMap::new();
        extra_claims.insert(
            "email".to_string(),
            serde_json::json!(account.email.as_str()),
        );

        let token =
            self.token_issuer
                .issue(&account.id.to_string(), extra_claims, self.token_ttl)?;

        tracing::info!(account_id = %account.id, "login succeeded");

        Ok(token)
    }
}
