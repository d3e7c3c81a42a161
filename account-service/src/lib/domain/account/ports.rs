use async_trait::async_trait;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::LoginCommand;
use crate::domain::account::models::RegisterAccountCommand;

/// Port for account domain service operations.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Register a new account.
    ///
    /// Checks the password policy, hashes the password, and persists the
    /// account. Exactly one account row is created on success, none on any
    /// failure path.
    ///
    /// # Arguments
    /// * `command` - Validated command containing email and password
    ///
    /// # Returns
    /// The created account, including its store-assigned identifier
    ///
    /// # Errors
    /// * `InvalidPassword` - Password violates the configured policy
    /// * `DuplicateEmail` - An account with this email already exists
    /// * `Hashing` - Password hashing failed
    /// * `DatabaseError` - Store operation failed
    async fn register(&self, command: RegisterAccountCommand) -> Result<Account, AccountError>;

    /// Authenticate an account and issue a bearer token.
    ///
    /// Purely read-and-compute: no persisted side effect.
    ///
    /// # Arguments
    /// * `command` - Validated command containing email and password
    ///
    /// # Returns
    /// Signed token string asserting the account identifier
    ///
    /// # Errors
    /// * `InvalidPassword` - Password is empty
    /// * `InvalidCredentials` - Unknown account or wrong password
    ///   (indistinguishable by design)
    /// * `TokenIssuance` - Token could not be issued
    /// * `DatabaseError` - Store operation failed
    async fn login(&self, command: LoginCommand) -> Result<String, AccountError>;
}

/// Persistence operations for the account aggregate.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Persist a new account keyed by email.
    ///
    /// The check-and-insert must be atomic: given two concurrent calls with
    /// the same email, exactly one succeeds and the other fails with
    /// `DuplicateEmail`.
    ///
    /// # Arguments
    /// * `email` - Normalized unique email address
    /// * `password_digest` - Opaque digest produced by the credential hasher
    ///
    /// # Returns
    /// The created account with its assigned identifier
    ///
    /// # Errors
    /// * `DuplicateEmail` - An account with this email already exists
    /// * `DatabaseError` - Store operation failed
    async fn create(
        &self,
        email: &EmailAddress,
        password_digest: &str,
    ) -> Result<Account, AccountError>;

    /// Retrieve an account by email address.
    ///
    /// # Returns
    /// Optional account entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Account>, AccountError>;
}
