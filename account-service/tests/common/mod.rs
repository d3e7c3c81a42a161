use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use account_service::domain::account::errors::AccountError;
use account_service::domain::account::models::Account;
use account_service::domain::account::models::AccountId;
use account_service::domain::account::models::EmailAddress;
use account_service::domain::account::models::PasswordPolicy;
use account_service::domain::account::ports::AccountRepository;
use account_service::domain::account::ports::AccountServicePort;
use account_service::domain::account::service::AccountService;
use account_service::inbound::http::router::create_router;
use async_trait::async_trait;
use chrono::Duration;
use chrono::Utc;
use credential::HashingParams;
use credential::PasswordHasher;
use credential::TokenIssuer;
use credential::TokenValidator;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server on an ephemeral port
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
}

/// In-memory account store.
///
/// The mutex around the map gives `create` the same check-and-insert
/// atomicity the production store gets from its unique index.
pub struct InMemoryAccountRepository {
    accounts: Mutex<HashMap<String, Account>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self {
            accounts: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn create(
        &self,
        email: &EmailAddress,
        password_digest: &str,
    ) -> Result<Account, AccountError> {
        let mut accounts = self.accounts.lock().unwrap();

        if accounts.contains_key(email.as_str()) {
            return Err(AccountError::DuplicateEmail(email.as_str().to_string()));
        }

        let account = Account {
            id: AccountId::new(),
            email: email.clone(),
            password_digest: password_digest.to_string(),
            created_at: Utc::now(),
        };
        accounts.insert(email.as_str().to_string(), account.clone());

        Ok(account)
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Account>, AccountError> {
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts.get(email.as_str()).cloned())
    }
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let repository = Arc::new(InMemoryAccountRepository::new());

        // Cheap hashing parameters keep the suite fast; digests stay real.
        let password_hasher = PasswordHasher::new(HashingParams {
            memory_kib: 8192,
            iterations: 1,
            parallelism: 1,
        })
        .expect("Failed to build hasher");
        let token_issuer = TokenIssuer::new(TEST_SECRET).expect("Failed to build issuer");
        let token_validator =
            Arc::new(TokenValidator::new(TEST_SECRET).expect("Failed to build validator"));

        let account_service: Arc<dyn AccountServicePort> = Arc::new(AccountService::new(
            repository,
            password_hasher,
            token_issuer,
            Duration::hours(1),
            PasswordPolicy::new(8),
        ));

        let router = create_router(account_service, token_validator);
        tokio::spawn(async move { axum::serve(listener, router).await });

        Self {
            address,
            api_client: reqwest::Client::new(),
        }
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }
}

/// Sign a token that expired an hour ago, bypassing the issuer's positive-TTL
/// guard.
pub fn expired_token(subject: &str) -> String {
    let exp = (Utc::now() - Duration::hours(1)).timestamp();
    jsonwebtoken::encode(
        &jsonwebtoken::Header::new(jsonwebtoken::Algorithm::HS256),
        &serde_json::json!({"sub": subject, "exp": exp}),
        &jsonwebtoken::EncodingKey::from_secret(TEST_SECRET),
    )
    .expect("Failed to sign expired token")
}
