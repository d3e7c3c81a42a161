use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::ports::AccountRepository;

pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn create(
        &self,
        email: &EmailAddress,
        password_digest: &str,
    ) -> Result<Account, AccountError> {
        let account = Account {
            id: AccountId::new(),
            email: email.clone(),
            password_digest: password_digest.to_string(),
            created_at: Utc::now(),
        };

        // The unique index on email makes the check-and-insert atomic: a
        // concurrent duplicate surfaces as a unique violation here.
        sqlx::query(
            r#"
            INSERT INTO accounts (id, email, password_digest, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(account.id.0)
        .bind(account.email.as_str())
        .bind(&account.password_digest)
        .bind(account.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AccountError::DuplicateEmail(account.email.as_str().to_string());
                }
            }
            AccountError::DatabaseError(e.to_string())
        })?;

        Ok(account)
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Account>, AccountError> {
        let row = sqlx::query(
            r#"
            SELECT id, email, password_digest, created_at
            FROM accounts
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(Account {
                id: AccountId(r.get("id")),
                email: EmailAddress::new(r.get::<String, _>("email"))?,
                password_digest: r.get("password_digest"),
                created_at: r.get("created_at"),
            })),
            None => Ok(None),
        }
    }
}
