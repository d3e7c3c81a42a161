use std::sync::Arc;

use account_service::config::Config;
use account_service::domain::account::models::PasswordPolicy;
use account_service::domain::account::ports::AccountServicePort;
use account_service::domain::account::service::AccountService;
use account_service::inbound::http::router::create_router;
use account_service::outbound::repositories::PostgresAccountRepository;
use chrono::Duration;
use credential::HashingParams;
use credential::PasswordHasher;
use credential::TokenIssuer;
use credential::TokenValidator;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "account_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "account-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    anyhow::ensure!(
        config.auth.token_ttl_seconds > 0,
        "auth.token_ttl_seconds must be positive"
    );

    tracing::info!(
        http_port = config.server.http_port,
        token_ttl_seconds = config.auth.token_ttl_seconds,
        password_min_length = config.password.min_length,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let password_hasher = PasswordHasher::new(HashingParams {
        memory_kib: config.hashing.memory_kib,
        iterations: config.hashing.iterations,
        parallelism: config.hashing.parallelism,
    })?;
    let token_issuer = TokenIssuer::new(config.auth.secret.as_bytes())?;
    let token_validator = Arc::new(TokenValidator::new(config.auth.secret.as_bytes())?);

    let account_repository = Arc::new(PostgresAccountRepository::new(pg_pool));
    let account_service: Arc<dyn AccountServicePort> = Arc::new(AccountService::new(
        account_repository,
        password_hasher,
        token_issuer,
        Duration::seconds(config.auth.token_ttl_seconds),
        PasswordPolicy::new(config.password.min_length),
    ));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(account_service, token_validator);
    axum::serve(http_listener, http_application).await?;

    Ok(())
}
