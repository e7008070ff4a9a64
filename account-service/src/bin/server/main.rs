use std::sync::Arc;

use account_service::account::ports::SessionStore;
use account_service::account::ports::UserRepository;
use account_service::account::service::AuthService;
use account_service::config::Config;
use account_service::inbound::http::router::create_router;
use account_service::inbound::http::session::SessionCookies;
use account_service::outbound::credentials::Argon2CredentialVerifier;
use account_service::outbound::repositories::InMemoryUserRepository;
use account_service::outbound::repositories::PostgresUserRepository;
use account_service::outbound::sessions::InMemorySessionStore;
use auth::Authenticator;
use auth::HashingParams;
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

    tracing::info!(
        http_port = config.server.http_port,
        persistent = config.database.is_some(),
        session_ttl_minutes = config.session.ttl_minutes,
        cookie_name = %config.session.cookie_name,
        secure_cookie = config.session.secure_cookie,
        "Configuration loaded"
    );

    let authenticator = Arc::new(Authenticator::with_hashing(
        config.session.secret.as_bytes(),
        HashingParams::from(&config.hashing),
    )?);
    let sessions = SessionCookies::new(
        Arc::new(InMemorySessionStore::new()),
        Arc::clone(&authenticator),
        config.session.cookie_settings(),
    );

    match &config.database {
        Some(database) => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(database.max_connections)
                .connect(&database.url)
                .await?;
            tracing::info!(
                max_connections = database.max_connections,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            let repository = Arc::new(PostgresUserRepository::new(pg_pool));
            serve(&config, repository, authenticator, sessions).await
        }
        None => {
            tracing::warn!("No database configured, users are kept in memory");
            let repository = Arc::new(InMemoryUserRepository::new());
            serve(&config, repository, authenticator, sessions).await
        }
    }
}

async fn serve<R, S>(
    config: &Config,
    repository: Arc<R>,
    authenticator: Arc<Authenticator>,
    sessions: SessionCookies<S>,
) -> Result<(), anyhow::Error>
where
    R: UserRepository,
    S: SessionStore,
{
    let verifier = Arc::new(Argon2CredentialVerifier::new(authenticator));
    let auth_service = Arc::new(AuthService::new(repository, verifier));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, create_router(auth_service, sessions)).await?;

    tracing::info!("Server exited successfully");
    Ok(())
}
