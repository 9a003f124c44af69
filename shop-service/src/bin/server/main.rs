use std::sync::Arc;

use auth::CredentialHasher;
use auth::TokenService;
use shop_service::account::ports::AccountServicePort;
use shop_service::account::ports::EntityStore;
use shop_service::account::service::AuthFlowService;
use shop_service::config::Config;
use shop_service::inbound::http::router::create_router;
use shop_service::repositories::InMemoryEntityStore;
use shop_service::repositories::PostgresEntityStore;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shop_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "shop-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        database_configured = config.database.url.is_some(),
        token_ttl_hours = config.jwt.expiration_hours,
        admin_count = config.admin.emails.len(),
        hash_cost = config.password.hash_cost,
        "Configuration loaded"
    );

    if config.jwt.uses_development_secret() {
        tracing::warn!("Using the development signing secret; set JWT__SIGNING_SECRET");
    }

    let token_ttl = config.jwt.token_ttl()?;
    let token_service = Arc::new(TokenService::new(config.jwt.signing_secret.as_bytes()));

    let account_service = match &config.database.url {
        Some(url) => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .connect(url)
                .await?;
            tracing::info!(
                max_connections = config.database.max_connections,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            build_account_service(
                Arc::new(PostgresEntityStore::new(pg_pool)),
                Arc::clone(&token_service),
                &config,
                token_ttl,
            )
        }
        None => {
            tracing::warn!("No database URL configured, profiles are kept in memory");
            build_account_service(
                Arc::new(InMemoryEntityStore::new()),
                Arc::clone(&token_service),
                &config,
                token_ttl,
            )
        }
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(account_service, token_service);
    axum::serve(http_listener, http_application).await?;

    tracing::info!("Server exited successfully");

    Ok(())
}

fn build_account_service<S: EntityStore>(
    store: Arc<S>,
    token_service: Arc<TokenService>,
    config: &Config,
    token_ttl: chrono::Duration,
) -> Arc<dyn AccountServicePort> {
    Arc::new(
        AuthFlowService::new(store, token_service)
            .with_hasher(CredentialHasher::with_cost(config.password.hash_cost))
            .with_admins(config.admin.allowlist())
            .with_token_ttl(token_ttl),
    )
}
