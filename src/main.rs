use sqlx::migrate::Migrator;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use payrelay_core::adapters::{self, PostgresTransactionStore};
use payrelay_core::config::Config;
use payrelay_core::mercadopago::PreferenceClient;
use payrelay_core::{AppState, create_app};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    // Setup logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database pool
    let pool = adapters::postgres_store::create_pool(&config).await?;

    // Run migrations
    let migrator = Migrator::new(Path::new("./migrations")).await?;
    migrator.run(&pool).await?;
    tracing::info!("Database migrations completed");

    let payments = PreferenceClient::new(
        config.mercadopago_base_url.clone(),
        config.mercadopago_access_token.clone(),
    );
    tracing::info!(
        "MercadoPago client initialized with URL: {}",
        config.mercadopago_base_url
    );

    let app_state = AppState {
        store: Arc::new(PostgresTransactionStore::new(pool)),
        payments,
        notification_url: config.notification_url.clone(),
        webhook_secret: config.webhook_secret.clone(),
    };

    let app = create_app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    tracing::info!("listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
