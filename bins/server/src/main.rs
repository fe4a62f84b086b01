//! Coveted Collection API Server
//!
//! Main entry point for the operations dashboard backend.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use coveted_api::{AppState, create_router};
use coveted_core::auth::hash_password;
use coveted_db::{connect, seed};
use coveted_shared::{AppConfig, JwtConfig, JwtService, SystemClock};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "coveted=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Connect to database
    let db = connect(&config.database.url).await?;
    info!("Connected to database");

    // Seed the default admin on first run
    let admin_hash = hash_password(&config.bootstrap.admin_password)
        .map_err(|e| anyhow::anyhow!("failed to hash bootstrap password: {e}"))?;
    seed::ensure_default_admin(
        &db,
        &config.bootstrap.admin_name,
        &config.bootstrap.admin_email,
        &admin_hash,
    )
    .await?;

    // Create JWT service
    let jwt_service = JwtService::new(JwtConfig {
        secret: config.jwt.secret.clone(),
        token_expiry_days: config.jwt.token_expiry_days,
    });

    // Create application state
    let state = AppState {
        db: Arc::new(db),
        jwt_service: Arc::new(jwt_service),
        clock: Arc::new(SystemClock),
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
