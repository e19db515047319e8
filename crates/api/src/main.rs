use std::sync::Arc;

use geoportal_api::app::{build_app, services::build_services};
use geoportal_api::config::Config;
use geoportal_auth::TokenCodec;

#[tokio::main]
async fn main() {
    geoportal_observability::init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    let pool = match geoportal_store::connect(&config.database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!(error = %e, "failed to connect to database");
            std::process::exit(1);
        }
    };

    let tokens = TokenCodec::new(config.jwt_secret.as_bytes(), config.jwt_ttl);
    let services = Arc::new(build_services(pool, tokens));
    let app = build_app(services, &config.cors_origins);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {e}", config.bind_addr));

    tracing::info!("listening on {}", config.bind_addr);

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server exited");
        std::process::exit(1);
    }
}
