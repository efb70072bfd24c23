use std::sync::Arc;
use std::time::Duration;

use skillswap::auth::GoTrueVerifier;
use skillswap::constants::STORE_REQUEST_TIMEOUT_SECONDS;
use skillswap::router::create_router;
use skillswap::store::RestStore;
use skillswap::{AppState, Config, utils};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    utils::init_logging();

    let config = Config::from_env()?;

    // One client for both the row API and token introspection.
    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(STORE_REQUEST_TIMEOUT_SECONDS))
        .build()?;

    let store = Arc::new(RestStore::new(
        http_client.clone(),
        &config.supabase_url,
        &config.service_role_key,
    ));
    let verifier = Arc::new(GoTrueVerifier::new(
        http_client,
        &config.supabase_url,
        &config.service_role_key,
    ));

    let port = config.port;
    let app = create_router(AppState::new(store, verifier));

    let listener = tokio::net::TcpListener::bind(&format!("0.0.0.0:{}", port)).await?;
    tracing::info!("Server running on port {}", port);

    axum::serve(listener, app).await?;

    Ok(())
}
