use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{AppState, router};
use hospital_core::{RecordStoreGateway, core_config_from_env_values, open_store};

/// Main entry point for the hospital onboarding service
///
/// Resolves configuration once, opens the document store, and serves the REST API.
///
/// # Environment Variables
/// - `HOSPITAL_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `HOSPITAL_STORE`: `memory` or `files` (default: `files` when `HOSPITAL_DATA_DIR` is set)
/// - `HOSPITAL_DATA_DIR`: Directory for the file store (default: "hospital_data")
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If configuration, store startup, or the server fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("hospital=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr =
        std::env::var("HOSPITAL_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    let cfg = core_config_from_env_values(
        std::env::var("HOSPITAL_STORE").ok(),
        std::env::var("HOSPITAL_DATA_DIR").ok(),
    )?;
    if cfg.backend() == hospital_core::StoreBackend::Memory {
        tracing::warn!("using in-memory store; records will not survive a restart");
    }

    let store = open_store(&cfg)?;
    let app = router(AppState::new(RecordStoreGateway::new(store)));

    tracing::info!("++ Starting hospital REST API on {}", rest_addr);

    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
