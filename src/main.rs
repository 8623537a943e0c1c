use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kaze_portal::session::MemorySessionStorage;
use kaze_portal::{AppConfig, AppState, HttpGateway};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "kaze_portal=debug".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::new_from_env()?;
    let gateway = Arc::new(HttpGateway::new(config.remote.clone())?);
    let session = Arc::new(MemorySessionStorage::new());
    info!("loading catalog from {}", gateway.base_url());

    let state = AppState::new(gateway.clone(), session, config.admin.clone());

    let stats = state.refresh_data().await;
    let snapshot = state.snapshot().await;

    info!(
        "catalog ready: {} courses, {} materials, {} meetings",
        stats.courses, stats.materials, stats.meetings
    );
    for meeting in snapshot.meetings_by_date() {
        info!("upcoming: {} on {} via {}", meeting.title, meeting.date, meeting.platform);
    }

    Ok(())
}
