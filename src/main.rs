/// Service entry point: fetches feeds on demand and serves typed results
use prescient::clients::{OpenMeteoClient, PotsdamClient, SwpcClient};
use prescient::config::AppConfig;
use prescient::handlers::AppState;
use prescient::routes::build_router;
use prescient::services::{EarthService, SunService};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    // Load configuration
    let config = AppConfig::from_env()?;
    info!("Configuration loaded successfully");

    // Initialize clients
    let timeout = config.http_timeout_seconds;
    let potsdam_client = PotsdamClient::new(config.gfz_base_url.clone(), timeout)?;
    let swpc_client = SwpcClient::new(config.swpc_base_url.clone(), timeout)?;
    let open_meteo_client = OpenMeteoClient::new(config.open_meteo_base_url.clone(), timeout)?;

    // Initialize services
    let sun_service = Arc::new(SunService::new(
        potsdam_client,
        swpc_client,
        config.event_window()?,
    ));
    let earth_service = Arc::new(EarthService::new(open_meteo_client));

    let state = AppState {
        sun_service,
        earth_service,
    };

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("prescient listening on {}", config.bind_addr);

    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
