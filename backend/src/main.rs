//! Backend entry-point: reads configuration, wires adapters and serves HTTP.

mod server;

use actix_web::web;
use color_eyre::eyre::Result;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::HealthState;
use server::{AppConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(e) = fmt().with_env_filter(filter).json().try_init() {
        warn!(error = %e, "tracing init failed");
    }

    let config = AppConfig::from_env(&mockable::DefaultEnv::new())?;
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config).await?;
    let served = server.await;
    health_state.mark_unhealthy();
    info!("server stopped");
    served?;
    Ok(())
}
