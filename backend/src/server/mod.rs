//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::AppConfig;

use actix_cors::Cors;
use actix_web::body::MessageBody;
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use color_eyre::eyre::{Result, WrapErr};
use tracing::{info, warn};

use backend::Trace;
#[cfg(debug_assertions)]
use backend::doc::ApiDoc;
use backend::inbound::http::{HealthState, HttpState, configure};
use backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use state_builders::build_state;

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Cors::permissive())
        .wrap(Trace)
        .configure(configure);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Connect the store, run migrations and seeding, then bind the server.
///
/// # Errors
/// Fails when the database is unreachable, migrations or seeding fail, or the
/// socket cannot be bound.
pub async fn create_server(
    health_state: web::Data<HealthState>,
    config: AppConfig,
) -> Result<Server> {
    let pool = match config.database_url.as_deref() {
        Some(url) => {
            run_pending_migrations(url)
                .await
                .wrap_err("applying database migrations")?;
            let pool = DbPool::new(PoolConfig::new(url))
                .await
                .wrap_err("building database pool")?;
            info!("using PostgreSQL persistence");
            Some(pool)
        }
        None => {
            warn!("DATABASE_URL not set; accounts and patterns live in memory only");
            None
        }
    };

    let built = build_state(pool.as_ref());
    if config.wants_seeding() {
        let outcome = built
            .seeder
            .ensure_seeded(config.reset_database)
            .await
            .wrap_err("seeding patterns")?;
        info!(
            cleared = outcome.cleared,
            inserted = outcome.inserted,
            "pattern seeding finished"
        );
    }

    let http_state = web::Data::new(built.http_state);
    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || build_app(server_health_state.clone(), http_state.clone()))
        .bind(config.bind_addr)
        .wrap_err_with(|| format!("binding {}", config.bind_addr))?
        .run();

    info!(addr = %config.bind_addr, "listening");
    health_state.mark_ready();
    Ok(server)
}
