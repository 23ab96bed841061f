//! Backend entry-point: wires the gatekeeping pipeline and REST endpoints.

use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use portfolio_backend::ApiDoc;
use portfolio_backend::domain::ProjectRepository;
use portfolio_backend::domain::ports::AuditSink;
use portfolio_backend::inbound::http;
use portfolio_backend::inbound::http::health::HealthState;
use portfolio_backend::inbound::http::state::HttpState;
use portfolio_backend::outbound::audit::QueuedAuditSink;
use portfolio_backend::outbound::persistence::InMemoryDocumentStore;
use portfolio_backend::server::{ServerConfig, default_policy};
use portfolio_backend::{Identity, RouteGuard, Trace};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = ServerConfig::from_env();
    info!(bind_addr = %config.bind_addr, "starting server");

    let store = Arc::new(InMemoryDocumentStore::default());
    let state = HttpState::new(ProjectRepository::new(store));
    let policy = Arc::new(default_policy());
    let audit: Arc<dyn AuditSink> =
        Arc::new(QueuedAuditSink::spawn(config.audit_queue_capacity));

    let health_state = web::Data::new(HealthState::new());
    // Clone for the server factory so the readiness probe stays reachable.
    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        let app = App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(server_health_state.clone())
            .configure(http::configure)
            .wrap(RouteGuard::new(Arc::clone(&policy), Arc::clone(&audit)))
            .wrap(Identity)
            .wrap(Trace);
        #[cfg(debug_assertions)]
        let app =
            app.service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()));
        app
    })
    .bind(config.bind_addr)?;

    health_state.mark_ready();
    server.run().await
}
