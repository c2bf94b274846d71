//! Maitre JSON API Server

use std::process;

use salvo::{
    affix_state::inject,
    oapi::{
        OpenApi,
        security::{Http, HttpAuthScheme, SecurityScheme},
        swagger_ui::SwaggerUi,
    },
    prelude::*,
    trailing_slash::remove_slash,
};
use tracing::{error, info};

use maitre_app::context::{AppContext, AppSettings};

use crate::{config::ServerConfig, state::State, transport::Transports};

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod auth;
mod config;
mod email_verifications;
mod extensions;
mod healthcheck;
mod observability;
mod router;
mod sessions;
mod shutdown;
mod state;
mod tenants;
#[cfg(test)]
mod test_helpers;
mod transport;
mod users;

/// Maitre JSON API Server entry point
#[tokio::main]
pub async fn main() {
    // Load configuration from .env and CLI arguments
    let config = ServerConfig::load().unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized yet, must use eprintln for config errors"
        )]
        {
            eprintln!("Configuration error: {e}");
        }

        process::exit(1);
    });

    if let Err(init_error) = observability::init_subscriber(&config.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "logging failed to initialise, must use eprintln"
        )]
        {
            eprintln!("Logging error: {init_error}");
        }

        process::exit(1);
    }

    observability::set_slow_request_threshold(config.logging.slow_request_threshold());

    let addr = config.socket_addr();

    info!(app_env = ?config.app.app_env, "Starting server on {addr}");

    // Bind server
    let listener = TcpListener::new(addr).bind().await;

    let settings = AppSettings {
        database_url: config.database.database_url.clone(),
        database_deadline: config.database.deadline(),
        cache: config.cache.backend(),
        oat_keys: config.security.oat_keys(),
        spt_keys: config.security.spt_keys(),
    };

    let app = match AppContext::connect(settings).await {
        Ok(app) => app,
        Err(init_error) => {
            error!("failed to initialize app context: {init_error}");

            process::exit(1);
        }
    };

    let transports = Transports::new(config.app.app_env.secure_cookies());

    let router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(observability::request_logging)
        .hoop(remove_slash())
        .hoop(inject(State::from_app_context(app, transports)))
        .push(router::app_router());

    let doc = OpenApi::new("Maitre API", env!("CARGO_PKG_VERSION"))
        .add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
        .merge_router(&router);

    let router = router
        .push(doc.into_router("/api-doc/openapi.json"))
        .push(SwaggerUi::new("/api-doc/openapi.json").into_router("docs"));

    let server = Server::new(listener);

    let handle = server.handle();
    let grace = config.server.shutdown_grace();

    // Listen for shutdown signal
    tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle, grace).await {
            error!("failed to listen for shutdown signal: {error}");
        }
    });

    // Start serving requests
    server.serve(router).await;
}
