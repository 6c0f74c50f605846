mod api;
mod config;
mod error;
mod routes;

use axum::http::Method;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing_subscriber::EnvFilter;

use api::rest::AppState;
use config::{Config, RouteSource};
use error::AppResult;
use routes::{loader, parser, Route};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;

    // RUST_LOG directives win over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str().to_lowercase()));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    tracing::info!("Route Table Sorter starting...");
    match &config.loaded_from {
        Some(path) => tracing::info!("Loading configuration from: {}", path.display()),
        None => tracing::info!("No configuration file found, using defaults"),
    }

    let routes = match load_routes(&config) {
        Ok(routes) => routes,
        Err(e) => {
            tracing::error!("{}", e);
            let message = e.user_message();
            return Err(anyhow::Error::new(e).context(message));
        }
    };
    tracing::info!("Loaded {} routes", routes.len());

    let hostname = routes::get_hostname();
    let state = Arc::new(AppState::new(routes, config.title.clone(), hostname));

    let addr = SocketAddr::new(config.bind_address, config.port);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    // Build application router
    let app = api::rest::create_api_router(state)
        .nest_service("/static", ServeDir::new(&config.static_dir))
        .layer(cors)
        .into_make_service();

    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("Endpoints:");
    tracing::info!("  GET  http://{}/", addr);
    tracing::info!("  GET  http://{}/sort/{{address|gateway|interface}}", addr);
    tracing::info!("  GET  http://{}/api/routes", addr);
    tracing::info!("  POST http://{}/api/sort", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn load_routes(config: &Config) -> AppResult<Vec<Route>> {
    match config.source {
        RouteSource::File => {
            tracing::info!("Loading routes from {}", config.routes_file.display());
            loader::load_routes(&config.routes_file)
        }
        RouteSource::System => {
            tracing::info!("Reading the system IPv4 routing table");
            parser::get_system_routes()
        }
    }
}
