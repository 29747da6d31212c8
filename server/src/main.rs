use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::http::Method;
use miette::{IntoDiagnostic, Result};
use tower_http::cors::{Any, CorsLayer};

use askprobe::{Config, ConfigStore, CONFIG_PATH};

use crate::routes::AppState;

mod admin;
mod routes;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    // A corrupt config file is a startup error; only a missing file
    // starts the store empty.
    let store = ConfigStore::open(CONFIG_PATH)?;
    let client = Config::from_env().client()?;

    let state = AppState {
        store: Arc::new(Mutex::new(store)),
        client,
    };

    // allow the browser admin UI from any origin
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any)
        .allow_origin(Any);

    let app = routes::app(state).layer(cors);

    let addr: SocketAddr = "0.0.0.0:3000".parse().into_diagnostic()?;
    tracing::info!(%addr, "serving hotel chatbot probe api");
    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .into_diagnostic()?;

    Ok(())
}
