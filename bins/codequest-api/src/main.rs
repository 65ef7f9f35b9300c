mod handlers;
mod metrics;
mod routes;

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use axum::Router;
use codequest_common::catalog::Catalog;
use codequest_common::config::Settings;
use codequest_verifier::{ExecutionClient, Verifier};
use tokio::net::TcpListener;
use tracing::info;

/// Shared application state.
///
/// `in_flight` enforces single-flight per exercise: a second run for the
/// same exercise is rejected while one is outstanding. Runs are never
/// cancelled once dispatched.
pub struct AppState {
    pub catalog: Catalog,
    pub verifier: Verifier,
    pub in_flight: Mutex<HashSet<String>>,
}

#[tokio::main]
async fn main() {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    info!("codequest API booting...");

    let settings = Settings::from_env();

    let catalog = match &settings.catalog_path {
        Some(path) => Catalog::load(path).expect("Failed to load catalog file"),
        None => Catalog::builtin(),
    };
    let exercises: usize = catalog
        .courses
        .iter()
        .flat_map(|c| &c.lessons)
        .map(|l| l.exercises.len())
        .sum();
    info!(courses = catalog.courses.len(), exercises, "Catalog loaded");

    let client = ExecutionClient::new(
        settings.piston_url.clone(),
        settings.language.clone(),
        settings.language_version.clone(),
    );
    info!(
        endpoint = %settings.piston_url,
        language = %settings.language,
        version = %settings.language_version,
        "Execution service configured"
    );

    let state = Arc::new(AppState {
        catalog,
        verifier: Verifier::new(client),
        in_flight: Mutex::new(HashSet::new()),
    });

    // Build router
    let app = Router::new().merge(routes::routes()).with_state(state);

    // Start server
    let listener = TcpListener::bind(&settings.bind_addr)
        .await
        .expect("Failed to bind to address");

    info!("HTTP server listening on {}", settings.bind_addr);
    info!("Ready to accept submissions");

    axum::serve(listener, app).await.expect("Server error");
}
