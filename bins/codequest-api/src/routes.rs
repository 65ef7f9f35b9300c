// Route table for the codequest API

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::{handlers, metrics, AppState};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/status", get(handlers::health_check))
        .route("/courses", get(handlers::list_courses))
        .route("/courses/:course_id", get(handlers::get_course))
        .route("/exercises/:exercise_id", get(handlers::get_exercise))
        .route("/exercises/:exercise_id/run", post(handlers::run_exercise))
        .route("/run", post(handlers::run_adhoc))
        .route("/metrics", get(metrics::serve_metrics))
}
