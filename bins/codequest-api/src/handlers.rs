// HTTP route handlers for the codequest API

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use codequest_common::types::{RunOutcome, TestCase};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::metrics;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct RunRequest {
    pub source_code: String,
}

#[derive(Debug, Deserialize)]
pub struct AdHocRunRequest {
    pub source_code: String,
    #[serde(default)]
    pub test_cases: Vec<TestCase>,
}

#[derive(Debug, Serialize)]
pub struct RunResponse {
    pub run_id: String,
    #[serde(flatten)]
    pub outcome: RunOutcome,
}

/// One-line view of a course for the listing endpoint.
#[derive(Debug, Serialize)]
pub struct CourseSummary {
    pub id: String,
    pub title: String,
    pub description: String,
    pub lessons: usize,
    pub exercises: usize,
}

/// Removes the exercise from the in-flight set when the run finishes,
/// whichever way the handler returns.
struct RunGuard {
    state: Arc<AppState>,
    exercise_id: String,
}

impl RunGuard {
    /// Claim the exercise for this run, or `None` if one is already
    /// outstanding.
    fn claim(state: Arc<AppState>, exercise_id: &str) -> Option<Self> {
        let mut in_flight = state.in_flight.lock().expect("in-flight lock poisoned");
        if !in_flight.insert(exercise_id.to_string()) {
            return None;
        }
        drop(in_flight);
        Some(Self {
            state,
            exercise_id: exercise_id.to_string(),
        })
    }
}

impl Drop for RunGuard {
    fn drop(&mut self) {
        if let Ok(mut in_flight) = self.state.in_flight.lock() {
            in_flight.remove(&self.exercise_id);
        }
    }
}

/// GET /status - Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// GET /courses - List all courses in the catalog
pub async fn list_courses(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let summaries: Vec<CourseSummary> = state
        .catalog
        .courses
        .iter()
        .map(|course| CourseSummary {
            id: course.id.clone(),
            title: course.title.clone(),
            description: course.description.clone(),
            lessons: course.lessons.len(),
            exercises: course.lessons.iter().map(|l| l.exercises.len()).sum(),
        })
        .collect();

    Json(summaries)
}

/// GET /courses/{course_id} - Full course tree
pub async fn get_course(
    State(state): State<Arc<AppState>>,
    Path(course_id): Path<String>,
) -> impl IntoResponse {
    match state.catalog.course(&course_id) {
        Some(course) => (StatusCode::OK, Json(course.clone())).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({
                "error": format!("Unknown course: {}", course_id)
            })),
        )
            .into_response(),
    }
}

/// GET /exercises/{exercise_id} - Single practice exercise
pub async fn get_exercise(
    State(state): State<Arc<AppState>>,
    Path(exercise_id): Path<String>,
) -> impl IntoResponse {
    match state.catalog.exercise(&exercise_id) {
        Some(exercise) => (StatusCode::OK, Json(exercise.clone())).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({
                "error": format!("Unknown exercise: {}", exercise_id)
            })),
        )
            .into_response(),
    }
}

/// POST /exercises/{exercise_id}/run - Verify a submission against an
/// exercise's test cases
pub async fn run_exercise(
    State(state): State<Arc<AppState>>,
    Path(exercise_id): Path<String>,
    Json(payload): Json<RunRequest>,
) -> impl IntoResponse {
    if payload.source_code.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({
                "error": "source_code must not be empty"
            })),
        )
            .into_response();
    }

    let test_cases = match state.catalog.test_cases(&exercise_id) {
        Some(test_cases) => test_cases.to_vec(),
        None => {
            return (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({
                    "error": format!("Unknown exercise: {}", exercise_id)
                })),
            )
                .into_response();
        }
    };

    // Single-flight per exercise: reject rather than queue a second run.
    let _guard = match RunGuard::claim(state.clone(), &exercise_id) {
        Some(guard) => guard,
        None => {
            metrics::RUNS_REJECTED.inc();
            warn!(exercise = %exercise_id, "Run already in flight, rejecting");
            return (
                StatusCode::CONFLICT,
                Json(serde_json::json!({
                    "error": format!("A run is already in flight for exercise: {}", exercise_id)
                })),
            )
                .into_response();
        }
    };

    let run_id = Uuid::new_v4();
    metrics::RUNS_TOTAL.inc();
    info!(
        run_id = %run_id,
        exercise = %exercise_id,
        test_cases = test_cases.len(),
        source_size = payload.source_code.len(),
        "Run received"
    );

    let outcome = state
        .verifier
        .run_verification(&payload.source_code, &test_cases)
        .await;

    if outcome.verdict.all_passed {
        metrics::RUNS_PASSED.inc();
    } else {
        metrics::RUNS_FAILED.inc();
    }
    info!(
        run_id = %run_id,
        exercise = %exercise_id,
        all_passed = outcome.verdict.all_passed,
        failures = outcome.verdict.failure_messages.len(),
        "Run completed"
    );

    (
        StatusCode::OK,
        Json(RunResponse {
            run_id: run_id.to_string(),
            outcome,
        }),
    )
        .into_response()
}

/// POST /run - Verify a submission against caller-supplied test cases
pub async fn run_adhoc(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AdHocRunRequest>,
) -> impl IntoResponse {
    if payload.source_code.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({
                "error": "source_code must not be empty"
            })),
        )
            .into_response();
    }

    let run_id = Uuid::new_v4();
    metrics::RUNS_TOTAL.inc();
    info!(
        run_id = %run_id,
        test_cases = payload.test_cases.len(),
        source_size = payload.source_code.len(),
        "Ad-hoc run received"
    );

    let outcome = state
        .verifier
        .run_verification(&payload.source_code, &payload.test_cases)
        .await;

    if outcome.verdict.all_passed {
        metrics::RUNS_PASSED.inc();
    } else {
        metrics::RUNS_FAILED.inc();
    }

    (
        StatusCode::OK,
        Json(RunResponse {
            run_id: run_id.to_string(),
            outcome,
        }),
    )
        .into_response()
}
