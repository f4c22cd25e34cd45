//! Local stand-in for the deployed site functions.
//!
//! Serves the intake function at the same path the booking form posts to,
//! plus a JSON/HTML view of the related-links lists.

use crate::config::cli::LocalStorage;
use crate::core::intake::{ConsultationIntake, IntakeOutcome};
use crate::core::links::RelatedLinksSelector;
use crate::core::render::{render_related_links, LinkStyle};
use crate::domain::model::{ConsultationRequest, SubmissionResponse};
use axum::{
    extract::{rejection::JsonRejection, Json, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub struct AppState {
    pub selector: RelatedLinksSelector,
    pub intake: ConsultationIntake<LocalStorage>,
}

#[derive(Debug, Deserialize)]
pub struct RelatedLinksQuery {
    pub city: String,
    pub region: String,
    #[serde(default)]
    pub format: Option<String>,
}

pub fn create_router(state: Arc<AppState>, function_path: &str) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/api/related-links", get(related_links))
        .route(function_path, post(submit_consultation))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn related_links(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RelatedLinksQuery>,
) -> Response {
    let links = state.selector.select_slug(&query.city, &query.region);
    match query.format.as_deref() {
        Some("html") => Html(render_related_links(&links, LinkStyle::Hash)).into_response(),
        _ => Json(links).into_response(),
    }
}

async fn submit_consultation(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ConsultationRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            tracing::warn!("Unreadable consultation payload: {}", rejection.body_text());
            let body = SubmissionResponse::failed(rejection.body_text());
            return (rejection.status(), Json(body)).into_response();
        }
    };

    // 400 for a bad payload, 500 when filing it failed
    let outcome = state.intake.process(request).await;
    let status = match &outcome {
        IntakeOutcome::Accepted { .. } => StatusCode::OK,
        IntakeOutcome::Rejected(_) => StatusCode::BAD_REQUEST,
        IntakeOutcome::Failed => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(outcome.into_response())).into_response()
}
