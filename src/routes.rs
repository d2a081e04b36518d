use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use crate::dispatch::{HealthResponse, LanguagesResponse};
use crate::error::TranslationError;
use crate::state::AppState;
use crate::translate::{TranslateRequest, TranslateResponse};

pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/translate", post(translate))
        .route("/languages", get(get_languages))
        .route("/health", get(health_check))
}

/// Routes plus CORS and request tracing, with state attached.
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.allowed_origins);
    create_routes()
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS restricted to the configured origins; unparseable origins are skipped.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Ignoring invalid CORS origin {:?}: {}", origin, e);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}

async fn translate(
    State(state): State<AppState>,
    payload: Result<Json<TranslateRequest>, JsonRejection>,
) -> Result<Json<TranslateResponse>, TranslationError> {
    let Json(request) = payload.map_err(|rejection| match rejection {
        JsonRejection::MissingJsonContentType(_) => {
            TranslationError::Validation("No JSON data provided".to_string())
        }
        other => TranslationError::Validation(format!("Invalid JSON data: {}", other.body_text())),
    })?;

    let response = state.dispatcher.translate(request).await?;
    Ok(Json(response))
}

async fn get_languages(State(state): State<AppState>) -> Json<LanguagesResponse> {
    Json(state.dispatcher.languages())
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(state.dispatcher.health())
}
