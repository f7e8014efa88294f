use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::error::ApiError;
use crate::features::{encode, FeatureVector, FEATURE_NAMES};
use crate::input::RawInputForm;
use crate::predictor::{Prediction, Predictor};
use crate::schema::align;

// Shared, read-only for the life of the process
pub struct AppState {
    pub predictor: Predictor,
}

pub fn router(state: Arc<AppState>) -> Router {
    // Allows a local HTML form to talk to this API
    let cors = CorsLayer::new()
        .allow_methods(tower_http::cors::Any)
        .allow_origin(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any);

    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/schema", get(expected_schema))
        .route("/predict", post(predict))
        .route("/features", post(features))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

// --- API DTOs ---

#[derive(Serialize)]
struct FeaturesResponse {
    features: FeatureVector,
    aligned: Vec<f64>,
    missing: Vec<String>,
}

// --- Handlers ---

async fn expected_schema(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    Json(state.predictor.schema().names().to_vec())
}

async fn predict(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RawInputForm>,
) -> Result<Json<Prediction>, ApiError> {
    let raw = payload.validate()?;
    let prediction = state.predictor.predict(&raw)?;
    Ok(Json(prediction))
}

async fn features(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RawInputForm>,
) -> Result<Json<FeaturesResponse>, ApiError> {
    let raw = payload.validate()?;
    let encoded = encode(&raw);
    let schema = state.predictor.schema();

    Ok(Json(FeaturesResponse {
        aligned: align(&encoded, schema),
        features: encoded,
        missing: schema
            .missing_features(&FEATURE_NAMES)
            .into_iter()
            .map(String::from)
            .collect(),
    }))
}
