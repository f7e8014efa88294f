use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use road_risk::api::{self, AppState};
use road_risk::config::Config;
use road_risk::features::FEATURE_NAMES;
use road_risk::predictor::Predictor;
use road_risk::schema::ExpectedSchema;
use road_risk::scoring::LinearModel;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "road_risk=info,tower_http=debug,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    tracing::info!("Configuration:");
    tracing::info!("  SCHEMA_PATH: {}", config.schema_path.display());
    tracing::info!("  MODEL_PATH: {}", config.model_path.display());
    tracing::info!("  BIND_ADDR: {}", config.bind_addr);

    // 1. Load the model's column contract. Nothing is served without it.
    let schema = ExpectedSchema::load(&config.schema_path)?;
    tracing::info!("Loaded expected schema ({} columns)", schema.len());

    let unfilled = schema.missing_features(&FEATURE_NAMES);
    if !unfilled.is_empty() {
        tracing::warn!("Schema columns never produced by the encoder (scored as 0): {:?}", unfilled);
    }

    // 2. Load the scoring artifact, bound to the schema order
    let model = LinearModel::load(&config.model_path, &schema)?;
    tracing::info!("Loaded scoring model ({} weights)", model.dimension());

    let shared_state = Arc::new(AppState {
        predictor: Predictor::new(schema, Box::new(model)),
    });

    // 3. Serve
    let app = api::router(shared_state);

    tracing::info!("API server running on http://{}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
