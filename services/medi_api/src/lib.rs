//! HTTP front end for the Medi risk models.
//!
//! Models are loaded once into an [`AppState`] before the router is built and
//! are never reloaded; handlers share them read-only through an `Arc`.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use medi_risk::ModelSet;
use tower_http::cors::CorsLayer;

pub use config::{load_config, ConfigError, ServiceConfig};
pub use error::{ApiError, StartupError};
pub use routes::StatusResponse;

pub const SERVICE_TITLE: &str = "AI Smart Healthcare System";
pub const STATUS_MESSAGE: &str = "AI Smart Healthcare API running 🚀";

#[derive(Debug)]
pub struct AppState {
    pub config: ServiceConfig,
    pub models: ModelSet,
}

impl AppState {
    pub fn new(config: ServiceConfig, models: ModelSet) -> Self {
        Self { config, models }
    }
}

/// Load every model from `config.model_dir`. A missing or corrupt artifact
/// is fatal: the service must not start without all three.
pub fn build_app_state(config: ServiceConfig) -> Result<Arc<AppState>, StartupError> {
    let models = ModelSet::load(&config.model_dir)?;
    Ok(Arc::new(AppState::new(config, models)))
}

/// Routes plus a CORS policy that lets any origin call the API.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::status_handler))
        .route("/predict", post(routes::predict_handler))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}
