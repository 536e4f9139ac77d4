use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use medi_risk::{score, PatientFeatures, RiskReport};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::{AppState, STATUS_MESSAGE};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

/// `GET /`. Does not touch the models.
pub async fn status_handler() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: STATUS_MESSAGE.to_string(),
    })
}

/// `POST /predict`.
pub async fn predict_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PatientFeatures>, JsonRejection>,
) -> Result<Json<RiskReport>, ApiError> {
    let Json(features) = payload?;
    let report = score(&state.models, &features)?;
    log::info!(
        "scored patient: diabetes={} heart={} kidney={} any_risk={}",
        report.diabetes,
        report.heart,
        report.kidney,
        report.any_risk()
    );
    log::debug!("input {features:?}");
    Ok(Json(report))
}
