use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde_json::{json, Value};

use super::classifier::{ChurnClassifier, ModelInfo};
use super::domain::CustomerProfile;
use super::risk::RiskAssessment;
use super::service::ChurnPredictionService;
use crate::error::AppError;

/// Router builder exposing the prediction, risk, and model endpoints.
pub fn prediction_router<C>(service: Arc<ChurnPredictionService<C>>) -> Router
where
    C: ChurnClassifier + ?Sized + 'static,
{
    Router::new()
        .route("/api/v1/churn/predict", post(predict_handler::<C>))
        .route("/api/v1/churn/risk", post(risk_handler::<C>))
        .route("/api/v1/churn/model", get(model_handler::<C>))
        .with_state(service)
}

pub(crate) async fn predict_handler<C>(
    State(service): State<Arc<ChurnPredictionService<C>>>,
    payload: Result<Json<CustomerProfile>, JsonRejection>,
) -> Result<Json<Value>, AppError>
where
    C: ChurnClassifier + ?Sized + 'static,
{
    let Json(profile) = payload?;
    let prediction = service.evaluate(&profile)?;

    Ok(Json(json!({
        "evaluated_at": Utc::now(),
        "prediction": prediction,
    })))
}

pub(crate) async fn risk_handler<C>(
    State(service): State<Arc<ChurnPredictionService<C>>>,
    payload: Result<Json<CustomerProfile>, JsonRejection>,
) -> Result<Json<RiskAssessment>, AppError>
where
    C: ChurnClassifier + ?Sized + 'static,
{
    let Json(profile) = payload?;
    Ok(Json(service.assess_risk(&profile)))
}

pub(crate) async fn model_handler<C>(
    State(service): State<Arc<ChurnPredictionService<C>>>,
) -> Json<ModelInfo>
where
    C: ChurnClassifier + ?Sized + 'static,
{
    Json(service.model_info())
}
