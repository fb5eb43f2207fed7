use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use shared_models::error::AppError;

use crate::models::{OnboardPractitionerRequest, PractitionerError};
use crate::services::practitioner::PractitionerDirectoryService;

#[derive(Debug, Deserialize)]
pub struct SpecialtyQuery {
    pub specialty: String,
}

impl From<PractitionerError> for AppError {
    fn from(err: PractitionerError) -> Self {
        match err {
            PractitionerError::NotFound => {
                AppError::NotFound("Practitioner not found".to_string())
            }
            PractitionerError::LicenseNumberInUse { .. } => AppError::Conflict(err.to_string()),
            PractitionerError::ValidationError(msg) => AppError::ValidationError(msg),
            PractitionerError::Storage(e) => e.into(),
        }
    }
}

#[axum::debug_handler]
pub async fn onboard_practitioner(
    State(directory): State<Arc<PractitionerDirectoryService>>,
    Json(request): Json<OnboardPractitionerRequest>,
) -> Result<Json<Value>, AppError> {
    let practitioner = directory.onboard_practitioner(request).await?;

    Ok(Json(json!({
        "success": true,
        "practitioner": practitioner,
        "message": "Practitioner onboarded successfully"
    })))
}

#[axum::debug_handler]
pub async fn get_practitioner(
    State(directory): State<Arc<PractitionerDirectoryService>>,
    Path(practitioner_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let practitioner = directory.get_practitioner(practitioner_id).await?;

    Ok(Json(json!(practitioner)))
}

#[axum::debug_handler]
pub async fn list_practitioners_by_specialty(
    State(directory): State<Arc<PractitionerDirectoryService>>,
    Query(params): Query<SpecialtyQuery>,
) -> Result<Json<Value>, AppError> {
    let practitioners = directory.list_by_specialty(&params.specialty).await?;

    Ok(Json(json!({
        "specialty": params.specialty,
        "practitioners": practitioners,
        "total": practitioners.len()
    })))
}

#[axum::debug_handler]
pub async fn deactivate_practitioner(
    State(directory): State<Arc<PractitionerDirectoryService>>,
    Path(practitioner_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let practitioner = directory.deactivate_practitioner(practitioner_id).await?;

    Ok(Json(json!({
        "success": true,
        "practitioner": practitioner,
        "message": "Practitioner deactivated"
    })))
}
