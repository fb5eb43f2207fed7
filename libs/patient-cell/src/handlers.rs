use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use shared_models::error::AppError;

use crate::models::{PatientError, RegisterPatientRequest, UpdatePatientContactRequest};
use crate::services::patient::PatientDirectoryService;

impl From<PatientError> for AppError {
    fn from(err: PatientError) -> Self {
        match err {
            PatientError::NotFound => AppError::NotFound("Patient not found".to_string()),
            PatientError::LegalIdentifierInUse { .. } => AppError::Conflict(err.to_string()),
            PatientError::InvalidDateOfBirth => AppError::ValidationError(err.to_string()),
            PatientError::ValidationError(msg) => AppError::ValidationError(msg),
            PatientError::Storage(e) => e.into(),
        }
    }
}

#[axum::debug_handler]
pub async fn register_patient(
    State(directory): State<Arc<PatientDirectoryService>>,
    Json(request): Json<RegisterPatientRequest>,
) -> Result<Json<Value>, AppError> {
    let patient = directory.register_patient(request).await?;

    Ok(Json(json!({
        "success": true,
        "patient": patient,
        "message": "Patient registered successfully"
    })))
}

#[axum::debug_handler]
pub async fn get_patient(
    State(directory): State<Arc<PatientDirectoryService>>,
    Path(patient_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let patient = directory.get_patient(patient_id).await?;

    Ok(Json(json!(patient)))
}

#[axum::debug_handler]
pub async fn update_patient_contact(
    State(directory): State<Arc<PatientDirectoryService>>,
    Path(patient_id): Path<Uuid>,
    Json(request): Json<UpdatePatientContactRequest>,
) -> Result<Json<Value>, AppError> {
    let patient = directory.update_contact(patient_id, request).await?;

    Ok(Json(json!({
        "success": true,
        "patient": patient,
        "message": "Contact details updated"
    })))
}
