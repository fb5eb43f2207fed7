// libs/scheduling-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use shared_models::error::AppError;

use crate::models::{ScheduleAppointmentRequest, SchedulingError};
use crate::services::availability::SlotAvailabilityService;
use crate::services::booking::BookingService;
use crate::services::lifecycle::AppointmentLifecycleService;

// ==============================================================================
// STATE AND QUERY PARAMETER STRUCTS
// ==============================================================================

#[derive(Clone)]
pub struct SchedulingState {
    pub booking: Arc<BookingService>,
    pub lifecycle: Arc<AppointmentLifecycleService>,
    pub availability: Arc<SlotAvailabilityService>,
}

#[derive(Debug, Deserialize)]
pub struct SlotCheckQuery {
    pub practitioner_id: Uuid,
    pub scheduled_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct DayScheduleQuery {
    pub date: NaiveDate,
}

impl From<SchedulingError> for AppError {
    fn from(err: SchedulingError) -> Self {
        match err {
            SchedulingError::NotFound => AppError::NotFound("Appointment not found".to_string()),
            SchedulingError::PatientNotFound => {
                AppError::NotFound("Patient not found".to_string())
            }
            SchedulingError::PractitionerNotFound => {
                AppError::NotFound("Practitioner not found".to_string())
            }
            SchedulingError::SlotUnavailable { .. } => AppError::Conflict(err.to_string()),
            SchedulingError::InvalidTransition { .. } => AppError::Conflict(err.to_string()),
            SchedulingError::ValidationError(msg) => AppError::ValidationError(msg),
            SchedulingError::Storage(e) => e.into(),
        }
    }
}

// ==============================================================================
// APPOINTMENT BOOKING HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn schedule_appointment(
    State(state): State<SchedulingState>,
    Json(request): Json<ScheduleAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let appointment = state.booking.schedule_appointment(request).await?;

    Ok(Json(json!({
        "success": true,
        "appointment": appointment,
        "message": "Appointment scheduled successfully"
    })))
}

#[axum::debug_handler]
pub async fn get_appointment(
    State(state): State<SchedulingState>,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let appointment = state.booking.get_appointment(appointment_id).await?;

    Ok(Json(json!(appointment)))
}

// ==============================================================================
// LIFECYCLE TRANSITION HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn confirm_appointment(
    State(state): State<SchedulingState>,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let appointment = state.lifecycle.confirm_appointment(appointment_id).await?;

    Ok(Json(json!({
        "success": true,
        "appointment": appointment,
        "message": "Appointment confirmed"
    })))
}

#[axum::debug_handler]
pub async fn cancel_appointment(
    State(state): State<SchedulingState>,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let appointment = state.lifecycle.cancel_appointment(appointment_id).await?;

    Ok(Json(json!({
        "success": true,
        "appointment": appointment,
        "message": "Appointment cancelled"
    })))
}

#[axum::debug_handler]
pub async fn complete_appointment(
    State(state): State<SchedulingState>,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let appointment = state.lifecycle.complete_appointment(appointment_id).await?;

    Ok(Json(json!({
        "success": true,
        "appointment": appointment,
        "message": "Appointment completed"
    })))
}

// ==============================================================================
// AVAILABILITY HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn check_slot_availability(
    State(state): State<SchedulingState>,
    Query(params): Query<SlotCheckQuery>,
) -> Result<Json<Value>, AppError> {
    let response = state
        .availability
        .check_slot(params.practitioner_id, params.scheduled_at)
        .await?;

    Ok(Json(json!(response)))
}

#[axum::debug_handler]
pub async fn get_practitioner_day_schedule(
    State(state): State<SchedulingState>,
    Path(practitioner_id): Path<Uuid>,
    Query(params): Query<DayScheduleQuery>,
) -> Result<Json<Value>, AppError> {
    let appointments = state
        .availability
        .day_schedule(practitioner_id, params.date)
        .await?;

    Ok(Json(json!({
        "practitioner_id": practitioner_id,
        "date": params.date,
        "appointments": appointments,
        "total": appointments.len()
    })))
}
