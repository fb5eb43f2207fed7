// libs/scheduling-cell/src/models.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use shared_models::StorageError;

// ==============================================================================
// CORE APPOINTMENT MODELS
// ==============================================================================

/// A booked visit at a single instant. Appointments are immutable values:
/// lifecycle methods consume the current value and return the next one, so a
/// stale copy can never be mutated in place. Patient, practitioner and slot
/// never change after construction; rescheduling is cancel plus a new booking.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Appointment {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub practitioner_id: Uuid,
    pub scheduled_at: DateTime<Utc>,
    pub status: AppointmentStatus,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Appointment {
    /// Entry state for every new booking.
    pub fn schedule(
        patient_id: Uuid,
        practitioner_id: Uuid,
        scheduled_at: DateTime<Utc>,
        reason: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            patient_id,
            practitioner_id,
            scheduled_at,
            status: AppointmentStatus::Pending,
            reason,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn confirm(self, now: DateTime<Utc>) -> Result<Self, SchedulingError> {
        self.apply(AppointmentTransition::Confirm, now)
    }

    pub fn cancel(self, now: DateTime<Utc>) -> Result<Self, SchedulingError> {
        self.apply(AppointmentTransition::Cancel, now)
    }

    pub fn complete(self, now: DateTime<Utc>) -> Result<Self, SchedulingError> {
        self.apply(AppointmentTransition::Complete, now)
    }

    fn apply(
        self,
        transition: AppointmentTransition,
        now: DateTime<Utc>,
    ) -> Result<Self, SchedulingError> {
        if !self.status.allows(transition) {
            return Err(SchedulingError::InvalidTransition {
                from: self.status,
                attempted: transition,
            });
        }

        Ok(Self {
            status: transition.target_status(),
            updated_at: now,
            ..self
        })
    }

    /// Whether this appointment still occupies its slot. Cancelled
    /// appointments free the slot for rebooking; everything else holds it.
    pub fn blocks_slot(&self) -> bool {
        self.status != AppointmentStatus::Cancelled
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            AppointmentStatus::Completed | AppointmentStatus::Cancelled
        )
    }

    pub fn allows(&self, transition: AppointmentTransition) -> bool {
        match (self, transition) {
            (AppointmentStatus::Pending, AppointmentTransition::Confirm) => true,
            (AppointmentStatus::Pending, AppointmentTransition::Cancel) => true,
            (AppointmentStatus::Confirmed, AppointmentTransition::Cancel) => true,
            (AppointmentStatus::Confirmed, AppointmentTransition::Complete) => true,
            _ => false,
        }
    }

    pub fn valid_transitions(&self) -> Vec<AppointmentTransition> {
        match self {
            AppointmentStatus::Pending => vec![
                AppointmentTransition::Confirm,
                AppointmentTransition::Cancel,
            ],
            AppointmentStatus::Confirmed => vec![
                AppointmentTransition::Complete,
                AppointmentTransition::Cancel,
            ],
            AppointmentStatus::Completed | AppointmentStatus::Cancelled => vec![],
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Pending => write!(f, "PENDING"),
            AppointmentStatus::Confirmed => write!(f, "CONFIRMED"),
            AppointmentStatus::Completed => write!(f, "COMPLETED"),
            AppointmentStatus::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentTransition {
    Confirm,
    Cancel,
    Complete,
}

impl AppointmentTransition {
    pub fn target_status(&self) -> AppointmentStatus {
        match self {
            AppointmentTransition::Confirm => AppointmentStatus::Confirmed,
            AppointmentTransition::Cancel => AppointmentStatus::Cancelled,
            AppointmentTransition::Complete => AppointmentStatus::Completed,
        }
    }
}

impl fmt::Display for AppointmentTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentTransition::Confirm => write!(f, "confirm"),
            AppointmentTransition::Cancel => write!(f, "cancel"),
            AppointmentTransition::Complete => write!(f, "complete"),
        }
    }
}

// ==============================================================================
// REQUEST/RESPONSE MODELS
// ==============================================================================

pub const MAX_REASON_LENGTH: usize = 500;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleAppointmentRequest {
    pub patient_id: Uuid,
    pub practitioner_id: Uuid,
    pub scheduled_at: DateTime<Utc>,
    pub reason: Option<String>,
}

impl ScheduleAppointmentRequest {
    pub fn validate(&self) -> Result<(), SchedulingError> {
        if self.patient_id.is_nil() {
            return Err(SchedulingError::ValidationError(
                "patient_id must not be nil".to_string(),
            ));
        }
        if self.practitioner_id.is_nil() {
            return Err(SchedulingError::ValidationError(
                "practitioner_id must not be nil".to_string(),
            ));
        }
        if let Some(reason) = &self.reason {
            if reason.chars().count() > MAX_REASON_LENGTH {
                return Err(SchedulingError::ValidationError(format!(
                    "reason exceeds {} characters",
                    MAX_REASON_LENGTH
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotCheckResponse {
    pub practitioner_id: Uuid,
    pub scheduled_at: DateTime<Utc>,
    pub available: bool,
    pub conflicting_appointments: Vec<Appointment>,
    pub suggested_alternatives: Vec<DateTime<Utc>>,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Clone, thiserror::Error)]
pub enum SchedulingError {
    #[error("Appointment not found")]
    NotFound,

    #[error("Patient not found")]
    PatientNotFound,

    #[error("Practitioner not found")]
    PractitionerNotFound,

    #[error("Slot not available for practitioner {practitioner_id} at {scheduled_at}")]
    SlotUnavailable {
        practitioner_id: Uuid,
        scheduled_at: DateTime<Utc>,
    },

    #[error("Cannot {attempted} an appointment in status {from}")]
    InvalidTransition {
        from: AppointmentStatus,
        attempted: AppointmentTransition,
    },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

// ==============================================================================
// TESTS
// ==============================================================================
