use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared_models::StorageError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Practitioner {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    /// Professional registration number. Unique per practitioner.
    pub license_number: String,
    pub specialty: String,
    /// Deactivated practitioners keep their record and history but cannot
    /// take new appointments.
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Practitioner {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnboardPractitionerRequest {
    pub first_name: String,
    pub last_name: String,
    pub license_number: String,
    pub specialty: String,
}

impl OnboardPractitionerRequest {
    pub fn validate(&self) -> Result<(), PractitionerError> {
        if self.first_name.trim().is_empty() || self.last_name.trim().is_empty() {
            return Err(PractitionerError::ValidationError(
                "first_name and last_name must not be blank".to_string(),
            ));
        }
        if self.license_number.trim().is_empty() {
            return Err(PractitionerError::ValidationError(
                "license_number must not be blank".to_string(),
            ));
        }
        if self.specialty.trim().is_empty() {
            return Err(PractitionerError::ValidationError(
                "specialty must not be blank".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum PractitionerError {
    #[error("Practitioner not found")]
    NotFound,

    #[error("Practitioner with license number {license_number} already exists")]
    LicenseNumberInUse { license_number: String },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
