use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared_models::StorageError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Patient {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    /// National identifier presented at registration. Unique per patient.
    pub legal_identifier: String,
    pub date_of_birth: NaiveDate,
    pub phone_number: String,
    /// Assigned by the clinic at registration, never changed afterwards.
    pub medical_record_number: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Patient {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn age(&self) -> i32 {
        let today = chrono::Utc::now().date_naive();
        today.years_since(self.date_of_birth).unwrap_or(0) as i32
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterPatientRequest {
    pub first_name: String,
    pub last_name: String,
    pub legal_identifier: String,
    pub date_of_birth: NaiveDate,
    pub phone_number: String,
}

impl RegisterPatientRequest {
    pub fn validate(&self) -> Result<(), PatientError> {
        if self.first_name.trim().is_empty() || self.last_name.trim().is_empty() {
            return Err(PatientError::ValidationError(
                "first_name and last_name must not be blank".to_string(),
            ));
        }
        if self.legal_identifier.trim().is_empty() {
            return Err(PatientError::ValidationError(
                "legal_identifier must not be blank".to_string(),
            ));
        }
        if self.phone_number.trim().is_empty() {
            return Err(PatientError::ValidationError(
                "phone_number must not be blank".to_string(),
            ));
        }
        if self.date_of_birth > Utc::now().date_naive() {
            return Err(PatientError::InvalidDateOfBirth);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePatientContactRequest {
    pub phone_number: String,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum PatientError {
    #[error("Patient not found")]
    NotFound,

    #[error("Patient with legal identifier {legal_identifier} already exists")]
    LegalIdentifierInUse { legal_identifier: String },

    #[error("Invalid date of birth")]
    InvalidDateOfBirth,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
