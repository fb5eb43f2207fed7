use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::{
    Patient, PatientError, RegisterPatientRequest, UpdatePatientContactRequest,
};
use crate::ports::PatientRepository;

pub struct PatientDirectoryService {
    patients: Arc<dyn PatientRepository>,
}

impl PatientDirectoryService {
    pub fn new(patients: Arc<dyn PatientRepository>) -> Self {
        Self { patients }
    }

    /// Registers a new patient. The legal identifier must be unused; the
    /// medical record number is assigned here and never changes.
    pub async fn register_patient(
        &self,
        request: RegisterPatientRequest,
    ) -> Result<Patient, PatientError> {
        debug!(
            "Registering patient with legal identifier {}",
            request.legal_identifier
        );

        request.validate()?;

        if let Some(existing) = self
            .patients
            .find_by_legal_identifier(&request.legal_identifier)
            .await?
        {
            return Err(PatientError::LegalIdentifierInUse {
                legal_identifier: existing.legal_identifier,
            });
        }

        let now = Utc::now();
        let patient = Patient {
            id: Uuid::new_v4(),
            first_name: request.first_name,
            last_name: request.last_name,
            legal_identifier: request.legal_identifier,
            date_of_birth: request.date_of_birth,
            phone_number: request.phone_number,
            medical_record_number: generate_medical_record_number(),
            created_at: now,
            updated_at: now,
        };

        self.patients.save(&patient).await?;

        info!(
            "Patient {} registered with medical record number {}",
            patient.id, patient.medical_record_number
        );
        Ok(patient)
    }

    pub async fn get_patient(&self, id: Uuid) -> Result<Patient, PatientError> {
        self.patients
            .find_by_id(id)
            .await?
            .ok_or(PatientError::NotFound)
    }

    /// Contact details are the only mutable part of a patient record.
    pub async fn update_contact(
        &self,
        id: Uuid,
        request: UpdatePatientContactRequest,
    ) -> Result<Patient, PatientError> {
        if request.phone_number.trim().is_empty() {
            return Err(PatientError::ValidationError(
                "phone_number must not be blank".to_string(),
            ));
        }

        let mut patient = self.get_patient(id).await?;
        patient.phone_number = request.phone_number;
        patient.updated_at = Utc::now();

        self.patients.update(&patient).await?;

        debug!("Updated contact details for patient {}", id);
        Ok(patient)
    }
}

fn generate_medical_record_number() -> String {
    let token = Uuid::new_v4().simple().to_string();
    format!("MRN-{}", token[..8].to_uppercase())
}
