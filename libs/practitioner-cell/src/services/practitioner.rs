use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::{OnboardPractitionerRequest, Practitioner, PractitionerError};
use crate::ports::PractitionerRepository;

pub struct PractitionerDirectoryService {
    practitioners: Arc<dyn PractitionerRepository>,
}

impl PractitionerDirectoryService {
    pub fn new(practitioners: Arc<dyn PractitionerRepository>) -> Self {
        Self { practitioners }
    }

    /// Onboards a practitioner. The license number must be unused; new
    /// practitioners start out active.
    pub async fn onboard_practitioner(
        &self,
        request: OnboardPractitionerRequest,
    ) -> Result<Practitioner, PractitionerError> {
        debug!(
            "Onboarding practitioner with license number {}",
            request.license_number
        );

        request.validate()?;

        if let Some(existing) = self
            .practitioners
            .find_by_license_number(&request.license_number)
            .await?
        {
            return Err(PractitionerError::LicenseNumberInUse {
                license_number: existing.license_number,
            });
        }

        let now = Utc::now();
        let practitioner = Practitioner {
            id: Uuid::new_v4(),
            first_name: request.first_name,
            last_name: request.last_name,
            license_number: request.license_number,
            specialty: request.specialty,
            active: true,
            created_at: now,
            updated_at: now,
        };

        self.practitioners.save(&practitioner).await?;

        info!("Practitioner {} onboarded", practitioner.id);
        Ok(practitioner)
    }

    pub async fn get_practitioner(&self, id: Uuid) -> Result<Practitioner, PractitionerError> {
        self.practitioners
            .find_by_id(id)
            .await?
            .ok_or(PractitionerError::NotFound)
    }

    /// The portal's browse flow: active practitioners in one specialty.
    pub async fn list_by_specialty(
        &self,
        specialty: &str,
    ) -> Result<Vec<Practitioner>, PractitionerError> {
        let practitioners = self.practitioners.list_by_specialty(specialty).await?;
        Ok(practitioners.into_iter().filter(|p| p.active).collect())
    }

    /// Soft removal. Existing appointments are untouched; new bookings are
    /// refused by the scheduling side. Deactivating twice is a no-op.
    pub async fn deactivate_practitioner(
        &self,
        id: Uuid,
    ) -> Result<Practitioner, PractitionerError> {
        let mut practitioner = self.get_practitioner(id).await?;
        if !practitioner.active {
            return Ok(practitioner);
        }

        practitioner.active = false;
        practitioner.updated_at = Utc::now();
        self.practitioners.update(&practitioner).await?;

        info!("Practitioner {} deactivated", id);
        Ok(practitioner)
    }
}
