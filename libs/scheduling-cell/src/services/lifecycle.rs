// libs/scheduling-cell/src/services/lifecycle.rs
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::{Appointment, AppointmentTransition, SchedulingError};
use crate::ports::AppointmentRepository;

/// Drives confirm, cancel and complete. The entity owns the transition guard;
/// this service adds the load-and-persist plumbing plus the optimistic
/// version check, so two racing transitions on one appointment cannot both
/// apply. A lost race surfaces as a storage conflict for the caller to
/// re-read and decide; nothing is retried here.
pub struct AppointmentLifecycleService {
    appointments: Arc<dyn AppointmentRepository>,
}

impl AppointmentLifecycleService {
    pub fn new(appointments: Arc<dyn AppointmentRepository>) -> Self {
        Self { appointments }
    }

    pub async fn confirm_appointment(&self, id: Uuid) -> Result<Appointment, SchedulingError> {
        self.apply_transition(id, AppointmentTransition::Confirm)
            .await
    }

    pub async fn cancel_appointment(&self, id: Uuid) -> Result<Appointment, SchedulingError> {
        self.apply_transition(id, AppointmentTransition::Cancel)
            .await
    }

    pub async fn complete_appointment(&self, id: Uuid) -> Result<Appointment, SchedulingError> {
        self.apply_transition(id, AppointmentTransition::Complete)
            .await
    }

    async fn apply_transition(
        &self,
        id: Uuid,
        transition: AppointmentTransition,
    ) -> Result<Appointment, SchedulingError> {
        let current = self
            .appointments
            .find_by_id(id)
            .await?
            .ok_or(SchedulingError::NotFound)?;
        let read_version = current.updated_at;

        debug!(
            "Applying {} to appointment {} in status {}",
            transition, id, current.status
        );

        let now = Utc::now();
        let next = match transition {
            AppointmentTransition::Confirm => current.confirm(now)?,
            AppointmentTransition::Cancel => current.cancel(now)?,
            AppointmentTransition::Complete => current.complete(now)?,
        };

        self.appointments.update(&next, read_version).await?;

        info!("Appointment {} moved to {}", id, next.status);
        Ok(next)
    }
}
