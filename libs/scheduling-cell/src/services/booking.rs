// libs/scheduling-cell/src/services/booking.rs
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use patient_cell::ports::PatientRepository;
use practitioner_cell::ports::PractitionerRepository;
use shared_models::StorageError;

use crate::models::{Appointment, ScheduleAppointmentRequest, SchedulingError};
use crate::ports::AppointmentRepository;
use crate::services::availability::SlotAvailabilityService;
use crate::services::consistency::PractitionerLocks;

/// The only entry point that creates appointments. Everything else in the
/// cell reads or transitions what this service has persisted.
pub struct BookingService {
    appointments: Arc<dyn AppointmentRepository>,
    patients: Arc<dyn PatientRepository>,
    practitioners: Arc<dyn PractitionerRepository>,
    availability: Arc<SlotAvailabilityService>,
    locks: Arc<PractitionerLocks>,
}

impl BookingService {
    pub fn new(
        appointments: Arc<dyn AppointmentRepository>,
        patients: Arc<dyn PatientRepository>,
        practitioners: Arc<dyn PractitionerRepository>,
        availability: Arc<SlotAvailabilityService>,
        locks: Arc<PractitionerLocks>,
    ) -> Self {
        Self {
            appointments,
            patients,
            practitioners,
            availability,
            locks,
        }
    }

    pub async fn schedule_appointment(
        &self,
        request: ScheduleAppointmentRequest,
    ) -> Result<Appointment, SchedulingError> {
        info!(
            "Scheduling appointment for patient {} with practitioner {} at {}",
            request.patient_id, request.practitioner_id, request.scheduled_at
        );

        // Step 1: reject malformed requests before touching storage
        request.validate()?;

        // Step 2: both referenced records must exist
        self.patients
            .find_by_id(request.patient_id)
            .await?
            .ok_or(SchedulingError::PatientNotFound)?;

        let practitioner = self
            .practitioners
            .find_by_id(request.practitioner_id)
            .await?
            .ok_or(SchedulingError::PractitionerNotFound)?;
        if !practitioner.active {
            return Err(SchedulingError::ValidationError(format!(
                "Practitioner {} is not accepting appointments",
                practitioner.id
            )));
        }

        // Step 3: serialize with competing bookings for this practitioner.
        // A timed-out wait means the caller lost the slot race.
        let _guard = self.locks.acquire(request.practitioner_id).await.ok_or(
            SchedulingError::SlotUnavailable {
                practitioner_id: request.practitioner_id,
                scheduled_at: request.scheduled_at,
            },
        )?;

        // Step 4: final slot check under the lock
        let slot = self
            .availability
            .check_slot(request.practitioner_id, request.scheduled_at)
            .await?;
        if !slot.available {
            return Err(SchedulingError::SlotUnavailable {
                practitioner_id: request.practitioner_id,
                scheduled_at: request.scheduled_at,
            });
        }

        // Step 5: persist. A storage-level uniqueness refusal means another
        // writer held the slot after all; the request has lost and is not
        // retried.
        let appointment = Appointment::schedule(
            request.patient_id,
            request.practitioner_id,
            request.scheduled_at,
            request.reason,
            Utc::now(),
        );

        match self.appointments.save(&appointment).await {
            Ok(()) => {}
            Err(StorageError::SlotTaken {
                practitioner_id,
                scheduled_at,
            }) => {
                warn!(
                    "Slot race lost at persistence for practitioner {} at {}",
                    practitioner_id, scheduled_at
                );
                return Err(SchedulingError::SlotUnavailable {
                    practitioner_id,
                    scheduled_at,
                });
            }
            Err(e) => return Err(SchedulingError::Storage(e)),
        }

        info!(
            "Appointment {} scheduled for practitioner {} at {}",
            appointment.id, appointment.practitioner_id, appointment.scheduled_at
        );

        Ok(appointment)
    }

    pub async fn get_appointment(&self, id: Uuid) -> Result<Appointment, SchedulingError> {
        self.appointments
            .find_by_id(id)
            .await?
            .ok_or(SchedulingError::NotFound)
    }
}
