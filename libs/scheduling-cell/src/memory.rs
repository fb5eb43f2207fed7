// libs/scheduling-cell/src/memory.rs
use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use shared_models::StorageError;

use crate::models::Appointment;
use crate::ports::AppointmentRepository;

/// Reference implementation of the appointment port, used by the local server
/// and the test suites. Enforces the same contract a row-backed adapter must:
/// one blocking appointment per (practitioner, instant), stale writes refused.
#[derive(Default)]
pub struct InMemoryAppointmentStore {
    appointments: RwLock<HashMap<Uuid, Appointment>>,
}

impl InMemoryAppointmentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AppointmentRepository for InMemoryAppointmentStore {
    async fn save(&self, appointment: &Appointment) -> Result<(), StorageError> {
        let mut appointments = self.appointments.write().await;

        let slot_taken = appointments.values().any(|existing| {
            existing.id != appointment.id
                && existing.practitioner_id == appointment.practitioner_id
                && existing.scheduled_at == appointment.scheduled_at
                && existing.blocks_slot()
        });
        if slot_taken {
            return Err(StorageError::SlotTaken {
                practitioner_id: appointment.practitioner_id,
                scheduled_at: appointment.scheduled_at,
            });
        }

        appointments.insert(appointment.id, appointment.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Appointment>, StorageError> {
        Ok(self.appointments.read().await.get(&id).cloned())
    }

    async fn find_by_practitioner_in_window(
        &self,
        practitioner_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Appointment>, StorageError> {
        let appointments = self.appointments.read().await;

        let mut matching: Vec<Appointment> = appointments
            .values()
            .filter(|a| {
                a.practitioner_id == practitioner_id
                    && a.scheduled_at >= from
                    && a.scheduled_at < to
            })
            .cloned()
            .collect();
        matching.sort_by_key(|a| a.scheduled_at);

        Ok(matching)
    }

    async fn update(
        &self,
        appointment: &Appointment,
        expected_updated_at: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        let mut appointments = self.appointments.write().await;

        let current = appointments.get(&appointment.id).ok_or_else(|| {
            StorageError::Backend(format!("appointment {} is not stored", appointment.id))
        })?;
        if current.updated_at != expected_updated_at {
            return Err(StorageError::VersionConflict {
                expected: expected_updated_at,
                actual: current.updated_at,
            });
        }

        appointments.insert(appointment.id, appointment.clone());
        Ok(())
    }
}
