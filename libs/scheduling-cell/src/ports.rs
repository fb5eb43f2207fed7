// libs/scheduling-cell/src/ports.rs
//
// The scheduling core talks to persistence only through this trait. Adapters
// own storage-specific naming and mapping; the core stays backend-agnostic.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use shared_models::StorageError;

use crate::models::Appointment;

#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    /// Persist a freshly scheduled appointment. Adapters that enforce slot
    /// uniqueness report a lost race as `StorageError::SlotTaken`.
    async fn save(&self, appointment: &Appointment) -> Result<(), StorageError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Appointment>, StorageError>;

    /// All appointments for one practitioner with `from <= scheduled_at < to`,
    /// regardless of status.
    async fn find_by_practitioner_in_window(
        &self,
        practitioner_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Appointment>, StorageError>;

    /// Replace a stored appointment, guarded by the `updated_at` the caller
    /// read. A mismatch means a concurrent transition won; the write is
    /// rejected with `StorageError::VersionConflict`.
    async fn update(
        &self,
        appointment: &Appointment,
        expected_updated_at: DateTime<Utc>,
    ) -> Result<(), StorageError>;
}
