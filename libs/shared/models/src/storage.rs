use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

/// Failures surfaced by repository adapters. Domain services propagate these
/// unmodified; only the HTTP layer translates them.
#[derive(Error, Debug, Clone)]
pub enum StorageError {
    #[error("slot already booked for practitioner {practitioner_id} at {scheduled_at}")]
    SlotTaken {
        practitioner_id: Uuid,
        scheduled_at: DateTime<Utc>,
    },

    #[error("stale write: expected version {expected}, found {actual}")]
    VersionConflict {
        expected: DateTime<Utc>,
        actual: DateTime<Utc>,
    },

    #[error("storage backend error: {0}")]
    Backend(String),
}
