// libs/scheduling-cell/src/services/consistency.rs
//
// Serializes bookings per practitioner so the final availability check and
// the persisting write happen with no competing booking in between.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, warn};
use uuid::Uuid;

/// One mutex per practitioner, created on first use. The registry only grows
/// with the number of distinct practitioners, so no expiry is needed.
pub struct PractitionerLocks {
    locks: Mutex<HashMap<Uuid, Arc<Mutex<()>>>>,
    max_wait: Duration,
}

impl PractitionerLocks {
    pub fn new(max_wait: Duration) -> Self {
        Self {
            locks: Mutex::new(HashMap::new()),
            max_wait,
        }
    }

    /// Wait until this practitioner's lock is ours or `max_wait` elapses.
    /// `None` means the caller lost the slot race and should give up.
    pub async fn acquire(&self, practitioner_id: Uuid) -> Option<OwnedMutexGuard<()>> {
        let practitioner_lock = {
            let mut locks = self.locks.lock().await;
            locks
                .entry(practitioner_id)
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };

        match tokio::time::timeout(self.max_wait, practitioner_lock.lock_owned()).await {
            Ok(guard) => {
                debug!("Acquired booking lock for practitioner {}", practitioner_id);
                Some(guard)
            }
            Err(_) => {
                warn!(
                    "Timed out after {:?} waiting for practitioner {} booking lock",
                    self.max_wait, practitioner_id
                );
                None
            }
        }
    }
}
