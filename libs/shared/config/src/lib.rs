use std::env;
use std::time::Duration;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_address: String,
    pub slot_lock_wait_ms: u64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            bind_address: env::var("BIND_ADDRESS").unwrap_or_else(|_| {
                warn!("BIND_ADDRESS not set, using default");
                "0.0.0.0:3000".to_string()
            }),
            slot_lock_wait_ms: env::var("SLOT_LOCK_WAIT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(|| {
                    warn!("SLOT_LOCK_WAIT_MS not set or invalid, using default");
                    5000
                }),
        }
    }

    /// Upper bound on how long a booking request waits for its
    /// practitioner's slot lock before giving up.
    pub fn slot_lock_wait(&self) -> Duration {
        Duration::from_millis(self.slot_lock_wait_ms)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
            slot_lock_wait_ms: 5000,
        }
    }
}
