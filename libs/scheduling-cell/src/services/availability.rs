use chrono::{DateTime, Duration, NaiveDate, Utc};
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::models::{Appointment, SchedulingError, SlotCheckResponse};
use crate::ports::AppointmentRepository;

const FIRST_SLOT_HOUR: u32 = 8;
const LAST_SLOT_HOUR: u32 = 20;
const SLOT_STEP_MINUTES: i64 = 30;
const MAX_SUGGESTIONS: usize = 3;

/// Answers "is this slot free?" without reserving anything. Two appointments
/// collide only when they share the exact same instant; duration-aware overlap
/// would need appointments to carry a length, which they do not.
pub struct SlotAvailabilityService {
    appointments: Arc<dyn AppointmentRepository>,
}

impl SlotAvailabilityService {
    pub fn new(appointments: Arc<dyn AppointmentRepository>) -> Self {
        Self { appointments }
    }

    /// Pure query: reports the slot's state at the moment of the check. The
    /// booking flow re-checks under the practitioner lock before persisting.
    pub async fn check_slot(
        &self,
        practitioner_id: Uuid,
        scheduled_at: DateTime<Utc>,
    ) -> Result<SlotCheckResponse, SchedulingError> {
        debug!(
            "Checking slot for practitioner {} at {}",
            practitioner_id, scheduled_at
        );

        let day = self
            .day_schedule(practitioner_id, scheduled_at.date_naive())
            .await?;

        let conflicting_appointments: Vec<Appointment> = day
            .iter()
            .filter(|a| a.scheduled_at == scheduled_at && a.blocks_slot())
            .cloned()
            .collect();

        let available = conflicting_appointments.is_empty();
        let suggested_alternatives = if available {
            vec![]
        } else {
            warn!(
                "Slot conflict for practitioner {} at {} - {} blocking appointment(s)",
                practitioner_id,
                scheduled_at,
                conflicting_appointments.len()
            );
            same_day_alternatives(&day, scheduled_at)
        };

        Ok(SlotCheckResponse {
            practitioner_id,
            scheduled_at,
            available,
            conflicting_appointments,
            suggested_alternatives,
        })
    }

    /// Every appointment of one practitioner on one UTC calendar day,
    /// cancelled ones included, ordered by slot.
    pub async fn day_schedule(
        &self,
        practitioner_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<Appointment>, SchedulingError> {
        let from = date.and_hms_opt(0, 0, 0).unwrap().and_utc();
        let to = from + Duration::days(1);

        let appointments = self
            .appointments
            .find_by_practitioner_in_window(practitioner_id, from, to)
            .await?;

        Ok(appointments)
    }
}

/// Free same-day slots near the requested one, on the half-hour grid within
/// clinic hours. The requested instant itself is never suggested back.
fn same_day_alternatives(
    day: &[Appointment],
    requested: DateTime<Utc>,
) -> Vec<DateTime<Utc>> {
    let day_start = requested
        .date_naive()
        .and_hms_opt(FIRST_SLOT_HOUR, 0, 0)
        .unwrap()
        .and_utc();
    let day_end = requested
        .date_naive()
        .and_hms_opt(LAST_SLOT_HOUR, 0, 0)
        .unwrap()
        .and_utc();

    let mut suggestions = Vec::new();
    let mut candidate = day_start;
    while candidate < day_end && suggestions.len() < MAX_SUGGESTIONS {
        let taken = candidate == requested
            || day
                .iter()
                .any(|a| a.scheduled_at == candidate && a.blocks_slot());
        if !taken {
            suggestions.push(candidate);
        }
        candidate += Duration::minutes(SLOT_STEP_MINUTES);
    }

    suggestions
}
