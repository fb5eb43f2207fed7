// libs/scheduling-cell/tests/availability_test.rs
//
// Slot checker tests over the in-memory store: the conflict predicate is
// exact-instant equality among non-cancelled appointments, nothing wider.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use scheduling_cell::memory::InMemoryAppointmentStore;
use scheduling_cell::models::Appointment;
use scheduling_cell::ports::AppointmentRepository;
use scheduling_cell::services::availability::SlotAvailabilityService;

struct TestSetup {
    appointments: Arc<InMemoryAppointmentStore>,
    availability: SlotAvailabilityService,
    practitioner_id: Uuid,
}

impl TestSetup {
    fn new() -> Self {
        let appointments = Arc::new(InMemoryAppointmentStore::new());
        let appointment_port: Arc<dyn AppointmentRepository> = appointments.clone();
        let availability = SlotAvailabilityService::new(appointment_port);

        Self {
            appointments,
            availability,
            practitioner_id: Uuid::new_v4(),
        }
    }

    async fn book(&self, scheduled_at: DateTime<Utc>) -> Appointment {
        let appointment = Appointment::schedule(
            Uuid::new_v4(),
            self.practitioner_id,
            scheduled_at,
            None,
            Utc::now(),
        );
        self.appointments.save(&appointment).await.unwrap();
        appointment
    }

    /// Books and immediately cancels, leaving a cancelled record at the slot.
    async fn book_cancelled(&self, scheduled_at: DateTime<Utc>) {
        let appointment = self.book(scheduled_at).await;
        let read_version = appointment.updated_at;
        let cancelled = appointment.cancel(Utc::now()).unwrap();
        self.appointments
            .update(&cancelled, read_version)
            .await
            .unwrap();
    }
}

fn tomorrow_at(hour: u32, minute: u32) -> DateTime<Utc> {
    (Utc::now() + Duration::days(1))
        .date_naive()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
        .and_utc()
}

#[tokio::test]
async fn test_an_unbooked_slot_is_available() {
    let setup = TestSetup::new();

    let slot = setup
        .availability
        .check_slot(setup.practitioner_id, tomorrow_at(9, 0))
        .await
        .unwrap();

    assert!(slot.available);
    assert!(slot.conflicting_appointments.is_empty());
    assert!(slot.suggested_alternatives.is_empty());
}

#[tokio::test]
async fn test_a_booked_slot_reports_its_conflict() {
    let setup = TestSetup::new();
    let instant = tomorrow_at(10, 0);
    let existing = setup.book(instant).await;

    let slot = setup
        .availability
        .check_slot(setup.practitioner_id, instant)
        .await
        .unwrap();

    assert!(!slot.available);
    assert_eq!(slot.conflicting_appointments.len(), 1);
    assert_eq!(slot.conflicting_appointments[0].id, existing.id);
    assert!(!slot.suggested_alternatives.contains(&instant));
}

#[tokio::test]
async fn test_adjacent_instants_never_conflict() {
    let setup = TestSetup::new();
    let instant = tomorrow_at(11, 0);
    setup.book(instant).await;

    // One minute apart is a different slot under the exact-instant policy.
    let slot = setup
        .availability
        .check_slot(setup.practitioner_id, instant + Duration::minutes(1))
        .await
        .unwrap();

    assert!(slot.available);
    assert!(slot.conflicting_appointments.is_empty());
}

#[tokio::test]
async fn test_cancelled_appointments_never_block_a_slot() {
    let setup = TestSetup::new();
    let instant = tomorrow_at(12, 0);

    // Several cancelled bookings can pile up at one instant; none of them
    // holds the slot.
    setup.book_cancelled(instant).await;
    setup.book_cancelled(instant).await;
    setup.book_cancelled(instant).await;

    let slot = setup
        .availability
        .check_slot(setup.practitioner_id, instant)
        .await
        .unwrap();

    assert!(slot.available);
    assert!(slot.conflicting_appointments.is_empty());
}

#[tokio::test]
async fn test_other_practitioners_do_not_conflict() {
    let setup = TestSetup::new();
    let instant = tomorrow_at(13, 0);

    let other = Appointment::schedule(Uuid::new_v4(), Uuid::new_v4(), instant, None, Utc::now());
    setup.appointments.save(&other).await.unwrap();

    let slot = setup
        .availability
        .check_slot(setup.practitioner_id, instant)
        .await
        .unwrap();

    assert!(slot.available);
}

#[tokio::test]
async fn test_day_schedule_is_bounded_by_the_calendar_day() {
    let setup = TestSetup::new();
    let first_slot = tomorrow_at(0, 0);
    let last_slot = tomorrow_at(23, 30);

    let opening = setup.book(first_slot).await;
    let closing = setup.book(last_slot).await;
    // Midnight of the following day belongs to the next schedule.
    setup.book(first_slot + Duration::days(1)).await;

    let day = setup
        .availability
        .day_schedule(setup.practitioner_id, first_slot.date_naive())
        .await
        .unwrap();

    assert_eq!(day.len(), 2);
    assert_eq!(day[0].id, opening.id);
    assert_eq!(day[1].id, closing.id);
}
