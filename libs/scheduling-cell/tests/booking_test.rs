// libs/scheduling-cell/tests/booking_test.rs
//
// Booking flow tests over the in-memory stores: the reference check,
// availability check, per-practitioner lock and persistence working together.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use assert_matches::assert_matches;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use uuid::Uuid;

use patient_cell::memory::InMemoryPatientStore;
use patient_cell::models::Patient;
use patient_cell::ports::PatientRepository;
use practitioner_cell::memory::InMemoryPractitionerStore;
use practitioner_cell::models::Practitioner;
use practitioner_cell::ports::PractitionerRepository;
use scheduling_cell::memory::InMemoryAppointmentStore;
use scheduling_cell::models::{
    AppointmentStatus, ScheduleAppointmentRequest, SchedulingError,
};
use scheduling_cell::ports::AppointmentRepository;
use scheduling_cell::services::availability::SlotAvailabilityService;
use scheduling_cell::services::booking::BookingService;
use scheduling_cell::services::consistency::PractitionerLocks;
use scheduling_cell::services::lifecycle::AppointmentLifecycleService;

// ==============================================================================
// TEST FIXTURES AND UTILITIES
// ==============================================================================

struct TestSetup {
    appointments: Arc<InMemoryAppointmentStore>,
    patients: Arc<InMemoryPatientStore>,
    practitioners: Arc<InMemoryPractitionerStore>,
    booking: BookingService,
    lifecycle: AppointmentLifecycleService,
    patient: Patient,
    practitioner: Practitioner,
}

impl TestSetup {
    async fn new() -> Self {
        let appointments = Arc::new(InMemoryAppointmentStore::new());
        let patients = Arc::new(InMemoryPatientStore::new());
        let practitioners = Arc::new(InMemoryPractitionerStore::new());

        let patient = sample_patient("790412-0815");
        patients.save(&patient).await.unwrap();
        let practitioner = sample_practitioner("GMC-7701", true);
        practitioners.save(&practitioner).await.unwrap();

        let appointment_port: Arc<dyn AppointmentRepository> = appointments.clone();
        let patient_port: Arc<dyn PatientRepository> = patients.clone();
        let practitioner_port: Arc<dyn PractitionerRepository> = practitioners.clone();

        let availability = Arc::new(SlotAvailabilityService::new(appointment_port.clone()));
        let locks = Arc::new(PractitionerLocks::new(StdDuration::from_millis(250)));
        let booking = BookingService::new(
            appointment_port.clone(),
            patient_port,
            practitioner_port,
            availability,
            locks,
        );
        let lifecycle = AppointmentLifecycleService::new(appointment_port);

        Self {
            appointments,
            patients,
            practitioners,
            booking,
            lifecycle,
            patient,
            practitioner,
        }
    }

    fn request_at(&self, scheduled_at: DateTime<Utc>) -> ScheduleAppointmentRequest {
        ScheduleAppointmentRequest {
            patient_id: self.patient.id,
            practitioner_id: self.practitioner.id,
            scheduled_at,
            reason: Some("Routine check-up".to_string()),
        }
    }
}

fn sample_patient(legal_identifier: &str) -> Patient {
    let now = Utc::now();
    Patient {
        id: Uuid::new_v4(),
        first_name: "Ana".to_string(),
        last_name: "Ferreira".to_string(),
        legal_identifier: legal_identifier.to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(1979, 4, 12).unwrap(),
        phone_number: "+351 912 000 111".to_string(),
        medical_record_number: "MRN-TEST0001".to_string(),
        created_at: now,
        updated_at: now,
    }
}

fn sample_practitioner(license_number: &str, active: bool) -> Practitioner {
    let now = Utc::now();
    Practitioner {
        id: Uuid::new_v4(),
        first_name: "Joana".to_string(),
        last_name: "Sousa".to_string(),
        license_number: license_number.to_string(),
        specialty: "Cardiology".to_string(),
        active,
        created_at: now,
        updated_at: now,
    }
}

fn tomorrow_at(hour: u32) -> DateTime<Utc> {
    (Utc::now() + Duration::days(1))
        .date_naive()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
        .and_utc()
}

// ==============================================================================
// HAPPY PATH
// ==============================================================================

#[tokio::test]
async fn test_booking_a_free_slot_creates_a_pending_appointment() {
    let setup = TestSetup::new().await;
    let slot = tomorrow_at(10);

    let appointment = setup
        .booking
        .schedule_appointment(setup.request_at(slot))
        .await
        .unwrap();

    assert_eq!(appointment.status, AppointmentStatus::Pending);
    assert_eq!(appointment.patient_id, setup.patient.id);
    assert_eq!(appointment.practitioner_id, setup.practitioner.id);
    assert_eq!(appointment.scheduled_at, slot);
    assert_eq!(appointment.reason.as_deref(), Some("Routine check-up"));

    let stored = setup
        .appointments
        .find_by_id(appointment.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored, appointment);
}

// ==============================================================================
// SLOT CONFLICTS
// ==============================================================================

#[tokio::test]
async fn test_double_booking_the_same_slot_is_refused() {
    let setup = TestSetup::new().await;
    let slot = tomorrow_at(9);

    let second_patient = sample_patient("830227-1204");
    setup.patients.save(&second_patient).await.unwrap();

    setup
        .booking
        .schedule_appointment(setup.request_at(slot))
        .await
        .unwrap();

    let mut rival = setup.request_at(slot);
    rival.patient_id = second_patient.id;
    let result = setup.booking.schedule_appointment(rival).await;

    assert_matches!(
        result,
        Err(SchedulingError::SlotUnavailable {
            practitioner_id,
            scheduled_at,
        }) if practitioner_id == setup.practitioner.id && scheduled_at == slot
    );

    // The winner is the only stored appointment in the slot.
    let window = setup
        .appointments
        .find_by_practitioner_in_window(
            setup.practitioner.id,
            slot - Duration::hours(1),
            slot + Duration::hours(1),
        )
        .await
        .unwrap();
    assert_eq!(window.len(), 1);
    assert_eq!(window[0].patient_id, setup.patient.id);
}

#[tokio::test]
async fn test_cancelling_frees_the_slot_for_rebooking() {
    let setup = TestSetup::new().await;
    let slot = tomorrow_at(11);

    let first = setup
        .booking
        .schedule_appointment(setup.request_at(slot))
        .await
        .unwrap();
    setup.lifecycle.cancel_appointment(first.id).await.unwrap();

    let second = setup
        .booking
        .schedule_appointment(setup.request_at(slot))
        .await
        .unwrap();

    assert_ne!(second.id, first.id);
    assert_eq!(second.scheduled_at, slot);
    assert_eq!(second.status, AppointmentStatus::Pending);

    // The cancelled record stays on file.
    let cancelled = setup
        .appointments
        .find_by_id(first.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(cancelled.status, AppointmentStatus::Cancelled);
}

#[tokio::test]
async fn test_completed_appointments_keep_their_slot() {
    let setup = TestSetup::new().await;
    let slot = tomorrow_at(13);

    let appointment = setup
        .booking
        .schedule_appointment(setup.request_at(slot))
        .await
        .unwrap();
    setup
        .lifecycle
        .confirm_appointment(appointment.id)
        .await
        .unwrap();
    setup
        .lifecycle
        .complete_appointment(appointment.id)
        .await
        .unwrap();

    let result = setup.booking.schedule_appointment(setup.request_at(slot)).await;
    assert_matches!(result, Err(SchedulingError::SlotUnavailable { .. }));
}

// ==============================================================================
// REFERENCE AND VALIDATION FAILURES
// ==============================================================================

#[tokio::test]
async fn test_bookings_require_a_known_patient_and_practitioner() {
    let setup = TestSetup::new().await;
    let slot = tomorrow_at(14);

    let mut unknown_patient = setup.request_at(slot);
    unknown_patient.patient_id = Uuid::new_v4();
    assert_matches!(
        setup.booking.schedule_appointment(unknown_patient).await,
        Err(SchedulingError::PatientNotFound)
    );

    let mut unknown_practitioner = setup.request_at(slot);
    unknown_practitioner.practitioner_id = Uuid::new_v4();
    assert_matches!(
        setup.booking.schedule_appointment(unknown_practitioner).await,
        Err(SchedulingError::PractitionerNotFound)
    );
}

#[tokio::test]
async fn test_deactivated_practitioners_take_no_new_bookings() {
    let setup = TestSetup::new().await;

    let retired = sample_practitioner("GMC-0009", false);
    setup.practitioners.save(&retired).await.unwrap();

    let mut request = setup.request_at(tomorrow_at(15));
    request.practitioner_id = retired.id;

    assert_matches!(
        setup.booking.schedule_appointment(request).await,
        Err(SchedulingError::ValidationError(_))
    );
}

#[tokio::test]
async fn test_validation_failures_never_reach_storage() {
    let setup = TestSetup::new().await;
    let slot = tomorrow_at(16);

    let mut request = setup.request_at(slot);
    request.patient_id = Uuid::nil();
    assert_matches!(
        setup.booking.schedule_appointment(request).await,
        Err(SchedulingError::ValidationError(_))
    );

    let window = setup
        .appointments
        .find_by_practitioner_in_window(
            setup.practitioner.id,
            slot - Duration::hours(1),
            slot + Duration::hours(1),
        )
        .await
        .unwrap();
    assert!(window.is_empty());
}

#[tokio::test]
async fn test_get_appointment_reports_missing_ids_as_not_found() {
    let setup = TestSetup::new().await;

    let result = setup.booking.get_appointment(Uuid::new_v4()).await;
    assert_matches!(result, Err(SchedulingError::NotFound));
}

// ==============================================================================
// STORAGE FAILURES
// ==============================================================================

mod failing_storage {
    use super::*;
    use async_trait::async_trait;
    use mockall::mock;
    use scheduling_cell::models::Appointment;
    use shared_models::StorageError;

    mock! {
        pub AppointmentStore {}

        #[async_trait]
        impl AppointmentRepository for AppointmentStore {
            async fn save(&self, appointment: &Appointment) -> Result<(), StorageError>;

            async fn find_by_id(&self, id: Uuid) -> Result<Option<Appointment>, StorageError>;

            async fn find_by_practitioner_in_window(
                &self,
                practitioner_id: Uuid,
                from: DateTime<Utc>,
                to: DateTime<Utc>,
            ) -> Result<Vec<Appointment>, StorageError>;

            async fn update(
                &self,
                appointment: &Appointment,
                expected_updated_at: DateTime<Utc>,
            ) -> Result<(), StorageError>;
        }
    }

    async fn booking_over(mock: MockAppointmentStore) -> (BookingService, Patient, Practitioner) {
        let patients = Arc::new(InMemoryPatientStore::new());
        let practitioners = Arc::new(InMemoryPractitionerStore::new());

        let patient = sample_patient("610830-0457");
        patients.save(&patient).await.unwrap();
        let practitioner = sample_practitioner("GMC-5512", true);
        practitioners.save(&practitioner).await.unwrap();

        let patient_port: Arc<dyn PatientRepository> = patients;
        let practitioner_port: Arc<dyn PractitionerRepository> = practitioners;
        let appointment_port: Arc<dyn AppointmentRepository> = Arc::new(mock);

        let booking = BookingService::new(
            appointment_port.clone(),
            patient_port,
            practitioner_port,
            Arc::new(SlotAvailabilityService::new(appointment_port)),
            Arc::new(PractitionerLocks::new(StdDuration::from_millis(250))),
        );

        (booking, patient, practitioner)
    }

    #[tokio::test]
    async fn test_backend_failures_surface_as_storage_errors() {
        let mut mock = MockAppointmentStore::new();
        mock.expect_find_by_practitioner_in_window()
            .returning(|_, _, _| Ok(vec![]));
        mock.expect_save()
            .returning(|_| Err(StorageError::Backend("connection reset".to_string())));

        let (booking, patient, practitioner) = booking_over(mock).await;

        let request = ScheduleAppointmentRequest {
            patient_id: patient.id,
            practitioner_id: practitioner.id,
            scheduled_at: tomorrow_at(10),
            reason: None,
        };

        let result = booking.schedule_appointment(request).await;
        assert_matches!(
            result,
            Err(SchedulingError::Storage(StorageError::Backend(_)))
        );
    }

    #[tokio::test]
    async fn test_a_slot_race_lost_at_persistence_reads_as_unavailable() {
        let slot = tomorrow_at(12);

        let mut mock = MockAppointmentStore::new();
        mock.expect_find_by_practitioner_in_window()
            .returning(|_, _, _| Ok(vec![]));
        // The availability check saw a free slot, but another writer got the
        // row in first.
        mock.expect_save().returning(|appointment| {
            Err(StorageError::SlotTaken {
                practitioner_id: appointment.practitioner_id,
                scheduled_at: appointment.scheduled_at,
            })
        });

        let (booking, patient, practitioner) = booking_over(mock).await;

        let request = ScheduleAppointmentRequest {
            patient_id: patient.id,
            practitioner_id: practitioner.id,
            scheduled_at: slot,
            reason: None,
        };

        let result = booking.schedule_appointment(request).await;
        assert_matches!(
            result,
            Err(SchedulingError::SlotUnavailable { scheduled_at, .. }) if scheduled_at == slot
        );
    }
}
