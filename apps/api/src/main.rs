use std::sync::Arc;
use dotenv::dotenv;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{self, TraceLayer};
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod router;

use patient_cell::memory::InMemoryPatientStore;
use patient_cell::ports::PatientRepository;
use patient_cell::services::patient::PatientDirectoryService;
use practitioner_cell::memory::InMemoryPractitionerStore;
use practitioner_cell::ports::PractitionerRepository;
use practitioner_cell::services::practitioner::PractitionerDirectoryService;
use scheduling_cell::handlers::SchedulingState;
use scheduling_cell::memory::InMemoryAppointmentStore;
use scheduling_cell::ports::AppointmentRepository;
use scheduling_cell::services::availability::SlotAvailabilityService;
use scheduling_cell::services::booking::BookingService;
use scheduling_cell::services::consistency::PractitionerLocks;
use scheduling_cell::services::lifecycle::AppointmentLifecycleService;
use shared_config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Loading Env Vars
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting clinic scheduling API server");

    // Load configuration
    let config = AppConfig::from_env();

    // In-memory adapters behind the repository ports
    let appointment_store: Arc<dyn AppointmentRepository> =
        Arc::new(InMemoryAppointmentStore::new());
    let patient_store: Arc<dyn PatientRepository> = Arc::new(InMemoryPatientStore::new());
    let practitioner_store: Arc<dyn PractitionerRepository> =
        Arc::new(InMemoryPractitionerStore::new());

    // Cell services
    let patient_directory = Arc::new(PatientDirectoryService::new(patient_store.clone()));
    let practitioner_directory = Arc::new(PractitionerDirectoryService::new(
        practitioner_store.clone(),
    ));
    let availability = Arc::new(SlotAvailabilityService::new(appointment_store.clone()));
    let locks = Arc::new(PractitionerLocks::new(config.slot_lock_wait()));
    let scheduling = SchedulingState {
        booking: Arc::new(BookingService::new(
            appointment_store.clone(),
            patient_store,
            practitioner_store,
            availability.clone(),
            locks,
        )),
        lifecycle: Arc::new(AppointmentLifecycleService::new(appointment_store)),
        availability,
    };

    // Set up CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the application router
    let app = router::create_router(patient_directory, practitioner_directory, scheduling)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(trace::DefaultMakeSpan::new().level(Level::INFO))
                .on_response(trace::DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors);

    // Run the server
    info!("Listening on {}", config.bind_address);

    let listener = TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
