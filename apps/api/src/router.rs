use std::sync::Arc;

use axum::{routing::get, Router};

use patient_cell::router::patient_routes;
use patient_cell::services::patient::PatientDirectoryService;
use practitioner_cell::router::practitioner_routes;
use practitioner_cell::services::practitioner::PractitionerDirectoryService;
use scheduling_cell::handlers::SchedulingState;
use scheduling_cell::router::scheduling_routes;

pub fn create_router(
    patient_directory: Arc<PatientDirectoryService>,
    practitioner_directory: Arc<PractitionerDirectoryService>,
    scheduling: SchedulingState,
) -> Router {
    Router::new()
        .route("/", get(|| async { "Clinic scheduling API is running!" }))
        .nest("/patients", patient_routes(patient_directory))
        .nest("/practitioners", practitioner_routes(practitioner_directory))
        .nest("/appointments", scheduling_routes(scheduling))
}
