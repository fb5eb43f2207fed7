use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::handlers::*;
use crate::services::patient::PatientDirectoryService;

pub fn patient_routes(directory: Arc<PatientDirectoryService>) -> Router {
    Router::new()
        .route("/", post(register_patient))
        .route("/{patient_id}", get(get_patient))
        .route("/{patient_id}/contact", put(update_patient_contact))
        .with_state(directory)
}
