use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::*;
use crate::services::practitioner::PractitionerDirectoryService;

pub fn practitioner_routes(directory: Arc<PractitionerDirectoryService>) -> Router {
    Router::new()
        .route("/", post(onboard_practitioner))
        .route("/", get(list_practitioners_by_specialty))
        .route("/{practitioner_id}", get(get_practitioner))
        .route(
            "/{practitioner_id}/deactivate",
            post(deactivate_practitioner),
        )
        .with_state(directory)
}
