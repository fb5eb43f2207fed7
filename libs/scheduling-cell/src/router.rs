// libs/scheduling-cell/src/router.rs
use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{self, SchedulingState};

pub fn scheduling_routes(state: SchedulingState) -> Router {
    Router::new()
        // Core booking
        .route("/", post(handlers::schedule_appointment))
        .route("/{appointment_id}", get(handlers::get_appointment))
        // Lifecycle transitions
        .route(
            "/{appointment_id}/confirm",
            post(handlers::confirm_appointment),
        )
        .route(
            "/{appointment_id}/cancel",
            post(handlers::cancel_appointment),
        )
        .route(
            "/{appointment_id}/complete",
            post(handlers::complete_appointment),
        )
        // Availability queries
        .route("/availability", get(handlers::check_slot_availability))
        .route(
            "/practitioners/{practitioner_id}/day",
            get(handlers::get_practitioner_day_schedule),
        )
        .with_state(state)
}
