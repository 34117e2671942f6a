//! # Availability Handlers
//!
//! Exposes a doctor's 30 minute slots for a date, each flagged as occupied or
//! free. The computation itself lives in `clinic_core::availability`; this
//! handler only resolves the request date and wires in the PostgreSQL stores.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use clinic_core::{
    availability::doctor_availability,
    models::slot::{AvailabilityQuery, DoctorAvailability},
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{handlers::today, middleware::error_handling::AppError, ApiState};

/// Lists the slots of a doctor's shift on a date
///
/// # Endpoint
///
/// ```text
/// GET /api/doctors/:id/availability?date=2025-03-14
/// ```
///
/// When `date` is omitted, today's date is used.
///
/// # Errors
///
/// * `ClinicError::NotFound` - No doctor with this ID
/// * `ClinicError::Validation` - The doctor has no end-of-shift time
/// * `ClinicError::Database` - Database error
#[axum::debug_handler]
pub async fn get_doctor_availability(
    State(state): State<Arc<ApiState>>,
    Path(doctor_id): Path<Uuid>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<DoctorAvailability>, AppError> {
    let store = state.store();

    let availability = doctor_availability(&store, &store, doctor_id, query.date, today()).await?;

    Ok(Json(availability))
}
