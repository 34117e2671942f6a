//! # Appointment Handlers
//!
//! Booking re-checks the doctor's slot at write time: availability responses
//! are snapshots and may be stale by the time a booking arrives.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{NaiveDate, NaiveTime};
use clinic_core::{
    errors::ClinicError,
    models::appointment::{
        Appointment, AppointmentListQuery, AppointmentStatus, CreateAppointmentRequest,
        UpdateAppointmentRequest,
    },
    validation,
};
use clinic_db::errors::conflict_or_database;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{handlers::today, middleware::error_handling::AppError, ApiState};

async fn load_appointment(pool: &PgPool, id: Uuid) -> Result<Appointment, AppError> {
    let db_appointment = clinic_db::repositories::appointment::get_appointment_by_id(pool, id)
        .await
        .map_err(ClinicError::Database)?
        .ok_or_else(|| ClinicError::NotFound(format!("Appointment with ID {} not found", id)))?;

    Ok(Appointment::try_from(db_appointment)?)
}

fn slot_taken(date: NaiveDate, time: NaiveTime) -> String {
    format!(
        "The doctor already has an appointment on {} at {}",
        date,
        time.format("%H:%M")
    )
}

async fn ensure_patient_exists(pool: &PgPool, patient_id: Uuid) -> Result<(), AppError> {
    clinic_db::repositories::patient::get_patient_by_id(pool, patient_id)
        .await
        .map_err(ClinicError::Database)?
        .ok_or_else(|| ClinicError::NotFound(format!("Patient with ID {} not found", patient_id)))?;
    Ok(())
}

async fn ensure_doctor_exists(pool: &PgPool, doctor_id: Uuid) -> Result<(), AppError> {
    clinic_db::repositories::doctor::get_doctor_by_id(pool, doctor_id)
        .await
        .map_err(ClinicError::Database)?
        .ok_or_else(|| ClinicError::NotFound(format!("Doctor with ID {} not found", doctor_id)))?;
    Ok(())
}

/// Fails with a conflict when another active appointment holds the slot.
/// The partial unique index on `appointments` backs this check for
/// concurrent writers.
async fn ensure_slot_free(
    pool: &PgPool,
    doctor_id: Uuid,
    date: NaiveDate,
    time: NaiveTime,
    exclude: Option<Uuid>,
) -> Result<(), AppError> {
    let existing = clinic_db::repositories::appointment::find_active_booking(
        pool, doctor_id, date, time, exclude,
    )
    .await
    .map_err(ClinicError::Database)?;

    if let Some(existing) = existing {
        warn!(
            "Rejected booking for doctor {} at {} {}: held by appointment {}",
            doctor_id, date, time, existing.id
        );
        return Err(AppError(ClinicError::Conflict(slot_taken(date, time))));
    }
    Ok(())
}

/// Books an appointment in the `pending` state
///
/// # Errors
///
/// * `ClinicError::Validation` - Missing reason or a date in the past
/// * `ClinicError::NotFound` - Unknown patient or doctor
/// * `ClinicError::Conflict` - The doctor already has an active appointment at that time
#[axum::debug_handler]
pub async fn create_appointment(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateAppointmentRequest>,
) -> Result<Json<Appointment>, AppError> {
    validation::validate_appointment(&payload, today())?;

    ensure_patient_exists(&state.db_pool, payload.patient_id).await?;
    ensure_doctor_exists(&state.db_pool, payload.doctor_id).await?;
    ensure_slot_free(&state.db_pool, payload.doctor_id, payload.date, payload.time, None).await?;

    let db_appointment =
        clinic_db::repositories::appointment::create_appointment(&state.db_pool, &payload)
            .await
            .map_err(|e| {
                conflict_or_database(e, || slot_taken(payload.date, payload.time))
            })?;

    info!("Booked appointment {}", db_appointment.id);

    Ok(Json(Appointment::try_from(db_appointment)?))
}

#[axum::debug_handler]
pub async fn list_appointments(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<AppointmentListQuery>,
) -> Result<Json<Vec<Appointment>>, AppError> {
    let appointments = clinic_db::repositories::appointment::list_appointments(
        &state.db_pool,
        query.doctor_id,
        query.date,
    )
    .await
    .map_err(ClinicError::Database)?
    .into_iter()
    .map(Appointment::try_from)
    .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(appointments))
}

#[axum::debug_handler]
pub async fn get_appointment(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Appointment>, AppError> {
    Ok(Json(load_appointment(&state.db_pool, id).await?))
}

/// Edits or reschedules an appointment
///
/// Moving to another doctor, date or time re-checks the target slot the same
/// way booking does.
///
/// # Errors
///
/// * `ClinicError::Validation` - Cancelled appointment, missing reason, or a move into the past
/// * `ClinicError::NotFound` - Unknown appointment, patient or doctor
/// * `ClinicError::Conflict` - The target slot is already held
#[axum::debug_handler]
pub async fn update_appointment(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAppointmentRequest>,
) -> Result<Json<Appointment>, AppError> {
    let current = load_appointment(&state.db_pool, id).await?;
    let merged = merge_appointment(&current, payload);

    validation::validate_appointment_update(&current, &merged, today())?;

    if merged.patient_id != current.patient_id {
        ensure_patient_exists(&state.db_pool, merged.patient_id).await?;
    }
    if merged.doctor_id != current.doctor_id {
        ensure_doctor_exists(&state.db_pool, merged.doctor_id).await?;
    }
    ensure_slot_free(&state.db_pool, merged.doctor_id, merged.date, merged.time, Some(id)).await?;

    let db_appointment =
        clinic_db::repositories::appointment::update_appointment(&state.db_pool, &merged)
            .await
            .map_err(|e| conflict_or_database(e, || slot_taken(merged.date, merged.time)))?;

    info!("Updated appointment {}", id);

    Ok(Json(Appointment::try_from(db_appointment)?))
}

#[axum::debug_handler]
pub async fn confirm_appointment(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Appointment>, AppError> {
    let appointment = load_appointment(&state.db_pool, id).await?;
    let status = appointment.status.confirm()?;

    let db_appointment =
        clinic_db::repositories::appointment::update_appointment_status(&state.db_pool, id, status)
            .await
            .map_err(ClinicError::Database)?;

    Ok(Json(Appointment::try_from(db_appointment)?))
}

/// Cancelling an already cancelled appointment is a no-op.
#[axum::debug_handler]
pub async fn cancel_appointment(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Appointment>, AppError> {
    let appointment = load_appointment(&state.db_pool, id).await?;
    if !appointment.status.is_active() {
        return Ok(Json(appointment));
    }

    let db_appointment = clinic_db::repositories::appointment::update_appointment_status(
        &state.db_pool,
        id,
        AppointmentStatus::Cancelled,
    )
    .await
    .map_err(ClinicError::Database)?;

    info!("Cancelled appointment {}", id);

    Ok(Json(Appointment::try_from(db_appointment)?))
}

/// Overlays the fields present in `update` onto `current`. Status is kept.
pub fn merge_appointment(current: &Appointment, update: UpdateAppointmentRequest) -> Appointment {
    Appointment {
        id: current.id,
        patient_id: update.patient_id.unwrap_or(current.patient_id),
        doctor_id: update.doctor_id.unwrap_or(current.doctor_id),
        date: update.date.unwrap_or(current.date),
        time: update.time.unwrap_or(current.time),
        status: current.status,
        reason: update.reason.or_else(|| current.reason.clone()),
        created_at: current.created_at,
        updated_at: current.updated_at,
    }
}
