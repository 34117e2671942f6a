use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use clinic_core::{
    errors::ClinicError,
    models::doctor::{CreateDoctorRequest, Doctor, UpdateDoctorRequest},
    validation,
};
use clinic_db::errors::conflict_or_database;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::{middleware::error_handling::AppError, ApiState};

async fn ensure_specialty_exists(pool: &PgPool, specialty_id: Uuid) -> Result<(), AppError> {
    clinic_db::repositories::specialty::get_specialty_by_id(pool, specialty_id)
        .await
        .map_err(ClinicError::Database)?
        .ok_or_else(|| {
            ClinicError::NotFound(format!("Specialty with ID {} not found", specialty_id))
        })?;
    Ok(())
}

fn duplicate_email(email: &str) -> String {
    format!("Email {} is already registered to another doctor", email)
}

async fn ensure_email_free(pool: &PgPool, email: &str) -> Result<(), AppError> {
    if clinic_db::repositories::doctor::find_doctor_by_email(pool, email)
        .await
        .map_err(ClinicError::Database)?
        .is_some()
    {
        return Err(AppError(ClinicError::Conflict(duplicate_email(email))));
    }
    Ok(())
}

async fn load_doctor(pool: &PgPool, id: Uuid) -> Result<Doctor, AppError> {
    let db_doctor = clinic_db::repositories::doctor::get_doctor_by_id(pool, id)
        .await
        .map_err(ClinicError::Database)?
        .ok_or_else(|| ClinicError::NotFound(format!("Doctor with ID {} not found", id)))?;

    Ok(db_doctor.into())
}

#[axum::debug_handler]
pub async fn create_doctor(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateDoctorRequest>,
) -> Result<Json<Doctor>, AppError> {
    validation::validate_doctor(&payload)?;
    ensure_specialty_exists(&state.db_pool, payload.specialty_id).await?;
    ensure_email_free(&state.db_pool, &payload.email).await?;

    let db_doctor = clinic_db::repositories::doctor::create_doctor(&state.db_pool, &payload)
        .await
        .map_err(|e| conflict_or_database(e, || duplicate_email(&payload.email)))?;

    Ok(Json(db_doctor.into()))
}

#[axum::debug_handler]
pub async fn list_doctors(State(state): State<Arc<ApiState>>) -> Result<Json<Vec<Doctor>>, AppError> {
    let doctors = clinic_db::repositories::doctor::list_doctors(&state.db_pool)
        .await
        .map_err(ClinicError::Database)?;

    Ok(Json(doctors.into_iter().map(Doctor::from).collect()))
}

#[axum::debug_handler]
pub async fn get_doctor(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Doctor>, AppError> {
    Ok(Json(load_doctor(&state.db_pool, id).await?))
}

/// Applies a partial update; the merged record is validated as a whole.
#[axum::debug_handler]
pub async fn update_doctor(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateDoctorRequest>,
) -> Result<Json<Doctor>, AppError> {
    let current = load_doctor(&state.db_pool, id).await?;
    let merged = merge_doctor(&current, payload);

    validation::validate_doctor(&CreateDoctorRequest {
        first_name: merged.first_name.clone(),
        last_name: merged.last_name.clone(),
        specialty_id: merged.specialty_id,
        phone: merged.phone.clone(),
        email: merged.email.clone(),
        availability_notes: merged.availability_notes.clone(),
        shift_start: merged.shift_start,
        shift_end: merged.shift_end,
    })?;

    if merged.specialty_id != current.specialty_id {
        ensure_specialty_exists(&state.db_pool, merged.specialty_id).await?;
    }
    if merged.email != current.email {
        ensure_email_free(&state.db_pool, &merged.email).await?;
    }

    let db_doctor = clinic_db::repositories::doctor::update_doctor(&state.db_pool, &merged)
        .await
        .map_err(|e| conflict_or_database(e, || duplicate_email(&merged.email)))?;

    Ok(Json(db_doctor.into()))
}

#[axum::debug_handler]
pub async fn delete_doctor(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let deleted = clinic_db::repositories::doctor::delete_doctor(&state.db_pool, id)
        .await
        .map_err(ClinicError::Database)?;

    if !deleted {
        return Err(AppError(ClinicError::NotFound(format!(
            "Doctor with ID {} not found",
            id
        ))));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Overlays the fields present in `update` onto `current`.
pub fn merge_doctor(current: &Doctor, update: UpdateDoctorRequest) -> Doctor {
    Doctor {
        id: current.id,
        first_name: update.first_name.unwrap_or_else(|| current.first_name.clone()),
        last_name: update.last_name.unwrap_or_else(|| current.last_name.clone()),
        specialty_id: update.specialty_id.unwrap_or(current.specialty_id),
        phone: update.phone.unwrap_or_else(|| current.phone.clone()),
        email: update.email.unwrap_or_else(|| current.email.clone()),
        availability_notes: update
            .availability_notes
            .unwrap_or_else(|| current.availability_notes.clone()),
        shift_start: update.shift_start.unwrap_or(current.shift_start),
        shift_end: update.shift_end.or(current.shift_end),
        created_at: current.created_at,
        updated_at: current.updated_at,
    }
}
