//! # Consultation Handlers
//!
//! A consultation records the outcome of an appointment. It can only be
//! attached to an appointment whose reason was recorded at booking time.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use clinic_core::{
    errors::ClinicError,
    models::{
        appointment::Appointment,
        consultation::{Consultation, CreateConsultationRequest, UpdateConsultationRequest},
    },
    validation,
};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::{middleware::error_handling::AppError, ApiState};

async fn load_consultation(pool: &PgPool, id: Uuid) -> Result<Consultation, AppError> {
    let db_consultation = clinic_db::repositories::consultation::get_consultation_by_id(pool, id)
        .await
        .map_err(ClinicError::Database)?
        .ok_or_else(|| ClinicError::NotFound(format!("Consultation with ID {} not found", id)))?;

    Ok(db_consultation.into())
}

async fn ensure_appointment_has_reason(pool: &PgPool, appointment_id: Uuid) -> Result<(), AppError> {
    let db_appointment =
        clinic_db::repositories::appointment::get_appointment_by_id(pool, appointment_id)
            .await
            .map_err(ClinicError::Database)?
            .ok_or_else(|| {
                ClinicError::NotFound(format!("Appointment with ID {} not found", appointment_id))
            })?;

    validation::validate_consultation_appointment(&Appointment::try_from(db_appointment)?)?;
    Ok(())
}

#[axum::debug_handler]
pub async fn create_consultation(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateConsultationRequest>,
) -> Result<Json<Consultation>, AppError> {
    validation::validate_consultation(&payload)?;
    ensure_appointment_has_reason(&state.db_pool, payload.appointment_id).await?;

    let db_consultation =
        clinic_db::repositories::consultation::create_consultation(&state.db_pool, &payload)
            .await
            .map_err(ClinicError::Database)?;

    info!(
        "Recorded consultation {} for appointment {}",
        db_consultation.id, db_consultation.appointment_id
    );

    Ok(Json(db_consultation.into()))
}

#[axum::debug_handler]
pub async fn list_consultations(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<Consultation>>, AppError> {
    let consultations = clinic_db::repositories::consultation::list_consultations(&state.db_pool)
        .await
        .map_err(ClinicError::Database)?;

    Ok(Json(consultations.into_iter().map(Consultation::from).collect()))
}

#[axum::debug_handler]
pub async fn get_consultation(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Consultation>, AppError> {
    Ok(Json(load_consultation(&state.db_pool, id).await?))
}

#[axum::debug_handler]
pub async fn update_consultation(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateConsultationRequest>,
) -> Result<Json<Consultation>, AppError> {
    let current = load_consultation(&state.db_pool, id).await?;
    let merged = merge_consultation(&current, payload);

    validation::validate_consultation(&CreateConsultationRequest {
        appointment_id: merged.appointment_id,
        diagnosis: merged.diagnosis.clone(),
        prescription: merged.prescription.clone(),
        instructions: merged.instructions.clone(),
    })?;

    if merged.appointment_id != current.appointment_id {
        ensure_appointment_has_reason(&state.db_pool, merged.appointment_id).await?;
    }

    let db_consultation =
        clinic_db::repositories::consultation::update_consultation(&state.db_pool, &merged)
            .await
            .map_err(ClinicError::Database)?;

    Ok(Json(db_consultation.into()))
}

#[axum::debug_handler]
pub async fn delete_consultation(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let deleted = clinic_db::repositories::consultation::delete_consultation(&state.db_pool, id)
        .await
        .map_err(ClinicError::Database)?;

    if !deleted {
        return Err(AppError(ClinicError::NotFound(format!(
            "Consultation with ID {} not found",
            id
        ))));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Overlays the fields present in `update` onto `current`.
pub fn merge_consultation(current: &Consultation, update: UpdateConsultationRequest) -> Consultation {
    Consultation {
        id: current.id,
        appointment_id: update.appointment_id.unwrap_or(current.appointment_id),
        diagnosis: update.diagnosis.unwrap_or_else(|| current.diagnosis.clone()),
        prescription: update.prescription.unwrap_or_else(|| current.prescription.clone()),
        instructions: update.instructions.unwrap_or_else(|| current.instructions.clone()),
        created_at: current.created_at,
        updated_at: current.updated_at,
    }
}
