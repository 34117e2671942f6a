use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use clinic_core::{
    errors::ClinicError,
    models::patient::{CreatePatientRequest, Patient, PatientSearchQuery, UpdatePatientRequest},
    validation,
};
use clinic_db::errors::conflict_or_database;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::{handlers::today, middleware::error_handling::AppError, ApiState};

fn duplicate_document(document_id: &str) -> String {
    format!("A patient with document {} already exists", document_id)
}

async fn ensure_document_free(pool: &PgPool, document_id: &str) -> Result<(), AppError> {
    if clinic_db::repositories::patient::find_patient_by_document(pool, document_id)
        .await
        .map_err(ClinicError::Database)?
        .is_some()
    {
        return Err(AppError(ClinicError::Conflict(duplicate_document(document_id))));
    }
    Ok(())
}

async fn load_patient(pool: &PgPool, id: Uuid) -> Result<Patient, AppError> {
    let db_patient = clinic_db::repositories::patient::get_patient_by_id(pool, id)
        .await
        .map_err(ClinicError::Database)?
        .ok_or_else(|| ClinicError::NotFound(format!("Patient with ID {} not found", id)))?;

    Ok(db_patient.into())
}

#[axum::debug_handler]
pub async fn create_patient(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreatePatientRequest>,
) -> Result<Json<Patient>, AppError> {
    validation::validate_patient(&payload, today())?;
    ensure_document_free(&state.db_pool, &payload.document_id).await?;

    let db_patient = clinic_db::repositories::patient::create_patient(&state.db_pool, &payload)
        .await
        .map_err(|e| conflict_or_database(e, || duplicate_document(&payload.document_id)))?;

    Ok(Json(db_patient.into()))
}

#[axum::debug_handler]
pub async fn list_patients(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<Patient>>, AppError> {
    let patients = clinic_db::repositories::patient::list_patients(&state.db_pool)
        .await
        .map_err(ClinicError::Database)?;

    Ok(Json(patients.into_iter().map(Patient::from).collect()))
}

#[axum::debug_handler]
pub async fn search_patients(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<PatientSearchQuery>,
) -> Result<Json<Vec<Patient>>, AppError> {
    let patients = clinic_db::repositories::patient::search_patients(&state.db_pool, query.q.trim())
        .await
        .map_err(ClinicError::Database)?;

    Ok(Json(patients.into_iter().map(Patient::from).collect()))
}

#[axum::debug_handler]
pub async fn get_patient(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Patient>, AppError> {
    Ok(Json(load_patient(&state.db_pool, id).await?))
}

/// Applies a partial update; the merged record is validated as a whole.
#[axum::debug_handler]
pub async fn update_patient(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePatientRequest>,
) -> Result<Json<Patient>, AppError> {
    let current = load_patient(&state.db_pool, id).await?;
    let merged = merge_patient(&current, payload);

    validation::validate_patient(
        &CreatePatientRequest {
            first_name: merged.first_name.clone(),
            last_name: merged.last_name.clone(),
            document_id: merged.document_id.clone(),
            address: merged.address.clone(),
            phone: merged.phone.clone(),
            email: merged.email.clone(),
            birth_date: merged.birth_date,
        },
        today(),
    )?;

    if merged.document_id != current.document_id {
        ensure_document_free(&state.db_pool, &merged.document_id).await?;
    }

    let db_patient = clinic_db::repositories::patient::update_patient(&state.db_pool, &merged)
        .await
        .map_err(|e| conflict_or_database(e, || duplicate_document(&merged.document_id)))?;

    Ok(Json(db_patient.into()))
}

#[axum::debug_handler]
pub async fn delete_patient(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let deleted = clinic_db::repositories::patient::delete_patient(&state.db_pool, id)
        .await
        .map_err(ClinicError::Database)?;

    if !deleted {
        return Err(AppError(ClinicError::NotFound(format!(
            "Patient with ID {} not found",
            id
        ))));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Overlays the fields present in `update` onto `current`.
pub fn merge_patient(current: &Patient, update: UpdatePatientRequest) -> Patient {
    Patient {
        id: current.id,
        first_name: update.first_name.unwrap_or_else(|| current.first_name.clone()),
        last_name: update.last_name.unwrap_or_else(|| current.last_name.clone()),
        document_id: update.document_id.unwrap_or_else(|| current.document_id.clone()),
        address: update.address.unwrap_or_else(|| current.address.clone()),
        phone: update.phone.unwrap_or_else(|| current.phone.clone()),
        email: update.email.unwrap_or_else(|| current.email.clone()),
        birth_date: update.birth_date.unwrap_or(current.birth_date),
        registered_at: current.registered_at,
        updated_at: current.updated_at,
    }
}
