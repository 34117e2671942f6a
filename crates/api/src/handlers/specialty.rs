use axum::{extract::State, Json};
use clinic_core::{
    errors::ClinicError,
    models::specialty::{CreateSpecialtyRequest, Specialty},
    validation,
};
use clinic_db::errors::conflict_or_database;
use std::sync::Arc;

use crate::{middleware::error_handling::AppError, ApiState};

fn duplicate_name(name: &str) -> String {
    format!("A specialty named '{}' already exists", name)
}

#[axum::debug_handler]
pub async fn create_specialty(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateSpecialtyRequest>,
) -> Result<Json<Specialty>, AppError> {
    let name = payload.name.trim();
    validation::require("name", name)?;

    if clinic_db::repositories::specialty::find_specialty_by_name(&state.db_pool, name)
        .await
        .map_err(ClinicError::Database)?
        .is_some()
    {
        return Err(AppError(ClinicError::Conflict(duplicate_name(name))));
    }

    let specialty = clinic_db::repositories::specialty::create_specialty(&state.db_pool, name)
        .await
        .map_err(|e| conflict_or_database(e, || duplicate_name(name)))?;

    Ok(Json(specialty.into()))
}

#[axum::debug_handler]
pub async fn list_specialties(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<Specialty>>, AppError> {
    let specialties = clinic_db::repositories::specialty::list_specialties(&state.db_pool)
        .await
        .map_err(ClinicError::Database)?;

    Ok(Json(specialties.into_iter().map(Specialty::from).collect()))
}
