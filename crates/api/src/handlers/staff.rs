use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use clinic_core::{
    errors::ClinicError,
    models::staff::{
        CreateStaffUserRequest, StaffRole, StaffUser, UpdateStaffUserRequest,
        VerifyPasswordRequest, VerifyPasswordResponse,
    },
    validation,
};
use clinic_db::{errors::conflict_or_database, models::DbStaffUser};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    middleware::{auth, error_handling::AppError},
    ApiState,
};

async fn load_staff_user(pool: &PgPool, id: Uuid) -> Result<DbStaffUser, AppError> {
    let db_user = clinic_db::repositories::staff::get_staff_user_by_id(pool, id)
        .await
        .map_err(ClinicError::Database)?
        .ok_or_else(|| ClinicError::NotFound(format!("Staff user with ID {} not found", id)))?;

    Ok(db_user)
}

async fn ensure_email_free(pool: &PgPool, email: &str) -> Result<(), AppError> {
    if clinic_db::repositories::staff::find_staff_user_by_email(pool, email)
        .await
        .map_err(ClinicError::Database)?
        .is_some()
    {
        return Err(AppError(ClinicError::Conflict(format!(
            "Email {} is already registered",
            email
        ))));
    }
    Ok(())
}

#[axum::debug_handler]
pub async fn create_staff_user(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateStaffUserRequest>,
) -> Result<Json<StaffUser>, AppError> {
    validation::validate_staff_user(&payload)?;
    let role: StaffRole = payload.role.trim().parse()?;

    ensure_email_free(&state.db_pool, &payload.email).await?;

    let password_hash = auth::hash_password(&payload.password)?;

    let db_user = clinic_db::repositories::staff::create_staff_user(
        &state.db_pool,
        payload.name.trim(),
        &payload.email,
        role,
        &password_hash,
    )
    .await
    .map_err(|e| {
        conflict_or_database(e, || format!("Email {} is already registered", payload.email))
    })?;

    Ok(Json(StaffUser::try_from(db_user)?))
}

#[axum::debug_handler]
pub async fn list_staff_users(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<StaffUser>>, AppError> {
    let users = clinic_db::repositories::staff::list_staff_users(&state.db_pool)
        .await
        .map_err(ClinicError::Database)?
        .into_iter()
        .map(StaffUser::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(users))
}

#[axum::debug_handler]
pub async fn get_staff_user(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<StaffUser>, AppError> {
    let db_user = load_staff_user(&state.db_pool, id).await?;

    Ok(Json(StaffUser::try_from(db_user)?))
}

/// Applies a partial update. A supplied password is re-hashed.
#[axum::debug_handler]
pub async fn update_staff_user(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStaffUserRequest>,
) -> Result<Json<StaffUser>, AppError> {
    let current = load_staff_user(&state.db_pool, id).await?;
    let name = payload.name.unwrap_or(current.name);
    let email = payload.email.unwrap_or_else(|| current.email.clone());
    let role = payload.role.unwrap_or(current.role);

    validation::validate_staff_profile(&name, &email, &role)?;
    if let Some(password) = &payload.password {
        validation::require("password", password)?;
    }
    let role: StaffRole = role.trim().parse()?;

    if email != current.email {
        ensure_email_free(&state.db_pool, &email).await?;
    }

    let password_hash = payload
        .password
        .as_deref()
        .map(auth::hash_password)
        .transpose()?;

    let db_user = clinic_db::repositories::staff::update_staff_user(
        &state.db_pool,
        id,
        name.trim(),
        &email,
        role,
        password_hash.as_deref(),
    )
    .await
    .map_err(|e| conflict_or_database(e, || format!("Email {} is already registered", email)))?;

    Ok(Json(StaffUser::try_from(db_user)?))
}

#[axum::debug_handler]
pub async fn delete_staff_user(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let deleted = clinic_db::repositories::staff::delete_staff_user(&state.db_pool, id)
        .await
        .map_err(ClinicError::Database)?;

    if !deleted {
        return Err(AppError(ClinicError::NotFound(format!(
            "Staff user with ID {} not found",
            id
        ))));
    }

    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn verify_password(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<VerifyPasswordRequest>,
) -> Result<Json<VerifyPasswordResponse>, AppError> {
    let db_user = load_staff_user(&state.db_pool, id).await?;
    let valid = auth::verify_password(&db_user.password_hash, &payload.password)?;

    Ok(Json(VerifyPasswordResponse { valid }))
}
