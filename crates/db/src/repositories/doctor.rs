use crate::models::DbDoctor;
use chrono::Utc;
use clinic_core::models::doctor::{CreateDoctorRequest, Doctor};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

const DOCTOR_COLUMNS: &str = "id, first_name, last_name, specialty_id, phone, email, \
     availability_notes, shift_start, shift_end, created_at, updated_at";

pub async fn create_doctor(pool: &Pool<Postgres>, doctor: &CreateDoctorRequest) -> Result<DbDoctor> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating doctor: id={}, email={}, shift={}-{:?}",
        id, doctor.email, doctor.shift_start, doctor.shift_end
    );

    let db_doctor = sqlx::query_as::<_, DbDoctor>(&format!(
        r#"
        INSERT INTO doctors (id, first_name, last_name, specialty_id, phone, email,
                             availability_notes, shift_start, shift_end, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $10)
        RETURNING {}
        "#,
        DOCTOR_COLUMNS
    ))
    .bind(id)
    .bind(&doctor.first_name)
    .bind(&doctor.last_name)
    .bind(doctor.specialty_id)
    .bind(&doctor.phone)
    .bind(&doctor.email)
    .bind(&doctor.availability_notes)
    .bind(doctor.shift_start)
    .bind(doctor.shift_end)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(db_doctor)
}

pub async fn get_doctor_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbDoctor>> {
    tracing::debug!("Getting doctor by id: {}", id);

    let doctor = sqlx::query_as::<_, DbDoctor>(&format!(
        "SELECT {} FROM doctors WHERE id = $1",
        DOCTOR_COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(doctor)
}

pub async fn find_doctor_by_email(pool: &Pool<Postgres>, email: &str) -> Result<Option<DbDoctor>> {
    let doctor = sqlx::query_as::<_, DbDoctor>(&format!(
        "SELECT {} FROM doctors WHERE email = $1",
        DOCTOR_COLUMNS
    ))
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(doctor)
}

pub async fn list_doctors(pool: &Pool<Postgres>) -> Result<Vec<DbDoctor>> {
    let doctors = sqlx::query_as::<_, DbDoctor>(&format!(
        "SELECT {} FROM doctors ORDER BY last_name ASC, first_name ASC",
        DOCTOR_COLUMNS
    ))
    .fetch_all(pool)
    .await?;

    Ok(doctors)
}

/// Overwrites every editable column with the values of `doctor`.
pub async fn update_doctor(pool: &Pool<Postgres>, doctor: &Doctor) -> Result<DbDoctor> {
    let updated = sqlx::query_as::<_, DbDoctor>(&format!(
        r#"
        UPDATE doctors
        SET first_name = $2, last_name = $3, specialty_id = $4, phone = $5, email = $6,
            availability_notes = $7, shift_start = $8, shift_end = $9, updated_at = $10
        WHERE id = $1
        RETURNING {}
        "#,
        DOCTOR_COLUMNS
    ))
    .bind(doctor.id)
    .bind(&doctor.first_name)
    .bind(&doctor.last_name)
    .bind(doctor.specialty_id)
    .bind(&doctor.phone)
    .bind(&doctor.email)
    .bind(&doctor.availability_notes)
    .bind(doctor.shift_start)
    .bind(doctor.shift_end)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(updated)
}

/// Returns whether a row was deleted.
pub async fn delete_doctor(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM doctors
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
