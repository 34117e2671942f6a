use crate::models::DbConsultation;
use chrono::Utc;
use clinic_core::models::consultation::{Consultation, CreateConsultationRequest};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

const CONSULTATION_COLUMNS: &str =
    "id, appointment_id, diagnosis, prescription, instructions, created_at, updated_at";

pub async fn create_consultation(
    pool: &Pool<Postgres>,
    consultation: &CreateConsultationRequest,
) -> Result<DbConsultation> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Recording consultation: id={}, appointment={}",
        id, consultation.appointment_id
    );

    let db_consultation = sqlx::query_as::<_, DbConsultation>(&format!(
        r#"
        INSERT INTO consultations (id, appointment_id, diagnosis, prescription, instructions,
                                   created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $6)
        RETURNING {}
        "#,
        CONSULTATION_COLUMNS
    ))
    .bind(id)
    .bind(consultation.appointment_id)
    .bind(&consultation.diagnosis)
    .bind(&consultation.prescription)
    .bind(&consultation.instructions)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(db_consultation)
}

pub async fn get_consultation_by_id(
    pool: &Pool<Postgres>,
    id: Uuid,
) -> Result<Option<DbConsultation>> {
    let consultation = sqlx::query_as::<_, DbConsultation>(&format!(
        "SELECT {} FROM consultations WHERE id = $1",
        CONSULTATION_COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(consultation)
}

/// Newest first.
pub async fn list_consultations(pool: &Pool<Postgres>) -> Result<Vec<DbConsultation>> {
    let consultations = sqlx::query_as::<_, DbConsultation>(&format!(
        "SELECT {} FROM consultations ORDER BY created_at DESC",
        CONSULTATION_COLUMNS
    ))
    .fetch_all(pool)
    .await?;

    Ok(consultations)
}

pub async fn update_consultation(
    pool: &Pool<Postgres>,
    consultation: &Consultation,
) -> Result<DbConsultation> {
    let updated = sqlx::query_as::<_, DbConsultation>(&format!(
        r#"
        UPDATE consultations
        SET appointment_id = $2, diagnosis = $3, prescription = $4, instructions = $5,
            updated_at = $6
        WHERE id = $1
        RETURNING {}
        "#,
        CONSULTATION_COLUMNS
    ))
    .bind(consultation.id)
    .bind(consultation.appointment_id)
    .bind(&consultation.diagnosis)
    .bind(&consultation.prescription)
    .bind(&consultation.instructions)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(updated)
}

/// Returns whether a row was deleted.
pub async fn delete_consultation(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM consultations
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
