use crate::models::DbPatient;
use chrono::Utc;
use clinic_core::models::patient::{CreatePatientRequest, Patient};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

const PATIENT_COLUMNS: &str = "id, first_name, last_name, document_id, address, phone, email, \
     birth_date, registered_at, updated_at";

pub async fn create_patient(
    pool: &Pool<Postgres>,
    patient: &CreatePatientRequest,
) -> Result<DbPatient> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!("Registering patient: id={}, document={}", id, patient.document_id);

    let db_patient = sqlx::query_as::<_, DbPatient>(&format!(
        r#"
        INSERT INTO patients (id, first_name, last_name, document_id, address, phone, email,
                              birth_date, registered_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9)
        RETURNING {}
        "#,
        PATIENT_COLUMNS
    ))
    .bind(id)
    .bind(&patient.first_name)
    .bind(&patient.last_name)
    .bind(&patient.document_id)
    .bind(&patient.address)
    .bind(&patient.phone)
    .bind(&patient.email)
    .bind(patient.birth_date)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(db_patient)
}

pub async fn get_patient_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbPatient>> {
    let patient = sqlx::query_as::<_, DbPatient>(&format!(
        "SELECT {} FROM patients WHERE id = $1",
        PATIENT_COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(patient)
}

pub async fn find_patient_by_document(
    pool: &Pool<Postgres>,
    document_id: &str,
) -> Result<Option<DbPatient>> {
    let patient = sqlx::query_as::<_, DbPatient>(&format!(
        "SELECT {} FROM patients WHERE document_id = $1",
        PATIENT_COLUMNS
    ))
    .bind(document_id)
    .fetch_optional(pool)
    .await?;

    Ok(patient)
}

pub async fn list_patients(pool: &Pool<Postgres>) -> Result<Vec<DbPatient>> {
    let patients = sqlx::query_as::<_, DbPatient>(&format!(
        "SELECT {} FROM patients ORDER BY last_name ASC, first_name ASC",
        PATIENT_COLUMNS
    ))
    .fetch_all(pool)
    .await?;

    Ok(patients)
}

/// Case-insensitive substring match on the first name. An empty query
/// matches every patient.
pub async fn search_patients(pool: &Pool<Postgres>, query: &str) -> Result<Vec<DbPatient>> {
    let pattern = format!("%{}%", escape_like(query));

    let patients = sqlx::query_as::<_, DbPatient>(&format!(
        r#"
        SELECT {}
        FROM patients
        WHERE first_name ILIKE $1 ESCAPE '\'
        ORDER BY last_name ASC, first_name ASC
        "#,
        PATIENT_COLUMNS
    ))
    .bind(pattern)
    .fetch_all(pool)
    .await?;

    Ok(patients)
}

/// Writes every editable field of `patient`; `updated_at` is refreshed.
pub async fn update_patient(pool: &Pool<Postgres>, patient: &Patient) -> Result<DbPatient> {
    tracing::debug!("Updating patient: id={}", patient.id);

    let updated = sqlx::query_as::<_, DbPatient>(&format!(
        r#"
        UPDATE patients
        SET first_name = $2, last_name = $3, document_id = $4, address = $5,
            phone = $6, email = $7, birth_date = $8, updated_at = $9
        WHERE id = $1
        RETURNING {}
        "#,
        PATIENT_COLUMNS
    ))
    .bind(patient.id)
    .bind(&patient.first_name)
    .bind(&patient.last_name)
    .bind(&patient.document_id)
    .bind(&patient.address)
    .bind(&patient.phone)
    .bind(&patient.email)
    .bind(patient.birth_date)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(updated)
}

pub async fn delete_patient(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM patients
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Escapes LIKE wildcards so user input only matches literally.
pub fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
