use crate::models::DbSpecialty;
use chrono::Utc;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_specialty(pool: &Pool<Postgres>, name: &str) -> Result<DbSpecialty> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let specialty = sqlx::query_as::<_, DbSpecialty>(
        r#"
        INSERT INTO specialties (id, name, created_at)
        VALUES ($1, $2, $3)
        RETURNING id, name, created_at
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(specialty)
}

pub async fn get_specialty_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbSpecialty>> {
    let specialty = sqlx::query_as::<_, DbSpecialty>(
        r#"
        SELECT id, name, created_at
        FROM specialties
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(specialty)
}

/// Case-insensitive lookup, used to reject duplicate specialty names.
pub async fn find_specialty_by_name(
    pool: &Pool<Postgres>,
    name: &str,
) -> Result<Option<DbSpecialty>> {
    let specialty = sqlx::query_as::<_, DbSpecialty>(
        r#"
        SELECT id, name, created_at
        FROM specialties
        WHERE LOWER(name) = LOWER($1)
        "#,
    )
    .bind(name)
    .fetch_optional(pool)
    .await?;

    Ok(specialty)
}

pub async fn list_specialties(pool: &Pool<Postgres>) -> Result<Vec<DbSpecialty>> {
    let specialties = sqlx::query_as::<_, DbSpecialty>(
        r#"
        SELECT id, name, created_at
        FROM specialties
        ORDER BY name ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(specialties)
}
