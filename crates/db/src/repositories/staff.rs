use crate::models::DbStaffUser;
use chrono::Utc;
use clinic_core::models::staff::StaffRole;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_staff_user(
    pool: &Pool<Postgres>,
    name: &str,
    email: &str,
    role: StaffRole,
    password_hash: &str,
) -> Result<DbStaffUser> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!("Creating staff user: id={}, email={}, role={}", id, email, role);

    let user = sqlx::query_as::<_, DbStaffUser>(
        r#"
        INSERT INTO staff_users (id, name, email, role, password_hash, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $6)
        RETURNING id, name, email, role, password_hash, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(email)
    .bind(role.as_str())
    .bind(password_hash)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

pub async fn get_staff_user_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbStaffUser>> {
    let user = sqlx::query_as::<_, DbStaffUser>(
        r#"
        SELECT id, name, email, role, password_hash, created_at, updated_at
        FROM staff_users
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn find_staff_user_by_email(
    pool: &Pool<Postgres>,
    email: &str,
) -> Result<Option<DbStaffUser>> {
    let user = sqlx::query_as::<_, DbStaffUser>(
        r#"
        SELECT id, name, email, role, password_hash, created_at, updated_at
        FROM staff_users
        WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn list_staff_users(pool: &Pool<Postgres>) -> Result<Vec<DbStaffUser>> {
    let users = sqlx::query_as::<_, DbStaffUser>(
        r#"
        SELECT id, name, email, role, password_hash, created_at, updated_at
        FROM staff_users
        ORDER BY name ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(users)
}

/// Updates profile fields; `password_hash` replaces the stored hash only
/// when given.
pub async fn update_staff_user(
    pool: &Pool<Postgres>,
    id: Uuid,
    name: &str,
    email: &str,
    role: StaffRole,
    password_hash: Option<&str>,
) -> Result<DbStaffUser> {
    tracing::debug!("Updating staff user: id={}, role={}", id, role);

    let user = sqlx::query_as::<_, DbStaffUser>(
        r#"
        UPDATE staff_users
        SET name = $2, email = $3, role = $4,
            password_hash = COALESCE($5, password_hash), updated_at = $6
        WHERE id = $1
        RETURNING id, name, email, role, password_hash, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(email)
    .bind(role.as_str())
    .bind(password_hash)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(user)
}

/// Returns whether a row was deleted.
pub async fn delete_staff_user(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM staff_users
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
