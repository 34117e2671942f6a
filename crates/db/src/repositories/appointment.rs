use crate::models::DbAppointment;
use chrono::{NaiveDate, NaiveTime, Utc};
use clinic_core::models::appointment::{Appointment, AppointmentStatus, CreateAppointmentRequest};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

const APPOINTMENT_COLUMNS: &str = "id, patient_id, doctor_id, appointment_date, appointment_time, \
     status, reason, created_at, updated_at";

pub async fn create_appointment(
    pool: &Pool<Postgres>,
    appointment: &CreateAppointmentRequest,
) -> Result<DbAppointment> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Booking appointment: id={}, doctor={}, at {} {}",
        id, appointment.doctor_id, appointment.date, appointment.time
    );

    let db_appointment = sqlx::query_as::<_, DbAppointment>(&format!(
        r#"
        INSERT INTO appointments (id, patient_id, doctor_id, appointment_date, appointment_time,
                                  status, reason, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
        RETURNING {}
        "#,
        APPOINTMENT_COLUMNS
    ))
    .bind(id)
    .bind(appointment.patient_id)
    .bind(appointment.doctor_id)
    .bind(appointment.date)
    .bind(appointment.time)
    .bind(AppointmentStatus::Pending.as_str())
    .bind(&appointment.reason)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(db_appointment)
}

pub async fn get_appointment_by_id(
    pool: &Pool<Postgres>,
    id: Uuid,
) -> Result<Option<DbAppointment>> {
    let appointment = sqlx::query_as::<_, DbAppointment>(&format!(
        "SELECT {} FROM appointments WHERE id = $1",
        APPOINTMENT_COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(appointment)
}

/// Lists appointments, optionally narrowed to a doctor and/or a date.
pub async fn list_appointments(
    pool: &Pool<Postgres>,
    doctor_id: Option<Uuid>,
    date: Option<NaiveDate>,
) -> Result<Vec<DbAppointment>> {
    let appointments = sqlx::query_as::<_, DbAppointment>(&format!(
        r#"
        SELECT {}
        FROM appointments
        WHERE ($1::uuid IS NULL OR doctor_id = $1)
          AND ($2::date IS NULL OR appointment_date = $2)
        ORDER BY appointment_date ASC, appointment_time ASC
        "#,
        APPOINTMENT_COLUMNS
    ))
    .bind(doctor_id)
    .bind(date)
    .fetch_all(pool)
    .await?;

    Ok(appointments)
}

/// Every appointment of `doctor_id` on `date`, regardless of status.
pub async fn get_appointments_for_doctor_on(
    pool: &Pool<Postgres>,
    doctor_id: Uuid,
    date: NaiveDate,
) -> Result<Vec<DbAppointment>> {
    list_appointments(pool, Some(doctor_id), Some(date)).await
}

/// A pending or confirmed appointment holding the doctor's slot, if any.
/// `exclude` skips one appointment, so a reschedule does not collide with
/// itself.
pub async fn find_active_booking(
    pool: &Pool<Postgres>,
    doctor_id: Uuid,
    date: NaiveDate,
    time: NaiveTime,
    exclude: Option<Uuid>,
) -> Result<Option<DbAppointment>> {
    let appointment = sqlx::query_as::<_, DbAppointment>(&format!(
        r#"
        SELECT {}
        FROM appointments
        WHERE doctor_id = $1
          AND appointment_date = $2
          AND appointment_time = $3
          AND status <> $4
          AND ($5::uuid IS NULL OR id <> $5)
        LIMIT 1
        "#,
        APPOINTMENT_COLUMNS
    ))
    .bind(doctor_id)
    .bind(date)
    .bind(time)
    .bind(AppointmentStatus::Cancelled.as_str())
    .bind(exclude)
    .fetch_optional(pool)
    .await?;

    Ok(appointment)
}

/// Rewrites patient, doctor, slot and reason. Status is left untouched.
pub async fn update_appointment(
    pool: &Pool<Postgres>,
    appointment: &Appointment,
) -> Result<DbAppointment> {
    tracing::debug!(
        "Rescheduling appointment: id={}, doctor={}, at {} {}",
        appointment.id, appointment.doctor_id, appointment.date, appointment.time
    );

    let updated = sqlx::query_as::<_, DbAppointment>(&format!(
        r#"
        UPDATE appointments
        SET patient_id = $2, doctor_id = $3, appointment_date = $4, appointment_time = $5,
            reason = $6, updated_at = $7
        WHERE id = $1
        RETURNING {}
        "#,
        APPOINTMENT_COLUMNS
    ))
    .bind(appointment.id)
    .bind(appointment.patient_id)
    .bind(appointment.doctor_id)
    .bind(appointment.date)
    .bind(appointment.time)
    .bind(&appointment.reason)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(updated)
}

pub async fn update_appointment_status(
    pool: &Pool<Postgres>,
    id: Uuid,
    status: AppointmentStatus,
) -> Result<DbAppointment> {
    let appointment = sqlx::query_as::<_, DbAppointment>(&format!(
        r#"
        UPDATE appointments
        SET status = $2, updated_at = $3
        WHERE id = $1
        RETURNING {}
        "#,
        APPOINTMENT_COLUMNS
    ))
    .bind(id)
    .bind(status.as_str())
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(appointment)
}
