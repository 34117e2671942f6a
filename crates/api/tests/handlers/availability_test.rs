use axum::http::StatusCode;
use clinic_api::middleware::error_handling::AppError;
use clinic_core::{
    availability::doctor_availability,
    errors::ClinicError,
    models::slot::Slot,
};
use mockall::predicate::eq;
use pretty_assertions::assert_eq;
use serde_json::json;
use uuid::Uuid;

use crate::test_utils::{appointment_at, date, doctor_with_shift, time, TestContext};

#[tokio::test]
async fn test_unknown_doctor_is_not_found() {
    let mut ctx = TestContext::new();
    let doctor_id = Uuid::new_v4();

    ctx.doctors
        .expect_get_doctor()
        .with(eq(doctor_id))
        .times(1)
        .returning(|id| Err(ClinicError::NotFound(format!("Doctor with ID {} not found", id))));
    ctx.appointments.expect_find_appointments().times(0);

    let result = doctor_availability(
        &ctx.doctors,
        &ctx.appointments,
        doctor_id,
        None,
        date(2025, 3, 14),
    )
    .await;

    let error = AppError(result.unwrap_err());
    assert_eq!(error.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_missing_shift_end_is_rejected_before_querying_appointments() {
    let mut ctx = TestContext::new();
    let doctor = doctor_with_shift(time(8, 0), None);
    let doctor_id = doctor.id;

    ctx.doctors
        .expect_get_doctor()
        .returning(move |_| Ok(doctor.clone()));
    ctx.appointments.expect_find_appointments().times(0);

    let result = doctor_availability(
        &ctx.doctors,
        &ctx.appointments,
        doctor_id,
        None,
        date(2025, 3, 14),
    )
    .await;

    match result {
        Err(ClinicError::Validation(_)) => {}
        other => panic!("Expected Validation error, got: {:?}", other),
    }
}

#[test_log::test(tokio::test)]
async fn test_defaults_to_today_when_no_date_given() {
    let mut ctx = TestContext::new();
    let doctor = doctor_with_shift(time(8, 0), Some(time(9, 0)));
    let doctor_id = doctor.id;
    let today = date(2025, 3, 14);

    ctx.doctors
        .expect_get_doctor()
        .with(eq(doctor_id))
        .returning(move |_| Ok(doctor.clone()));
    ctx.appointments
        .expect_find_appointments()
        .with(eq(doctor_id), eq(today))
        .times(1)
        .returning(move |id, day| Ok(vec![appointment_at(id, day, time(8, 30))]));

    let availability = doctor_availability(&ctx.doctors, &ctx.appointments, doctor_id, None, today)
        .await
        .unwrap();

    assert_eq!(availability.date, today);
    assert_eq!(
        availability.slots,
        vec![
            Slot { time: time(8, 0), occupied: false },
            Slot { time: time(8, 30), occupied: true },
        ]
    );
}

#[tokio::test]
async fn test_requested_date_is_used_for_the_query() {
    let mut ctx = TestContext::new();
    let doctor = doctor_with_shift(time(14, 0), Some(time(15, 0)));
    let doctor_id = doctor.id;
    let requested = date(2025, 4, 1);

    ctx.doctors
        .expect_get_doctor()
        .returning(move |_| Ok(doctor.clone()));
    ctx.appointments
        .expect_find_appointments()
        .with(eq(doctor_id), eq(requested))
        .times(1)
        .returning(|_, _| Ok(vec![]));

    let availability = doctor_availability(
        &ctx.doctors,
        &ctx.appointments,
        doctor_id,
        Some(requested),
        date(2025, 3, 14),
    )
    .await
    .unwrap();

    assert_eq!(availability.date, requested);
    assert!(availability.slots.iter().all(|slot| !slot.occupied));
}

#[tokio::test]
async fn test_inverted_shift_yields_no_slots() {
    let mut ctx = TestContext::new();
    let doctor = doctor_with_shift(time(17, 0), Some(time(9, 0)));
    let doctor_id = doctor.id;

    ctx.doctors
        .expect_get_doctor()
        .returning(move |_| Ok(doctor.clone()));
    ctx.appointments
        .expect_find_appointments()
        .returning(|_, _| Ok(vec![]));

    let availability = doctor_availability(
        &ctx.doctors,
        &ctx.appointments,
        doctor_id,
        None,
        date(2025, 3, 14),
    )
    .await
    .unwrap();

    assert!(availability.slots.is_empty());
}

#[tokio::test]
async fn test_store_failure_propagates_as_server_error() {
    let mut ctx = TestContext::new();
    let doctor = doctor_with_shift(time(8, 0), Some(time(9, 0)));
    let doctor_id = doctor.id;

    ctx.doctors
        .expect_get_doctor()
        .returning(move |_| Ok(doctor.clone()));
    ctx.appointments
        .expect_find_appointments()
        .returning(|_, _| Err(ClinicError::Database(eyre::eyre!("connection refused"))));

    let result = doctor_availability(
        &ctx.doctors,
        &ctx.appointments,
        doctor_id,
        None,
        date(2025, 3, 14),
    )
    .await;

    let error = AppError(result.unwrap_err());
    assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_response_shape() {
    let mut ctx = TestContext::new();
    let doctor = doctor_with_shift(time(8, 0), Some(time(8, 30)));
    let doctor_id = doctor.id;

    ctx.doctors
        .expect_get_doctor()
        .returning(move |_| Ok(doctor.clone()));
    ctx.appointments
        .expect_find_appointments()
        .returning(move |id, day| Ok(vec![appointment_at(id, day, time(8, 0))]));

    let availability = doctor_availability(
        &ctx.doctors,
        &ctx.appointments,
        doctor_id,
        Some(date(2025, 3, 14)),
        date(2025, 3, 1),
    )
    .await
    .unwrap();

    assert_eq!(
        serde_json::to_value(&availability).unwrap(),
        json!({
            "doctor_id": doctor_id,
            "date": "2025-03-14",
            "slots": [{ "time": "08:00:00", "occupied": true }],
        })
    );
}
