//! Routing and extraction checks. Every request here is answered before a
//! handler touches the database, so the lazy pool never connects.

use axum::http::StatusCode;
use axum_test::TestServer;
use clinic_api::{app, config::parse_log_level};
use serde_json::{json, Value};
use tracing::Level;
use uuid::Uuid;

use crate::test_utils::build_lazy_state;

fn server() -> TestServer {
    TestServer::new(app(build_lazy_state())).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let response = server().get("/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "clinic-api");
}

#[tokio::test]
async fn test_availability_rejects_malformed_doctor_id() {
    let response = server()
        .get("/api/doctors/not-a-uuid/availability")
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_availability_rejects_malformed_date() {
    let path = format!("/api/doctors/{}/availability", Uuid::new_v4());

    let response = server()
        .get(&path)
        .add_query_param("date", "14-03-2025")
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_booking_requires_complete_body() {
    let response = server()
        .post("/api/appointments")
        .json(&json!({ "reason": "Checkup" }))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_booking_in_the_past_is_rejected_before_lookup() {
    let response = server()
        .post("/api/appointments")
        .json(&json!({
            "patient_id": Uuid::new_v4(),
            "doctor_id": Uuid::new_v4(),
            "date": "2000-01-01",
            "time": "09:00:00",
            "reason": "Checkup",
        }))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("past"));
}

#[tokio::test]
async fn test_invalid_doctor_is_rejected_before_lookup() {
    let response = server()
        .post("/api/doctors")
        .json(&json!({
            "first_name": "Ana",
            "last_name": "Torres",
            "specialty_id": Uuid::new_v4(),
            "phone": "+34 600123456",
            "email": "ana.torres@clinic.example",
            "shift_start": "17:00:00",
            "shift_end": "09:00:00",
        }))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_staff_role_is_rejected() {
    let response = server()
        .post("/api/users")
        .json(&json!({
            "name": "Marta",
            "email": "marta@clinic.example",
            "role": "janitor",
            "password": "s3cret",
        }))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_consultation_requires_clinical_fields() {
    let response = server()
        .post("/api/consultations")
        .json(&json!({
            "appointment_id": Uuid::new_v4(),
            "diagnosis": "Migraine",
            "prescription": "",
            "instructions": "Rest for two days",
        }))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("prescription"));
}

#[tokio::test]
async fn test_record_edits_reject_malformed_ids() {
    let server = server();

    for path in [
        "/api/patients/42",
        "/api/appointments/42",
        "/api/users/42",
        "/api/consultations/42",
    ] {
        let response = server.put(path).json(&json!({})).expect_failure().await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn test_unknown_route() {
    let response = server().get("/api/invoices").expect_failure().await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[test]
fn test_log_level_parsing() {
    assert_eq!(parse_log_level("debug"), Level::DEBUG);
    assert_eq!(parse_log_level("WARN"), Level::WARN);
    assert_eq!(parse_log_level("verbose"), Level::INFO);
}
