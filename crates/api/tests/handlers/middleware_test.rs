use axum::{body::to_bytes, http::StatusCode, response::IntoResponse};
use clinic_api::middleware::{auth, error_handling::AppError};
use clinic_core::errors::ClinicError;
use rstest::rstest;
use serde_json::Value;

#[rstest]
#[case(ClinicError::NotFound("Doctor not found".into()), StatusCode::NOT_FOUND)]
#[case(ClinicError::Validation("Invalid input".into()), StatusCode::BAD_REQUEST)]
#[case(ClinicError::Conflict("Slot taken".into()), StatusCode::CONFLICT)]
#[case(ClinicError::Database(eyre::eyre!("Database error")), StatusCode::INTERNAL_SERVER_ERROR)]
#[tokio::test]
async fn test_error_status_mapping(#[case] error: ClinicError, #[case] expected: StatusCode) {
    let response = AppError(error).into_response();

    assert_eq!(response.status(), expected);
}

#[tokio::test]
async fn test_error_body_carries_message() {
    let response = AppError(ClinicError::Conflict("Slot taken".into())).into_response();

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["error"], "Conflict: Slot taken");
}

#[test]
fn test_password_hash_round_trip() {
    let hash = auth::hash_password("s3cret-pass").unwrap();

    assert!(hash.starts_with("$argon2"));
    assert!(auth::verify_password(&hash, "s3cret-pass").unwrap());
    assert!(!auth::verify_password(&hash, "wrong").unwrap());
}

#[test]
fn test_password_hashes_are_salted() {
    let first = auth::hash_password("same").unwrap();
    let second = auth::hash_password("same").unwrap();

    assert_ne!(first, second);
    assert!(auth::verify_password(&second, "same").unwrap());
}

#[test]
fn test_malformed_stored_hash_is_an_error() {
    assert!(auth::verify_password("not-a-phc-string", "anything").is_err());
}
