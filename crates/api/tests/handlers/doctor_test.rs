use clinic_api::handlers::doctor::merge_doctor;
use clinic_core::{models::doctor::UpdateDoctorRequest, validation::validate_shift_window};
use pretty_assertions::assert_eq;

use crate::test_utils::{doctor_with_shift, time};

#[test]
fn test_merge_keeps_unspecified_fields() {
    let current = doctor_with_shift(time(8, 0), Some(time(12, 0)));

    let merged = merge_doctor(
        &current,
        UpdateDoctorRequest {
            phone: Some("+34 611222333".to_string()),
            ..Default::default()
        },
    );

    assert_eq!(merged.phone, "+34 611222333");
    assert_eq!(merged.first_name, current.first_name);
    assert_eq!(merged.email, current.email);
    assert_eq!(merged.shift_start, current.shift_start);
    assert_eq!(merged.shift_end, current.shift_end);
    assert_eq!(merged.id, current.id);
}

#[test]
fn test_merge_sets_missing_shift_end() {
    let current = doctor_with_shift(time(8, 0), None);

    let merged = merge_doctor(
        &current,
        UpdateDoctorRequest {
            shift_end: Some(time(14, 0)),
            ..Default::default()
        },
    );

    assert_eq!(merged.shift_end, Some(time(14, 0)));
}

#[test]
fn test_merged_shift_is_revalidated_as_a_whole() {
    let current = doctor_with_shift(time(8, 0), Some(time(12, 0)));

    // Moving only the start past the existing end must be caught
    let merged = merge_doctor(
        &current,
        UpdateDoctorRequest {
            shift_start: Some(time(13, 0)),
            ..Default::default()
        },
    );

    assert!(validate_shift_window(merged.shift_start, merged.shift_end).is_err());
}
