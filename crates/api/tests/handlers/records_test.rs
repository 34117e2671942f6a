use chrono::Utc;
use clinic_api::handlers::{
    appointment::merge_appointment, consultation::merge_consultation, patient::merge_patient,
};
use clinic_core::models::{
    appointment::{AppointmentStatus, UpdateAppointmentRequest},
    consultation::{Consultation, UpdateConsultationRequest},
    patient::{Patient, UpdatePatientRequest},
};
use pretty_assertions::assert_eq;
use uuid::Uuid;

use crate::test_utils::{appointment_at, date, time};

fn patient() -> Patient {
    let now = Utc::now();
    Patient {
        id: Uuid::new_v4(),
        first_name: "Lucia".to_string(),
        last_name: "Ramos".to_string(),
        document_id: "X1234567".to_string(),
        address: "Calle Mayor 1".to_string(),
        phone: "+34 600123456".to_string(),
        email: "lucia@mail.example".to_string(),
        birth_date: date(1990, 5, 17),
        registered_at: now,
        updated_at: now,
    }
}

#[test]
fn test_merge_patient_overlays_given_fields() {
    let current = patient();

    let merged = merge_patient(
        &current,
        UpdatePatientRequest {
            address: Some("Avenida Sol 9".to_string()),
            birth_date: Some(date(1990, 5, 18)),
            ..Default::default()
        },
    );

    assert_eq!(merged.address, "Avenida Sol 9");
    assert_eq!(merged.birth_date, date(1990, 5, 18));
    assert_eq!(merged.document_id, current.document_id);
    assert_eq!(merged.registered_at, current.registered_at);
    assert_eq!(merged.id, current.id);
}

#[test]
fn test_merge_appointment_reschedules_and_keeps_status() {
    let mut current = appointment_at(Uuid::new_v4(), date(2025, 3, 14), time(9, 0));
    current.status = AppointmentStatus::Confirmed;

    let merged = merge_appointment(
        &current,
        UpdateAppointmentRequest {
            date: Some(date(2025, 3, 15)),
            time: Some(time(10, 30)),
            ..Default::default()
        },
    );

    assert_eq!(merged.date, date(2025, 3, 15));
    assert_eq!(merged.time, time(10, 30));
    assert_eq!(merged.status, AppointmentStatus::Confirmed);
    assert_eq!(merged.doctor_id, current.doctor_id);
    assert_eq!(merged.reason, current.reason);
}

#[test]
fn test_merge_consultation_keeps_unspecified_fields() {
    let now = Utc::now();
    let current = Consultation {
        id: Uuid::new_v4(),
        appointment_id: Uuid::new_v4(),
        diagnosis: "Migraine".to_string(),
        prescription: "Ibuprofen 400mg".to_string(),
        instructions: "Rest".to_string(),
        created_at: now,
        updated_at: now,
    };

    let merged = merge_consultation(
        &current,
        UpdateConsultationRequest {
            instructions: Some("Rest for two days".to_string()),
            ..Default::default()
        },
    );

    assert_eq!(merged.instructions, "Rest for two days");
    assert_eq!(merged.diagnosis, current.diagnosis);
    assert_eq!(merged.appointment_id, current.appointment_id);
}
