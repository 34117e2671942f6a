use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime, Utc};
use clinic_core::{
    availability::{
        ShiftWindow, compute_available_slots, doctor_availability, mark_slots, resolve_date,
    },
    errors::{ClinicError, ClinicResult},
    models::{
        appointment::{Appointment, AppointmentStatus},
        doctor::Doctor,
        slot::Slot,
    },
    stores::{AppointmentStore, DoctorStore},
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use uuid::Uuid;

fn t(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
}

fn doctor(shift_start: NaiveTime, shift_end: Option<NaiveTime>) -> Doctor {
    let now = Utc::now();
    Doctor {
        id: Uuid::new_v4(),
        first_name: "Ana".to_string(),
        last_name: "Torres".to_string(),
        specialty_id: Uuid::new_v4(),
        phone: "+34 600 123 456".to_string(),
        email: "ana.torres@clinic.example".to_string(),
        availability_notes: String::new(),
        shift_start,
        shift_end,
        created_at: now,
        updated_at: now,
    }
}

fn appointment(doctor_id: Uuid, date: NaiveDate, time: NaiveTime) -> Appointment {
    let now = Utc::now();
    Appointment {
        id: Uuid::new_v4(),
        patient_id: Uuid::new_v4(),
        doctor_id,
        date,
        time,
        status: AppointmentStatus::Pending,
        reason: Some("Checkup".to_string()),
        created_at: now,
        updated_at: now,
    }
}

/// Store serving a fixed list, filtered the way the database filters.
struct FixedStore {
    doctors: Vec<Doctor>,
    appointments: Vec<Appointment>,
}

#[async_trait]
impl DoctorStore for FixedStore {
    async fn get_doctor(&self, doctor_id: Uuid) -> ClinicResult<Doctor> {
        self.doctors
            .iter()
            .find(|doctor| doctor.id == doctor_id)
            .cloned()
            .ok_or_else(|| ClinicError::NotFound(format!("Doctor with ID {} not found", doctor_id)))
    }
}

#[async_trait]
impl AppointmentStore for FixedStore {
    async fn find_appointments(
        &self,
        doctor_id: Uuid,
        date: NaiveDate,
    ) -> ClinicResult<Vec<Appointment>> {
        Ok(self
            .appointments
            .iter()
            .filter(|a| a.doctor_id == doctor_id && a.date == date)
            .cloned()
            .collect())
    }
}

#[rstest]
#[case(t(8, 0), t(9, 0), vec![t(8, 0), t(8, 30)])]
#[case(t(8, 0), t(8, 30), vec![t(8, 0)])]
#[case(t(8, 0), t(8, 0), vec![])]
#[case(t(9, 0), t(8, 0), vec![])]
#[case(t(8, 0), t(8, 45), vec![t(8, 0), t(8, 30)])]
#[case(t(8, 0), t(8, 1), vec![t(8, 0)])]
fn test_slot_times_cover_shift_window(
    #[case] start: NaiveTime,
    #[case] end: NaiveTime,
    #[case] expected: Vec<NaiveTime>,
) {
    let times: Vec<NaiveTime> = ShiftWindow::new(start, end).slot_times().collect();
    assert_eq!(times, expected);
}

#[test]
fn test_slot_times_stop_at_midnight() {
    let window = ShiftWindow::new(t(23, 0), NaiveTime::from_hms_opt(23, 59, 59).unwrap());

    let times: Vec<NaiveTime> = window.slot_times().collect();

    assert_eq!(times, vec![t(23, 0), t(23, 30)]);
}

#[test]
fn test_slot_times_strictly_increasing_over_full_day() {
    let window = ShiftWindow::new(t(0, 0), NaiveTime::from_hms_opt(23, 59, 59).unwrap());

    let times: Vec<NaiveTime> = window.slot_times().collect();

    assert_eq!(times.len(), 48);
    assert!(times.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn test_slot_count_is_ceiling_of_shift_length() {
    let window = ShiftWindow::new(t(9, 0), t(17, 10));

    // 8h10m -> 16 full slots plus the partial one starting at 17:00
    assert_eq!(window.slot_times().count(), 17);
}

#[test]
fn test_mark_slots_exact_match_only() {
    let window = ShiftWindow::new(t(8, 0), t(9, 0));
    let booked: HashSet<NaiveTime> = [t(8, 15), t(8, 30)].into_iter().collect();

    let slots = mark_slots(&window, &booked);

    assert_eq!(
        slots,
        vec![
            Slot { time: t(8, 0), occupied: false },
            Slot { time: t(8, 30), occupied: true },
        ]
    );
}

#[test]
fn test_empty_window_detection() {
    assert!(ShiftWindow::new(t(8, 0), t(8, 0)).is_empty());
    assert!(ShiftWindow::new(t(10, 0), t(8, 0)).is_empty());
    assert!(!ShiftWindow::new(t(8, 0), t(8, 30)).is_empty());
}

#[test]
fn test_window_requires_shift_end() {
    let result = ShiftWindow::for_doctor(&doctor(t(8, 0), None));

    match result {
        Err(ClinicError::Validation(message)) => assert!(message.contains("end-of-shift")),
        other => panic!("Expected Validation error, got: {:?}", other),
    }
}

#[tokio::test]
async fn test_free_shift_without_appointments() {
    let doc = doctor(t(8, 0), Some(t(9, 0)));
    let store = FixedStore { doctors: vec![], appointments: vec![] };

    let slots = compute_available_slots(&store, &doc, day()).await.unwrap();

    assert_eq!(
        slots,
        vec![
            Slot { time: t(8, 0), occupied: false },
            Slot { time: t(8, 30), occupied: false },
        ]
    );
}

#[tokio::test]
async fn test_booked_slot_is_occupied() {
    let doc = doctor(t(8, 0), Some(t(9, 0)));
    let store = FixedStore {
        doctors: vec![],
        appointments: vec![appointment(doc.id, day(), t(8, 30))],
    };

    let slots = compute_available_slots(&store, &doc, day()).await.unwrap();

    assert_eq!(
        slots,
        vec![
            Slot { time: t(8, 0), occupied: false },
            Slot { time: t(8, 30), occupied: true },
        ]
    );
}

#[tokio::test]
async fn test_appointments_of_other_days_and_doctors_are_ignored() {
    let doc = doctor(t(8, 0), Some(t(9, 0)));
    let other_day = day().succ_opt().unwrap();
    let store = FixedStore {
        doctors: vec![],
        appointments: vec![
            appointment(doc.id, other_day, t(8, 0)),
            appointment(Uuid::new_v4(), day(), t(8, 30)),
        ],
    };

    let slots = compute_available_slots(&store, &doc, day()).await.unwrap();

    assert!(slots.iter().all(|slot| !slot.occupied));
}

#[tokio::test]
async fn test_duplicate_bookings_collapse_to_one_slot() {
    let doc = doctor(t(8, 0), Some(t(9, 0)));
    let store = FixedStore {
        doctors: vec![],
        appointments: vec![
            appointment(doc.id, day(), t(8, 0)),
            appointment(doc.id, day(), t(8, 0)),
        ],
    };

    let slots = compute_available_slots(&store, &doc, day()).await.unwrap();

    assert_eq!(slots.len(), 2);
    assert_eq!(slots.iter().filter(|slot| slot.occupied).count(), 1);
}

#[tokio::test]
async fn test_computation_is_idempotent() {
    let doc = doctor(t(8, 0), Some(t(12, 0)));
    let store = FixedStore {
        doctors: vec![],
        appointments: vec![appointment(doc.id, day(), t(10, 30))],
    };

    let first = compute_available_slots(&store, &doc, day()).await.unwrap();
    let second = compute_available_slots(&store, &doc, day()).await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_availability_defaults_to_today() {
    let doc = doctor(t(8, 0), Some(t(9, 0)));
    let doctor_id = doc.id;
    let today = day();
    let store = FixedStore {
        doctors: vec![doc],
        appointments: vec![appointment(doctor_id, today, t(8, 0))],
    };

    let availability = doctor_availability(&store, &store, doctor_id, None, today)
        .await
        .unwrap();

    assert_eq!(availability.date, today);
    assert_eq!(availability.doctor_id, doctor_id);
    assert!(availability.slots[0].occupied);
}

#[tokio::test]
async fn test_availability_unknown_doctor() {
    let store = FixedStore { doctors: vec![], appointments: vec![] };

    let result = doctor_availability(&store, &store, Uuid::new_v4(), None, day()).await;

    assert!(matches!(result, Err(ClinicError::NotFound(_))));
}

#[test]
fn test_resolve_date_prefers_requested() {
    let requested = NaiveDate::from_ymd_opt(2030, 1, 2).unwrap();

    assert_eq!(resolve_date(Some(requested), day()), requested);
    assert_eq!(resolve_date(None, day()), day());
}
