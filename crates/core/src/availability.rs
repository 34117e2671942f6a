//! # Slot Availability
//!
//! Computes the bookable time slots of a doctor on a given date.
//!
//! ## Algorithm
//!
//! 1. The doctor's shift window `[shift_start, shift_end)` is sliced into
//!    fixed 30 minute slots. A slot starting exactly at `shift_end` is not
//!    part of the shift.
//! 2. The appointments booked with the doctor on that date are collapsed into
//!    a set of start times.
//! 3. A slot is occupied when its start time is in that set. Matching is
//!    exact: an appointment at 08:15 does not occupy the 08:00 slot.
//!
//! Slots are returned in ascending order and are recomputed on every call.

use std::{collections::HashSet, iter::FusedIterator};

use chrono::{Duration, NaiveDate, NaiveTime};
use tracing::debug;
use uuid::Uuid;

use crate::{
    errors::{ClinicError, ClinicResult},
    models::{
        doctor::Doctor,
        slot::{DoctorAvailability, Slot},
    },
    stores::{AppointmentStore, DoctorStore},
};

/// Length of a single appointment slot.
pub const SLOT_DURATION_MINUTES: i64 = 30;

pub fn slot_duration() -> Duration {
    Duration::minutes(SLOT_DURATION_MINUTES)
}

/// A doctor's daily availability interval, `[start, end)`.
///
/// A window whose end is not after its start is empty; it yields no slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl ShiftWindow {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// Builds the window from a doctor record.
    ///
    /// # Errors
    ///
    /// * `ClinicError::Validation` - the doctor has no end-of-shift time, so
    ///   the shift cannot be bounded
    pub fn for_doctor(doctor: &Doctor) -> ClinicResult<Self> {
        let end = doctor.shift_end.ok_or_else(|| {
            ClinicError::Validation(format!(
                "{} has no end-of-shift time configured",
                doctor.display_name()
            ))
        })?;

        Ok(Self::new(doctor.shift_start, end))
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Lazily yields the start time of every slot in the window.
    pub fn slot_times(&self) -> SlotTimes {
        SlotTimes {
            next: Some(self.start),
            end: self.end,
        }
    }
}

/// Iterator over slot start times, see [`ShiftWindow::slot_times`].
#[derive(Debug, Clone)]
pub struct SlotTimes {
    next: Option<NaiveTime>,
    end: NaiveTime,
}

impl Iterator for SlotTimes {
    type Item = NaiveTime;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.filter(|time| *time < self.end)?;

        // Stop instead of wrapping past midnight back to the start of the day.
        let (following, wrapped_secs) = current.overflowing_add_signed(slot_duration());
        self.next = (wrapped_secs == 0).then_some(following);

        Some(current)
    }
}

impl FusedIterator for SlotTimes {}

/// Flags every slot of `window` whose start time is in `booked`.
pub fn mark_slots(window: &ShiftWindow, booked: &HashSet<NaiveTime>) -> Vec<Slot> {
    window
        .slot_times()
        .map(|time| Slot {
            time,
            occupied: booked.contains(&time),
        })
        .collect()
}

/// Computes the slots of `doctor` on `date`, flagging the ones already booked.
///
/// The shift window is resolved before the appointment store is queried, so a
/// doctor without an end-of-shift time never triggers a store read.
///
/// # Errors
///
/// * `ClinicError::Validation` - the doctor has no end-of-shift time
/// * any error returned by the appointment store
pub async fn compute_available_slots<A>(
    appointments: &A,
    doctor: &Doctor,
    date: NaiveDate,
) -> ClinicResult<Vec<Slot>>
where
    A: AppointmentStore + ?Sized,
{
    let window = ShiftWindow::for_doctor(doctor)?;

    let booked: HashSet<NaiveTime> = appointments
        .find_appointments(doctor.id, date)
        .await?
        .into_iter()
        .map(|appointment| appointment.time)
        .collect();

    let slots = mark_slots(&window, &booked);

    debug!(
        "Computed {} slots for doctor {} on {} ({} booked times)",
        slots.len(),
        doctor.id,
        date,
        booked.len()
    );

    Ok(slots)
}

/// Uses `today` when the caller did not ask for a specific date.
pub fn resolve_date(requested: Option<NaiveDate>, today: NaiveDate) -> NaiveDate {
    requested.unwrap_or(today)
}

/// Resolves the doctor and computes their availability on the requested date.
///
/// # Errors
///
/// * `ClinicError::NotFound` - no doctor with `doctor_id`
/// * `ClinicError::Validation` - the doctor has no end-of-shift time
/// * any error returned by either store
pub async fn doctor_availability<D, A>(
    doctors: &D,
    appointments: &A,
    doctor_id: Uuid,
    requested_date: Option<NaiveDate>,
    today: NaiveDate,
) -> ClinicResult<DoctorAvailability>
where
    D: DoctorStore + ?Sized,
    A: AppointmentStore + ?Sized,
{
    let doctor = doctors.get_doctor(doctor_id).await?;
    let date = resolve_date(requested_date, today);
    let slots = compute_available_slots(appointments, &doctor, date).await?;

    Ok(DoctorAvailability {
        doctor_id: doctor.id,
        date,
        slots,
    })
}
