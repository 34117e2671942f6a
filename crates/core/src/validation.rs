//! Field validation for clinic records.
//!
//! Every check returns `ClinicError::Validation` with a message naming the
//! offending field, so handlers can surface it unchanged.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveTime};
use regex::Regex;

use crate::{
    errors::{ClinicError, ClinicResult},
    models::{
        appointment::{Appointment, CreateAppointmentRequest},
        consultation::CreateConsultationRequest,
        doctor::CreateDoctorRequest,
        patient::CreatePatientRequest,
        staff::CreateStaffUserRequest,
    },
};

pub const MAX_PHONE_LEN: usize = 15;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@]+@[^@]+\.[^@]+").expect("email pattern compiles"));

static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\+?\d{1,3}?[ -]?\(?\d{1,5}\)?[ -]?\d{1,4}[ -]?\d{1,4}[ -]?\d{1,4}$")
        .expect("phone pattern compiles")
});

pub fn require(field: &str, value: &str) -> ClinicResult<()> {
    if value.trim().is_empty() {
        return Err(ClinicError::Validation(format!("{} is required", field)));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> ClinicResult<()> {
    if !EMAIL_RE.is_match(email) {
        return Err(ClinicError::Validation(format!(
            "Email '{}' is not a valid address",
            email
        )));
    }
    Ok(())
}

pub fn validate_phone(phone: &str) -> ClinicResult<()> {
    if phone.chars().count() > MAX_PHONE_LEN || !PHONE_RE.is_match(phone) {
        return Err(ClinicError::Validation(format!(
            "Phone number '{}' is not valid",
            phone
        )));
    }
    Ok(())
}

pub fn validate_birth_date(birth_date: NaiveDate, today: NaiveDate) -> ClinicResult<()> {
    if birth_date > today {
        return Err(ClinicError::Validation(
            "Birth date cannot be in the future".to_string(),
        ));
    }
    Ok(())
}

/// A shift without an end is accepted here; availability rejects it later.
pub fn validate_shift_window(start: NaiveTime, end: Option<NaiveTime>) -> ClinicResult<()> {
    match end {
        Some(end) if end <= start => Err(ClinicError::Validation(format!(
            "Shift end {} must be after shift start {}",
            end.format("%H:%M"),
            start.format("%H:%M")
        ))),
        _ => Ok(()),
    }
}

pub fn validate_doctor(request: &CreateDoctorRequest) -> ClinicResult<()> {
    require("first_name", &request.first_name)?;
    require("last_name", &request.last_name)?;
    require("phone", &request.phone)?;
    require("email", &request.email)?;
    validate_phone(&request.phone)?;
    validate_email(&request.email)?;
    validate_shift_window(request.shift_start, request.shift_end)
}

pub fn validate_patient(request: &CreatePatientRequest, today: NaiveDate) -> ClinicResult<()> {
    require("first_name", &request.first_name)?;
    require("last_name", &request.last_name)?;
    require("document_id", &request.document_id)?;
    require("phone", &request.phone)?;
    require("email", &request.email)?;
    validate_phone(&request.phone)?;
    validate_email(&request.email)?;
    validate_birth_date(request.birth_date, today)
}

pub fn validate_appointment(
    request: &CreateAppointmentRequest,
    today: NaiveDate,
) -> ClinicResult<()> {
    match request.reason.as_deref() {
        Some(reason) => require("reason", reason)?,
        None => {
            return Err(ClinicError::Validation("reason is required".to_string()));
        }
    }

    if request.date < today {
        return Err(ClinicError::Validation(
            "Appointment date cannot be in the past".to_string(),
        ));
    }
    Ok(())
}

/// Checks an edited appointment against the stored one. The past-date rule
/// only applies when the slot moves, so old appointments stay editable.
pub fn validate_appointment_update(
    current: &Appointment,
    updated: &Appointment,
    today: NaiveDate,
) -> ClinicResult<()> {
    if !current.status.is_active() {
        return Err(ClinicError::Validation(
            "A cancelled appointment cannot be edited".to_string(),
        ));
    }

    require("reason", updated.reason.as_deref().unwrap_or_default())?;

    let moved = updated.doctor_id != current.doctor_id
        || updated.date != current.date
        || updated.time != current.time;
    if moved && updated.date < today {
        return Err(ClinicError::Validation(
            "Appointment date cannot be in the past".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_consultation(request: &CreateConsultationRequest) -> ClinicResult<()> {
    require("diagnosis", &request.diagnosis)?;
    require("prescription", &request.prescription)?;
    require("instructions", &request.instructions)
}

/// Consultations are only recorded against appointments that state a reason.
pub fn validate_consultation_appointment(appointment: &Appointment) -> ClinicResult<()> {
    match appointment.reason.as_deref() {
        Some(reason) if !reason.trim().is_empty() => Ok(()),
        _ => Err(ClinicError::Validation(format!(
            "Appointment {} has no reason recorded",
            appointment.id
        ))),
    }
}

pub fn validate_staff_user(request: &CreateStaffUserRequest) -> ClinicResult<()> {
    validate_staff_profile(&request.name, &request.email, &request.role)?;
    require("password", &request.password)
}

/// Account fields other than the password.
pub fn validate_staff_profile(name: &str, email: &str, role: &str) -> ClinicResult<()> {
    require("name", name)?;
    require("email", email)?;
    require("role", role)?;
    validate_email(email)
}
