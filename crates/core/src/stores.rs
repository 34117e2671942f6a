//! Read-side collaborators of the availability calculator.
//!
//! `clinic-db` provides the PostgreSQL implementations and mockall mocks.

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    errors::ClinicResult,
    models::{appointment::Appointment, doctor::Doctor},
};

#[async_trait]
pub trait DoctorStore: Send + Sync {
    /// Fails with [`ClinicError::NotFound`](crate::errors::ClinicError::NotFound)
    /// when no doctor has the given id.
    async fn get_doctor(&self, doctor_id: Uuid) -> ClinicResult<Doctor>;
}

#[async_trait]
pub trait AppointmentStore: Send + Sync {
    /// Every appointment booked with `doctor_id` on `date`, in any status.
    async fn find_appointments(
        &self,
        doctor_id: Uuid,
        date: NaiveDate,
    ) -> ClinicResult<Vec<Appointment>>;
}
