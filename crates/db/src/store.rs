//! PostgreSQL-backed implementations of the availability stores.

use async_trait::async_trait;
use chrono::NaiveDate;
use clinic_core::{
    errors::{ClinicError, ClinicResult},
    models::{appointment::Appointment, doctor::Doctor},
    stores::{AppointmentStore, DoctorStore},
};
use uuid::Uuid;

use crate::{repositories, DbPool};

#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DoctorStore for PgStore {
    async fn get_doctor(&self, doctor_id: Uuid) -> ClinicResult<Doctor> {
        let doctor = repositories::doctor::get_doctor_by_id(&self.pool, doctor_id)
            .await
            .map_err(ClinicError::Database)?
            .ok_or_else(|| ClinicError::NotFound(format!("Doctor with ID {} not found", doctor_id)))?;

        Ok(doctor.into())
    }
}

#[async_trait]
impl AppointmentStore for PgStore {
    async fn find_appointments(
        &self,
        doctor_id: Uuid,
        date: NaiveDate,
    ) -> ClinicResult<Vec<Appointment>> {
        repositories::appointment::get_appointments_for_doctor_on(&self.pool, doctor_id, date)
            .await
            .map_err(ClinicError::Database)?
            .into_iter()
            .map(Appointment::try_from)
            .collect()
    }
}
