use async_trait::async_trait;
use chrono::NaiveDate;
use clinic_core::{
    errors::ClinicResult,
    models::{appointment::Appointment, doctor::Doctor},
    stores::{AppointmentStore, DoctorStore},
};
use mockall::mock;
use uuid::Uuid;

// Mock stores for testing
mock! {
    pub Doctors {}

    #[async_trait]
    impl DoctorStore for Doctors {
        async fn get_doctor(&self, doctor_id: Uuid) -> ClinicResult<Doctor>;
    }
}

mock! {
    pub Appointments {}

    #[async_trait]
    impl AppointmentStore for Appointments {
        async fn find_appointments(
            &self,
            doctor_id: Uuid,
            date: NaiveDate,
        ) -> ClinicResult<Vec<Appointment>>;
    }
}
