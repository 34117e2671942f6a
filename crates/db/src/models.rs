use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use clinic_core::{
    errors::ClinicError,
    models::{
        appointment::Appointment, consultation::Consultation, doctor::Doctor, patient::Patient,
        specialty::Specialty, staff::StaffUser,
    },
};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSpecialty {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbDoctor {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub specialty_id: Uuid,
    pub phone: String,
    pub email: String,
    pub availability_notes: String,
    pub shift_start: NaiveTime,
    pub shift_end: Option<NaiveTime>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbPatient {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub document_id: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub birth_date: NaiveDate,
    pub registered_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAppointment {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    pub appointment_date: NaiveDate,
    pub appointment_time: NaiveTime,
    pub status: String,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbConsultation {
    pub id: Uuid,
    pub appointment_id: Uuid,
    pub diagnosis: String,
    pub prescription: String,
    pub instructions: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbStaffUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DbSpecialty> for Specialty {
    fn from(row: DbSpecialty) -> Self {
        Specialty {
            id: row.id,
            name: row.name,
            created_at: row.created_at,
        }
    }
}

impl From<DbDoctor> for Doctor {
    fn from(row: DbDoctor) -> Self {
        Doctor {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            specialty_id: row.specialty_id,
            phone: row.phone,
            email: row.email,
            availability_notes: row.availability_notes,
            shift_start: row.shift_start,
            shift_end: row.shift_end,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<DbPatient> for Patient {
    fn from(row: DbPatient) -> Self {
        Patient {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            document_id: row.document_id,
            address: row.address,
            phone: row.phone,
            email: row.email,
            birth_date: row.birth_date,
            registered_at: row.registered_at,
            updated_at: row.updated_at,
        }
    }
}

impl TryFrom<DbAppointment> for Appointment {
    type Error = ClinicError;

    fn try_from(row: DbAppointment) -> Result<Self, Self::Error> {
        Ok(Appointment {
            id: row.id,
            patient_id: row.patient_id,
            doctor_id: row.doctor_id,
            date: row.appointment_date,
            time: row.appointment_time,
            status: row.status.parse()?,
            reason: row.reason,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl From<DbConsultation> for Consultation {
    fn from(row: DbConsultation) -> Self {
        Consultation {
            id: row.id,
            appointment_id: row.appointment_id,
            diagnosis: row.diagnosis,
            prescription: row.prescription,
            instructions: row.instructions,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl TryFrom<DbStaffUser> for StaffUser {
    type Error = ClinicError;

    fn try_from(row: DbStaffUser) -> Result<Self, Self::Error> {
        Ok(StaffUser {
            id: row.id,
            name: row.name,
            email: row.email,
            role: row.role.parse()?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
