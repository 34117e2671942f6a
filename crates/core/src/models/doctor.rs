use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub specialty_id: Uuid,
    pub phone: String,
    pub email: String,
    /// Free-form description shown to staff, e.g. "Mon-Fri, 9:00 - 17:00".
    pub availability_notes: String,
    pub shift_start: NaiveTime,
    /// Unset for doctors whose schedule has not been configured yet.
    pub shift_end: Option<NaiveTime>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Doctor {
    pub fn display_name(&self) -> String {
        format!("Dr. {} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDoctorRequest {
    pub first_name: String,
    pub last_name: String,
    pub specialty_id: Uuid,
    pub phone: String,
    pub email: String,
    #[serde(default)]
    pub availability_notes: String,
    pub shift_start: NaiveTime,
    pub shift_end: Option<NaiveTime>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateDoctorRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub specialty_id: Option<Uuid>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub availability_notes: Option<String>,
    pub shift_start: Option<NaiveTime>,
    pub shift_end: Option<NaiveTime>,
}
