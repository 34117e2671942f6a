use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Clinical record written when a booked appointment takes place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Consultation {
    pub id: Uuid,
    pub appointment_id: Uuid,
    pub diagnosis: String,
    pub prescription: String,
    pub instructions: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateConsultationRequest {
    pub appointment_id: Uuid,
    pub diagnosis: String,
    pub prescription: String,
    pub instructions: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateConsultationRequest {
    pub appointment_id: Option<Uuid>,
    pub diagnosis: Option<String>,
    pub prescription: Option<String>,
    pub instructions: Option<String>,
}
