use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ClinicError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StaffRole {
    Secretary,
    Doctor,
    Administrator,
}

impl StaffRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            StaffRole::Secretary => "secretary",
            StaffRole::Doctor => "doctor",
            StaffRole::Administrator => "administrator",
        }
    }
}

impl fmt::Display for StaffRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StaffRole {
    type Err = ClinicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "secretary" => Ok(StaffRole::Secretary),
            "doctor" => Ok(StaffRole::Doctor),
            "administrator" => Ok(StaffRole::Administrator),
            other => Err(ClinicError::Validation(format!(
                "Role must be 'secretary', 'doctor' or 'administrator', got '{}'",
                other
            ))),
        }
    }
}

/// A clinic staff account. The password hash never leaves the database layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: StaffRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateStaffUserRequest {
    pub name: String,
    pub email: String,
    /// Parsed with [`StaffRole::from_str`] so that an unknown role is a
    /// validation error rather than a body rejection.
    pub role: String,
    pub password: String,
}

/// Partial update. A new password is hashed before it is stored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateStaffUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyPasswordRequest {
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyPasswordResponse {
    pub valid: bool,
}
