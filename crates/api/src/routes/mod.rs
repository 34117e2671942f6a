pub mod appointment;
pub mod availability;
pub mod consultation;
pub mod doctor;
pub mod health;
pub mod patient;
pub mod specialty;
pub mod staff;
