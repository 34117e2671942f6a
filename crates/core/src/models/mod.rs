pub mod appointment;
pub mod consultation;
pub mod doctor;
pub mod patient;
pub mod slot;
pub mod specialty;
pub mod staff;
