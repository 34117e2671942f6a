pub mod appointment;
pub mod availability;
pub mod consultation;
pub mod doctor;
pub mod patient;
pub mod specialty;
pub mod staff;

use chrono::{Local, NaiveDate};

/// The clinic's current calendar date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
