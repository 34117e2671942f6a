//! Domain types and scheduling rules for the clinic service.
//!
//! This crate has no knowledge of HTTP or SQL. Persistence is reached only
//! through the traits in [`stores`], which the `clinic-db` crate implements.

pub mod availability;
pub mod errors;
pub mod models;
pub mod stores;
pub mod validation;
