//! Translation of repository failures into domain errors.

use clinic_core::errors::ClinicError;

/// Whether `report` wraps a unique constraint violation raised by Postgres.
pub fn is_unique_violation(report: &eyre::Report) -> bool {
    report
        .downcast_ref::<sqlx::Error>()
        .and_then(|err| err.as_database_error())
        .is_some_and(|err| err.is_unique_violation())
}

/// Maps a failed write to `ClinicError::Conflict` when it hit a unique
/// constraint, and to `ClinicError::Database` otherwise.
///
/// Handlers check for duplicates before writing; this covers the requests
/// that race past that check.
pub fn conflict_or_database<F>(report: eyre::Report, conflict: F) -> ClinicError
where
    F: FnOnce() -> String,
{
    if is_unique_violation(&report) {
        tracing::warn!("Write rejected by unique constraint: {}", report);
        ClinicError::Conflict(conflict())
    } else {
        ClinicError::Database(report)
    }
}
