use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new().route(
        "/api/specialties",
        get(handlers::specialty::list_specialties).post(handlers::specialty::create_specialty),
    )
}
