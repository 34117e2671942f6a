use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/consultations",
            get(handlers::consultation::list_consultations)
                .post(handlers::consultation::create_consultation),
        )
        .route(
            "/api/consultations/:id",
            get(handlers::consultation::get_consultation)
                .put(handlers::consultation::update_consultation)
                .delete(handlers::consultation::delete_consultation),
        )
}
