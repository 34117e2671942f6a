use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/patients",
            get(handlers::patient::list_patients).post(handlers::patient::create_patient),
        )
        .route("/api/patients/search", get(handlers::patient::search_patients))
        .route(
            "/api/patients/:id",
            get(handlers::patient::get_patient)
                .put(handlers::patient::update_patient)
                .delete(handlers::patient::delete_patient),
        )
}
