use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/users",
            get(handlers::staff::list_staff_users).post(handlers::staff::create_staff_user),
        )
        .route(
            "/api/users/:id",
            get(handlers::staff::get_staff_user)
                .put(handlers::staff::update_staff_user)
                .delete(handlers::staff::delete_staff_user),
        )
        .route("/api/users/:id/verify", post(handlers::staff::verify_password))
}
