//! Employee API module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// Employee router
///
/// Authorization happens in the service layer, so every route takes the
/// caller's [`crate::auth::AuthContext`] rather than a middleware gate.
pub fn router() -> Router<ServerState> {
    Router::new()
        .route(
            "/api/employees",
            get(handler::list).post(handler::create),
        )
        .route(
            "/api/employees/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
}
