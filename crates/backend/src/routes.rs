use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;

/// Route configuration of the whole application
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // A001 Pilgrim handlers
        .route(
            "/api/pilgrim",
            get(handlers::a001_pilgrim::list_all).post(handlers::a001_pilgrim::upsert),
        )
        .route(
            "/api/pilgrim/testdata",
            post(handlers::a001_pilgrim::insert_test_data),
        )
        .route(
            "/api/pilgrim/:id",
            get(handlers::a001_pilgrim::get_by_id).delete(handlers::a001_pilgrim::delete),
        )
        .route(
            "/api/pilgrim/:id/relations",
            post(handlers::a001_pilgrim::add_relation),
        )
        .route(
            "/api/pilgrim/:id/relations/:related_id",
            axum::routing::delete(handlers::a001_pilgrim::remove_relation),
        )
}
