use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers::{self, AppState};

/// Build the full route table over a shared item service.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/admins", post(handlers::register).get(handlers::list_admins))
        .route("/token", post(handlers::login))
        .route("/items", get(handlers::list_items).post(handlers::create_item))
        .route(
            "/items/:date",
            get(handlers::get_item)
                .put(handlers::edit_item)
                .delete(handlers::delete_item),
        )
        .route("/items/:date/exists", get(handlers::item_exists))
        .route("/items/:date/image", get(handlers::get_image))
        .route("/reconcile", post(handlers::reconcile))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
