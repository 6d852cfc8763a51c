use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{delete, get, patch, post},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/search", get(handlers::search))
        .route("/api/product/:ean", get(handlers::product_by_barcode))
        .route("/api/day", get(handlers::get_day))
        .route("/api/tracking", get(handlers::get_tracking))
        .route("/api/history", post(handlers::save_item))
        .route(
            "/api/history/:id",
            patch(handlers::set_quantity).delete(handlers::remove_item),
        )
        .route("/api/recents", get(handlers::get_recents))
        .route("/api/favorites", get(handlers::get_favorites))
        .route("/api/favorites/toggle", post(handlers::toggle_favorite))
        .route(
            "/api/preferences",
            get(handlers::get_preferences).put(handlers::put_preferences),
        )
        .route("/api/updates", get(handlers::get_updates))
        .route("/api/data", delete(handlers::clear_data))
        .with_state(state)
}
