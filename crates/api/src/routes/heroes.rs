//! Route definitions for the hero resource, mounted at `/api/heroes`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::heroes;
use crate::state::AppState;

/// ```text
/// GET    /          -> list_heroes
/// POST   /          -> create_hero
/// GET    /search    -> search_heroes
/// POST   /bulk      -> bulk_create_heroes
/// GET    /{id}      -> get_hero
/// PUT    /{id}      -> update_hero
/// DELETE /{id}      -> delete_hero
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(heroes::list_heroes).post(heroes::create_hero))
        .route("/search", get(heroes::search_heroes))
        .route("/bulk", post(heroes::bulk_create_heroes))
        .route(
            "/{id}",
            get(heroes::get_hero)
                .put(heroes::update_hero)
                .delete(heroes::delete_hero),
        )
}
