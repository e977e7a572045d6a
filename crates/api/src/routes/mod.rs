pub mod health;
pub mod heroes;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /heroes                 list (GET), create (POST)
/// /heroes/search          name substring search (GET)
/// /heroes/bulk            bulk create (POST)
/// /heroes/{id}            get, full replace (PUT), delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/heroes", heroes::router())
}
