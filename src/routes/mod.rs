use axum::{routing::get, Router};

use crate::types::app_state::AppState;

pub mod get_location_search;
pub mod get_sentiment;

pub fn apply_routes(app: Router<AppState>) -> Router<AppState> {
    app.route(
        "/location-search",
        get(get_location_search::get_location_search),
    )
    .route("/sentiment", get(get_sentiment::get_sentiment))
}
