use crate::handlers::server_overview;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn overview_routes(state: AppState) -> Router {
    Router::new()
        .route("/server/overview", get(server_overview))
        .with_state(state)
}
