mod common;
mod overview;
mod records;

pub use common::common_routes;
pub use overview::overview_routes;
pub use records::record_routes;

use crate::state::AppState;
use axum::Router;
use tower_http::trace::TraceLayer;

/// Full application router: operational, record and overview routes with request tracing.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(record_routes(state.clone()))
        .merge(overview_routes(state))
        .layer(TraceLayer::new_for_http())
}
