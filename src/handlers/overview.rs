use crate::error::AppError;
use crate::overview::ServerOverview;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct OverviewParams {
    /// Overrides the configured server base URL for this request.
    pub base_url: Option<String>,
}

/// Always 200 unless the base URL itself is unusable (400).
pub async fn server_overview(
    State(state): State<AppState>,
    Query(params): Query<OverviewParams>,
) -> Result<Json<ServerOverview>, AppError> {
    let base_url = params.base_url.as_deref().filter(|s| !s.trim().is_empty());
    let overview = state.overview.overview(base_url).await?;
    Ok(Json(overview))
}
