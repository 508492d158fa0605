//! Read-only record handlers. Each wraps its rows under the entity's key.

use crate::error::AppError;
use crate::response::{keyed, keyed_many};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};

pub async fn list_users(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    Ok(keyed_many("users", state.repository.users().await?))
}

pub async fn read_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user = state.repository.user_by_id(&user_id).await?;
    Ok(keyed("user", user))
}

pub async fn list_players(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    Ok(keyed_many("players", state.repository.players().await?))
}

pub async fn list_properties(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    Ok(keyed_many("properties", state.repository.properties().await?))
}

pub async fn list_properties_by_owner(
    State(state): State<AppState>,
    Path(owner): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    Ok(keyed_many("properties", state.repository.properties_by_owner(&owner).await?))
}

pub async fn list_vehicles(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    Ok(keyed_many("player_vehicles", state.repository.player_vehicles().await?))
}

pub async fn list_vehicles_by_citizen(
    State(state): State<AppState>,
    Path(citizenid): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let rows = state.repository.player_vehicles_by_citizen(&citizenid).await?;
    Ok(keyed_many("player_vehicles", rows))
}
