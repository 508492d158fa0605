//! Record routes. Both `/players/by-id/...` routes share the `:citizenid` segment name (the router
//! rejects differently named params at the same position); a property `owner` is a citizenid.

use crate::handlers::{
    list_players, list_properties, list_properties_by_owner, list_users, list_vehicles, list_vehicles_by_citizen,
    read_user,
};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn record_routes(state: AppState) -> Router {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/by-id/:user_id", get(read_user))
        .route("/players", get(list_players))
        .route("/players/properties", get(list_properties))
        .route("/players/by-id/:citizenid/properties", get(list_properties_by_owner))
        .route("/players/vehicles", get(list_vehicles))
        .route("/players/by-id/:citizenid/vehicles", get(list_vehicles_by_citizen))
        .with_state(state)
}
