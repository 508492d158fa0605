//! Read-only REST API over a game-server database, plus a live server overview
//! aggregated from the game server's status endpoints.

pub mod error;
pub mod handlers;
pub mod overview;
pub mod response;
pub mod routes;
pub mod schema;
pub mod settings;
pub mod sql;
pub mod state;
pub mod store;

pub use error::{AppError, ConfigError, FetchError};
pub use overview::{HttpStatusFetcher, OverviewService, ServerOverview, StatusFetcher};
pub use routes::{app, common_routes, overview_routes, record_routes};
pub use schema::{load_from_pool, SchemaModel};
pub use settings::Settings;
pub use state::AppState;
pub use store::{GameDataRepository, MemoryRecordStore, PgRecordStore, RecordStore, Table};
