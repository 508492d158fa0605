//! Read-only record store: generic row access plus the typed game-data repository on top.

pub mod memory;
pub mod postgres;
pub mod repository;

pub use memory::MemoryRecordStore;
pub use postgres::PgRecordStore;
pub use repository::GameDataRepository;

use crate::error::AppError;
use async_trait::async_trait;
use serde_json::Value;

/// Tables exposed over HTTP.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Table {
    Users,
    Players,
    Properties,
    PlayerVehicles,
}

impl Table {
    pub const ALL: [Table; 4] = [Table::Users, Table::Players, Table::Properties, Table::PlayerVehicles];

    pub fn name(self) -> &'static str {
        match self {
            Table::Users => "users",
            Table::Players => "players",
            Table::Properties => "properties",
            Table::PlayerVehicles => "player_vehicles",
        }
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|t| t.name()).collect()
    }
}

/// Rows are JSON objects keyed by column name.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn fetch_all(&self, table: Table) -> Result<Vec<Value>, AppError>;

    /// First row where `column` equals `value`; `NotFound` if there is none.
    async fn fetch_one_where(&self, table: Table, column: &str, value: &str) -> Result<Value, AppError>;

    /// All rows where `column` equals `value`. Zero rows is an empty vec, not an error.
    async fn fetch_many_where(&self, table: Table, column: &str, value: &str) -> Result<Vec<Value>, AppError>;

    /// Cheap connectivity check for readiness.
    async fn ping(&self) -> Result<(), AppError>;
}
