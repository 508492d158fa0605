//! Typed lookups per game entity. Table and column names live here, not in handlers.

use crate::error::AppError;
use crate::store::{RecordStore, Table};
use serde_json::Value;
use std::sync::Arc;

pub const USER_ID_COLUMN: &str = "userId";
pub const PROPERTY_OWNER_COLUMN: &str = "owner";
pub const VEHICLE_CITIZEN_COLUMN: &str = "citizenid";

#[derive(Clone)]
pub struct GameDataRepository {
    store: Arc<dyn RecordStore>,
}

impl GameDataRepository {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub async fn users(&self) -> Result<Vec<Value>, AppError> {
        self.store.fetch_all(Table::Users).await
    }

    pub async fn user_by_id(&self, user_id: &str) -> Result<Value, AppError> {
        self.store
            .fetch_one_where(Table::Users, USER_ID_COLUMN, user_id)
            .await
            .map_err(|e| match e {
                AppError::NotFound(_) => AppError::NotFound("User not found".into()),
                other => other,
            })
    }

    pub async fn players(&self) -> Result<Vec<Value>, AppError> {
        self.store.fetch_all(Table::Players).await
    }

    pub async fn properties(&self) -> Result<Vec<Value>, AppError> {
        self.store.fetch_all(Table::Properties).await
    }

    pub async fn properties_by_owner(&self, owner: &str) -> Result<Vec<Value>, AppError> {
        self.store
            .fetch_many_where(Table::Properties, PROPERTY_OWNER_COLUMN, owner)
            .await
    }

    pub async fn player_vehicles(&self) -> Result<Vec<Value>, AppError> {
        self.store.fetch_all(Table::PlayerVehicles).await
    }

    pub async fn player_vehicles_by_citizen(&self, citizenid: &str) -> Result<Vec<Value>, AppError> {
        self.store
            .fetch_many_where(Table::PlayerVehicles, VEHICLE_CITIZEN_COLUMN, citizenid)
            .await
    }

    pub async fn ping(&self) -> Result<(), AppError> {
        self.store.ping().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryRecordStore;
    use serde_json::json;

    fn repo() -> GameDataRepository {
        let store = MemoryRecordStore::new()
            .with_rows(Table::Users, vec![json!({"userId": 7, "username": "carol"})])
            .with_rows(
                Table::Properties,
                vec![
                    json!({"id": 1, "owner": "ABC123", "property": "apartment1"}),
                    json!({"id": 2, "owner": "XYZ999", "property": "house2"}),
                    json!({"id": 3, "owner": "ABC123", "property": "garage3"}),
                ],
            )
            .with_rows(Table::PlayerVehicles, vec![json!({"citizenid": "ABC123", "plate": "8ABC123"})]);
        GameDataRepository::new(Arc::new(store))
    }

    #[tokio::test]
    async fn user_lookup_uses_user_id_column() {
        let user = repo().user_by_id("7").await.unwrap();
        assert_eq!(user["username"], "carol");
    }

    #[tokio::test]
    async fn missing_user_reports_user_not_found() {
        let err = repo().user_by_id("8").await.unwrap_err();
        assert_eq!(err.to_string(), "not found: User not found");
    }

    #[tokio::test]
    async fn properties_by_owner_keeps_order() {
        let rows = repo().properties_by_owner("ABC123").await.unwrap();
        let ids: Vec<_> = rows.iter().map(|r| r["id"].as_i64().unwrap()).collect();
        assert_eq!(ids, [1, 3]);
    }

    #[tokio::test]
    async fn vehicles_for_unknown_citizen_is_empty() {
        assert!(repo().player_vehicles_by_citizen("NOPE").await.unwrap().is_empty());
        assert_eq!(repo().player_vehicles().await.unwrap().len(), 1);
    }
}
