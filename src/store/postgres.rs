//! PostgreSQL-backed record store.

use crate::error::AppError;
use crate::schema::{CellType, SchemaModel, TableInfo};
use crate::sql::{select_all, select_where, BindValue, QueryBuf};
use crate::store::{RecordStore, Table};
use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use std::sync::Arc;

#[derive(Clone)]
pub struct PgRecordStore {
    pool: PgPool,
    model: Arc<SchemaModel>,
}

impl PgRecordStore {
    pub fn new(pool: PgPool, model: SchemaModel) -> Self {
        Self {
            pool,
            model: Arc::new(model),
        }
    }

    /// Build the WHERE query, or `None` when `value` cannot match the column's type.
    fn where_query(&self, table: Table, column: &str, value: &str, limit: Option<u32>) -> Result<Option<QueryBuf>, AppError> {
        let info: &TableInfo = self.model.table(table.name())?;
        let col = info.column(column)?;
        Ok(BindValue::for_column(col, value).map(|v| select_where(info, col, v, limit)))
    }

    /// Runs on one pooled connection; the connection returns to the pool when it drops,
    /// including on the error path.
    async fn query_many(&self, q: &QueryBuf) -> Result<Vec<Value>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut conn = self.pool.acquire().await?;
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = p.bind_to(query);
        }
        let rows = query.fetch_all(&mut *conn).await?;
        Ok(rows.iter().map(row_to_json).collect())
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn fetch_all(&self, table: Table) -> Result<Vec<Value>, AppError> {
        let q = select_all(self.model.table(table.name())?);
        self.query_many(&q).await
    }

    async fn fetch_one_where(&self, table: Table, column: &str, value: &str) -> Result<Value, AppError> {
        let not_found = || AppError::NotFound(format!("{} with {} = {}", table.name(), column, value));
        let Some(q) = self.where_query(table, column, value, Some(1))? else {
            return Err(not_found());
        };
        self.query_many(&q).await?.into_iter().next().ok_or_else(not_found)
    }

    async fn fetch_many_where(&self, table: Table, column: &str, value: &str) -> Result<Vec<Value>, AppError> {
        match self.where_query(table, column, value, None)? {
            Some(q) => self.query_many(&q).await,
            None => Ok(Vec::new()),
        }
    }

    async fn ping(&self) -> Result<(), AppError> {
        let mut conn = self.pool.acquire().await?;
        sqlx::query("SELECT 1").fetch_optional(&mut *conn).await?;
        Ok(())
    }
}

fn row_to_json(row: &PgRow) -> Value {
    use sqlx::{Column, TypeInfo};
    object_from_cells(row.columns().iter().map(|col| {
        let cell = CellType::from_pg_type_name(col.type_info().name());
        (col.name().to_string(), cell_to_value(row, col.ordinal(), cell))
    }))
}

/// Keys keep column order.
fn object_from_cells(cells: impl IntoIterator<Item = (String, Value)>) -> Value {
    Value::Object(cells.into_iter().collect())
}

/// Decode one cell by its wire type. Types without a `CellType` are tried as text, then null.
fn cell_to_value(row: &PgRow, idx: usize, cell: Option<CellType>) -> Value {
    use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
    use sqlx::Row;
    let decoded = match cell {
        Some(CellType::Int2) => row.try_get::<Option<i16>, _>(idx).map(|v| v.map(Value::from)),
        Some(CellType::Int4) => row.try_get::<Option<i32>, _>(idx).map(|v| v.map(Value::from)),
        Some(CellType::Int8) => row.try_get::<Option<i64>, _>(idx).map(|v| v.map(Value::from)),
        Some(CellType::Float4) => row
            .try_get::<Option<f32>, _>(idx)
            .map(|v| v.and_then(|n| serde_json::Number::from_f64(n as f64)).map(Value::Number)),
        Some(CellType::Float8) => row
            .try_get::<Option<f64>, _>(idx)
            .map(|v| v.and_then(serde_json::Number::from_f64).map(Value::Number)),
        Some(CellType::Bool) => row.try_get::<Option<bool>, _>(idx).map(|v| v.map(Value::Bool)),
        Some(CellType::Uuid) => row
            .try_get::<Option<uuid::Uuid>, _>(idx)
            .map(|v| v.map(|u| Value::String(u.to_string()))),
        Some(CellType::TimestampTz) => row
            .try_get::<Option<DateTime<Utc>>, _>(idx)
            .map(|v| v.map(|d| Value::String(d.to_rfc3339()))),
        Some(CellType::Timestamp) => row
            .try_get::<Option<NaiveDateTime>, _>(idx)
            .map(|v| v.map(|d| Value::String(d.format("%Y-%m-%dT%H:%M:%S%.f").to_string()))),
        Some(CellType::Date) => row
            .try_get::<Option<NaiveDate>, _>(idx)
            .map(|v| v.map(|d| Value::String(d.format("%Y-%m-%d").to_string()))),
        Some(CellType::Json) => row.try_get::<Option<Value>, _>(idx),
        Some(CellType::Text) | None => row.try_get::<Option<String>, _>(idx).map(|v| v.map(Value::String)),
    };
    match decoded {
        Ok(v) => v.unwrap_or(Value::Null),
        Err(e) => {
            tracing::debug!(column = idx, error = %e, "cell not decodable, returning null");
            Value::Null
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ColumnInfo;
    use serde_json::json;
    use sqlx::postgres::PgPoolOptions;

    /// The pool never connects; every case below must be decided before SQL runs.
    fn offline_store() -> PgRecordStore {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://gameserver@127.0.0.1:1/unused")
            .unwrap();
        let users = TableInfo {
            schema_name: "public".into(),
            table_name: "users".into(),
            columns: vec![
                ColumnInfo::new("userId", "integer"),
                ColumnInfo::new("license", "character varying"),
            ],
        };
        PgRecordStore::new(pool, SchemaModel::from_tables([users]))
    }

    #[tokio::test]
    async fn mistyped_lookup_is_not_found_without_querying() {
        let store = offline_store();
        let err = store.fetch_one_where(Table::Users, "userId", "abc").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref m) if m == "users with userId = abc"), "{:?}", err);
        let rows = store.fetch_many_where(Table::Users, "userId", "abc").await.unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn unknown_column_and_table_fail_before_querying() {
        let store = offline_store();
        let err = store.fetch_one_where(Table::Users, "citizenid", "X").await.unwrap_err();
        assert!(matches!(err, AppError::UnknownColumn { ref column, .. } if column == "citizenid"));
        let err = store.fetch_all(Table::Players).await.unwrap_err();
        assert!(matches!(err, AppError::UnknownTable(ref t) if t == "players"));
        let err = store.fetch_many_where(Table::PlayerVehicles, "citizenid", "X").await.unwrap_err();
        assert!(matches!(err, AppError::UnknownTable(_)));
    }

    #[test]
    fn row_objects_keep_column_order() {
        let row = object_from_cells([
            ("userId".to_string(), json!(1)),
            ("license".to_string(), json!("license:aa")),
            ("discord".to_string(), Value::Null),
        ]);
        assert_eq!(
            serde_json::to_string(&row).unwrap(),
            r#"{"userId":1,"license":"license:aa","discord":null}"#
        );
    }
}
