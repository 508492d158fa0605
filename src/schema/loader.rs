//! Reflect table metadata from `information_schema` at startup.

use crate::error::AppError;
use crate::schema::resolved::{ColumnInfo, SchemaModel, TableInfo};
use sqlx::PgPool;
use std::collections::BTreeMap;

/// Load column metadata for `tables` in `schema`. Tables that do not exist are left out of
/// the model (lookups against them fail with `UnknownTable`).
pub async fn load_from_pool(pool: &PgPool, schema: &str, tables: &[&str]) -> Result<SchemaModel, AppError> {
    let names: Vec<String> = tables.iter().map(|t| t.to_string()).collect();
    let rows: Vec<(String, String, String)> = sqlx::query_as(
        "SELECT table_name::text, column_name::text, data_type::text \
         FROM information_schema.columns \
         WHERE table_schema = $1 AND table_name = ANY($2) \
         ORDER BY table_name, ordinal_position",
    )
    .bind(schema)
    .bind(names)
    .fetch_all(pool)
    .await?;

    let model = build_model(schema, rows);
    for name in tables {
        if !model.contains(name) {
            tracing::warn!(schema, table = %name, "table not found; its endpoints will fail");
        }
    }
    tracing::info!(schema, tables = model.len(), "schema reflected");
    Ok(model)
}

/// Group `(table, column, data_type)` rows (already in ordinal order) into a model.
pub fn build_model(schema: &str, rows: Vec<(String, String, String)>) -> SchemaModel {
    let mut by_table: BTreeMap<String, Vec<ColumnInfo>> = BTreeMap::new();
    for (table, column, data_type) in rows {
        by_table.entry(table).or_default().push(ColumnInfo::new(column, data_type));
    }
    SchemaModel::from_tables(by_table.into_iter().map(|(table_name, columns)| TableInfo {
        schema_name: schema.to_string(),
        table_name,
        columns,
    }))
}
