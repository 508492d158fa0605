//! In-memory record store: rows held per table, matched by the text form of a column.

use crate::error::AppError;
use crate::store::{RecordStore, Table};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::RwLock;

#[derive(Default)]
pub struct MemoryRecordStore {
    tables: RwLock<HashMap<Table, Vec<Value>>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(self, table: Table, rows: Vec<Value>) -> Self {
        self.insert(table, rows);
        self
    }

    pub fn insert(&self, table: Table, rows: Vec<Value>) {
        let mut tables = self.tables.write().unwrap_or_else(|e| e.into_inner());
        tables.entry(table).or_default().extend(rows);
    }

    fn rows(&self, table: Table) -> Result<Vec<Value>, AppError> {
        let tables = self.tables.read().unwrap_or_else(|e| e.into_inner());
        tables
            .get(&table)
            .cloned()
            .ok_or_else(|| AppError::UnknownTable(table.name().to_string()))
    }
}

fn column_equals(row: &Value, column: &str, value: &str) -> bool {
    match row.get(column) {
        Some(Value::String(s)) => s == value,
        Some(Value::Null) | None => false,
        Some(other) => other.to_string() == value,
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn fetch_all(&self, table: Table) -> Result<Vec<Value>, AppError> {
        self.rows(table)
    }

    async fn fetch_one_where(&self, table: Table, column: &str, value: &str) -> Result<Value, AppError> {
        self.rows(table)?
            .into_iter()
            .find(|r| column_equals(r, column, value))
            .ok_or_else(|| AppError::NotFound(format!("{} with {} = {}", table.name(), column, value)))
    }

    async fn fetch_many_where(&self, table: Table, column: &str, value: &str) -> Result<Vec<Value>, AppError> {
        Ok(self
            .rows(table)?
            .into_iter()
            .filter(|r| column_equals(r, column, value))
            .collect())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
