//! Reflected table model: what the database says each exposed table looks like.

use crate::error::AppError;
use std::collections::HashMap;

/// How a path value is coerced before it is bound against a column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnKind {
    Integer,
    Boolean,
    Uuid,
    Text,
    /// Anything else (dates, numeric, enums...). Compared through a `::text` cast.
    Other,
}

impl ColumnKind {
    /// Map an `information_schema.columns.data_type` value.
    pub fn from_data_type(data_type: &str) -> Self {
        match data_type.to_ascii_lowercase().as_str() {
            "smallint" | "integer" | "bigint" => ColumnKind::Integer,
            "boolean" => ColumnKind::Boolean,
            "uuid" => ColumnKind::Uuid,
            "text" | "character varying" | "character" => ColumnKind::Text,
            _ => ColumnKind::Other,
        }
    }
}

/// Cell types `row_to_json` decodes natively. Every other column is selected as `::text`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellType {
    Int2,
    Int4,
    Int8,
    Float4,
    Float8,
    Bool,
    Uuid,
    TimestampTz,
    Timestamp,
    Date,
    Text,
    Json,
}

impl CellType {
    /// From an `information_schema.columns.data_type` value.
    pub fn from_data_type(data_type: &str) -> Option<Self> {
        Some(match data_type.to_ascii_lowercase().as_str() {
            "smallint" => CellType::Int2,
            "integer" => CellType::Int4,
            "bigint" => CellType::Int8,
            "real" => CellType::Float4,
            "double precision" => CellType::Float8,
            "boolean" => CellType::Bool,
            "uuid" => CellType::Uuid,
            "timestamp with time zone" => CellType::TimestampTz,
            "timestamp without time zone" => CellType::Timestamp,
            "date" => CellType::Date,
            "text" | "character varying" | "character" | "name" => CellType::Text,
            "json" | "jsonb" => CellType::Json,
            _ => return None,
        })
    }

    /// From a wire type name as reported by the driver (e.g. "INT4", "VARCHAR").
    pub fn from_pg_type_name(name: &str) -> Option<Self> {
        Some(match name.to_ascii_uppercase().as_str() {
            "INT2" => CellType::Int2,
            "INT4" => CellType::Int4,
            "INT8" => CellType::Int8,
            "FLOAT4" => CellType::Float4,
            "FLOAT8" => CellType::Float8,
            "BOOL" => CellType::Bool,
            "UUID" => CellType::Uuid,
            "TIMESTAMPTZ" => CellType::TimestampTz,
            "TIMESTAMP" => CellType::Timestamp,
            "DATE" => CellType::Date,
            "TEXT" | "VARCHAR" | "BPCHAR" | "NAME" => CellType::Text,
            "JSON" | "JSONB" => CellType::Json,
            _ => return None,
        })
    }
}

#[derive(Clone, Debug)]
pub struct ColumnInfo {
    pub name: String,
    /// Raw `data_type` as reported by PostgreSQL (e.g. "integer", "USER-DEFINED").
    pub data_type: String,
    pub kind: ColumnKind,
}

impl ColumnInfo {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        let data_type = data_type.into();
        let kind = ColumnKind::from_data_type(&data_type);
        Self {
            name: name.into(),
            data_type,
            kind,
        }
    }

    /// Columns without a native `CellType` are selected as text.
    pub fn selects_as_text(&self) -> bool {
        CellType::from_data_type(&self.data_type).is_none()
    }
}

#[derive(Clone, Debug)]
pub struct TableInfo {
    pub schema_name: String,
    pub table_name: String,
    /// In ordinal order.
    pub columns: Vec<ColumnInfo>,
}

impl TableInfo {
    pub fn column(&self, name: &str) -> Result<&ColumnInfo, AppError> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| AppError::UnknownColumn {
                table: self.table_name.clone(),
                column: name.to_string(),
            })
    }
}

#[derive(Clone, Debug, Default)]
pub struct SchemaModel {
    tables: HashMap<String, TableInfo>,
}

impl SchemaModel {
    pub fn from_tables(tables: impl IntoIterator<Item = TableInfo>) -> Self {
        Self {
            tables: tables.into_iter().map(|t| (t.table_name.clone(), t)).collect(),
        }
    }

    pub fn table(&self, name: &str) -> Result<&TableInfo, AppError> {
        self.tables.get(name).ok_or_else(|| AppError::UnknownTable(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
