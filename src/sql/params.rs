//! Coerce raw path values into typed bind parameters.

use crate::schema::{ColumnInfo, ColumnKind};
use sqlx::postgres::{PgArguments, Postgres};
use sqlx::query::Query;

/// A value bound against a column in a `WHERE` clause.
#[derive(Clone, Debug, PartialEq)]
pub enum BindValue {
    Int(i64),
    Bool(bool),
    Uuid(uuid::Uuid),
    Text(String),
}

impl BindValue {
    /// Coerce `raw` for `column`. `None` means the value can never equal a stored value
    /// (e.g. "abc" against an integer column), so the lookup matches no rows.
    pub fn for_column(column: &ColumnInfo, raw: &str) -> Option<Self> {
        match column.kind {
            ColumnKind::Integer => raw.trim().parse().ok().map(BindValue::Int),
            ColumnKind::Boolean => match raw.trim().to_ascii_lowercase().as_str() {
                "true" | "t" | "1" => Some(BindValue::Bool(true)),
                "false" | "f" | "0" => Some(BindValue::Bool(false)),
                _ => None,
            },
            ColumnKind::Uuid => uuid::Uuid::parse_str(raw.trim()).ok().map(BindValue::Uuid),
            ColumnKind::Text | ColumnKind::Other => Some(BindValue::Text(raw.to_string())),
        }
    }

    pub fn bind_to<'q>(&self, query: Query<'q, Postgres, PgArguments>) -> Query<'q, Postgres, PgArguments> {
        match self {
            BindValue::Int(n) => query.bind(*n),
            BindValue::Bool(b) => query.bind(*b),
            BindValue::Uuid(u) => query.bind(*u),
            BindValue::Text(s) => query.bind(s.clone()),
        }
    }
}
