//! Builds parameterized read-only SELECTs from reflected table metadata.

use crate::schema::{ColumnInfo, ColumnKind, TableInfo};
use crate::sql::BindValue;

/// Quote identifier for PostgreSQL (safe: only from reflected metadata).
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Full qualified table name.
fn qualified_table(schema: &str, table: &str) -> String {
    format!("{}.{}", quoted(schema), quoted(table))
}

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<BindValue>,
}

/// SELECT list in ordinal order; types `row_to_json` can't decode come back as text.
fn select_column_list(table: &TableInfo) -> String {
    table
        .columns
        .iter()
        .map(|c| {
            let q = quoted(&c.name);
            if c.selects_as_text() {
                format!("{}::text AS {}", q, q)
            } else {
                q
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn select_all(table: &TableInfo) -> QueryBuf {
    QueryBuf {
        sql: format!(
            "SELECT {} FROM {}",
            select_column_list(table),
            qualified_table(&table.schema_name, &table.table_name)
        ),
        params: Vec::new(),
    }
}

/// SELECT rows where `column` equals the single bound value. `limit` caps the row count.
pub fn select_where(table: &TableInfo, column: &ColumnInfo, value: BindValue, limit: Option<u32>) -> QueryBuf {
    let lhs = match column.kind {
        ColumnKind::Other => format!("{}::text", quoted(&column.name)),
        _ => quoted(&column.name),
    };
    let mut sql = format!(
        "SELECT {} FROM {} WHERE {} = $1",
        select_column_list(table),
        qualified_table(&table.schema_name, &table.table_name),
        lhs
    );
    if let Some(n) = limit {
        sql.push_str(&format!(" LIMIT {}", n));
    }
    QueryBuf {
        sql,
        params: vec![value],
    }
}
