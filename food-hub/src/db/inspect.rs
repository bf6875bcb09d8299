//! Database inspection
//!
//! Read-only overview of whatever tables a database file holds: columns,
//! row counts and a few sample rows rendered as text. Used by the `check-db`
//! binary.

use std::fmt;

use serde::Serialize;
use sqlx::{Row, SqlitePool};

use super::repository::RepoResult;

/// Sample rows shown per table
pub const SAMPLE_ROWS: i64 = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSummary {
    pub name: String,
    pub columns: Vec<String>,
    pub row_count: i64,
    /// Up to [`SAMPLE_ROWS`] rows, each value cast to text
    pub sample_rows: Vec<Vec<Option<String>>>,
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// User tables, excluding SQLite and migration bookkeeping
pub async fn list_tables(pool: &SqlitePool) -> RepoResult<Vec<String>> {
    let tables = sqlx::query_scalar::<_, String>(
        r#"
        SELECT name FROM sqlite_master
        WHERE type = 'table'
          AND name NOT LIKE 'sqlite\_%' ESCAPE '\'
          AND name NOT LIKE '\_sqlx%' ESCAPE '\'
        ORDER BY name
        "#,
    )
    .fetch_all(pool)
    .await?;
    Ok(tables)
}

pub async fn describe_table(pool: &SqlitePool, table: &str) -> RepoResult<TableSummary> {
    let columns = sqlx::query_scalar::<_, String>("SELECT name FROM pragma_table_info(?1) ORDER BY cid")
        .bind(table)
        .fetch_all(pool)
        .await?;

    let quoted = quote_ident(table);
    let row_count = sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {quoted}"))
        .fetch_one(pool)
        .await?;

    let mut sample_rows = Vec::new();
    if row_count > 0 && !columns.is_empty() {
        let select = columns
            .iter()
            .map(|c| format!("CAST({} AS TEXT)", quote_ident(c)))
            .collect::<Vec<_>>()
            .join(", ");
        let rows = sqlx::query(&format!("SELECT {select} FROM {quoted} LIMIT ?1"))
            .bind(SAMPLE_ROWS)
            .fetch_all(pool)
            .await?;
        for row in rows {
            let values = (0..columns.len())
                .map(|i| row.try_get::<Option<String>, _>(i))
                .collect::<Result<Vec<_>, _>>()?;
            sample_rows.push(values);
        }
    }

    Ok(TableSummary {
        name: table.to_string(),
        columns,
        row_count,
        sample_rows,
    })
}

/// Summaries of every user table
pub async fn inspect(pool: &SqlitePool) -> RepoResult<Vec<TableSummary>> {
    let mut summaries = Vec::new();
    for table in list_tables(pool).await? {
        summaries.push(describe_table(pool, &table).await?);
    }
    Ok(summaries)
}

impl fmt::Display for TableSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Table: {} ===", self.name)?;
        writeln!(f, "Columns: {}", self.columns.join(", "))?;
        writeln!(f, "Row count: {}", self.row_count)?;
        if self.sample_rows.is_empty() {
            return writeln!(f, "No data in this table");
        }
        writeln!(f, "Sample data:")?;
        for row in &self.sample_rows {
            let cells: Vec<&str> = row.iter().map(|v| v.as_deref().unwrap_or("NULL")).collect();
            writeln!(f, "  {}", cells.join(" | "))?;
        }
        Ok(())
    }
}
