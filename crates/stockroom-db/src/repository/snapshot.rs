//! # Snapshot Repository
//!
//! Full-table reads that feed the in-memory snapshot cache.
//!
//! ## Decoding
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  MySQL column type             → Value                                  │
//! │  ─────────────────────────────────────────────────────────────────      │
//! │  NULL (any column)             → Null                                   │
//! │  BOOLEAN / TINYINT(1)          → Bool                                   │
//! │  TINYINT..BIGINT               → Integer                                │
//! │  ... UNSIGNED                  → Integer (Text if it overflows i64)     │
//! │  YEAR                          → Integer                                │
//! │  DECIMAL                       → Decimal                                │
//! │  FLOAT / DOUBLE                → Float                                  │
//! │  DATE                          → Date                                   │
//! │  DATETIME / TIMESTAMP          → DateTime                               │
//! │  TIME                          → Text ("HH:MM:SS")                      │
//! │  anything else                 → Text (UTF-8, lossy for binary)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use sqlx::mysql::MySqlRow;
use sqlx::{Column, Executor, MySqlPool, Row as _, TypeInfo, ValueRef};
use tracing::debug;

use crate::error::DbResult;
use stockroom_core::{Table, TableName, Value};

/// Repository for full-table snapshot reads.
#[derive(Debug, Clone)]
pub struct SnapshotRepository {
    pool: MySqlPool,
}

impl SnapshotRepository {
    /// Creates a new SnapshotRepository.
    pub fn new(pool: MySqlPool) -> Self {
        SnapshotRepository { pool }
    }

    /// Reads every row of `table`.
    ///
    /// Columns come back in the database's order. For an empty table the
    /// column list is taken from the statement description, so the snapshot
    /// still knows its headers.
    pub async fn load(&self, table: TableName) -> DbResult<Table> {
        let sql = select_all_sql(table);
        debug!(table = %table, "Loading snapshot");

        let rows: Vec<MySqlRow> = sqlx::query(sql.as_str()).fetch_all(&self.pool).await?;

        let columns: Vec<String> = match rows.first() {
            Some(row) => row.columns().iter().map(|c| c.name().to_string()).collect(),
            None => {
                let described = (&self.pool).describe(sql.as_str()).await?;
                described
                    .columns()
                    .iter()
                    .map(|c| c.name().to_string())
                    .collect()
            }
        };

        let mut snapshot = Table::new(table.as_str(), columns);
        for row in &rows {
            snapshot.push_row(decode_row(row)?);
        }

        debug!(table = %table, rows = snapshot.len(), "Snapshot loaded");
        Ok(snapshot)
    }
}

/// `SELECT *` over a table from the closed [`TableName`] set.
pub(crate) fn select_all_sql(table: TableName) -> String {
    format!("SELECT * FROM `{}`", table.as_str())
}

fn decode_row(row: &MySqlRow) -> Result<Vec<Value>, sqlx::Error> {
    (0..row.columns().len())
        .map(|index| decode_value(row, index))
        .collect()
}

/// How a column is decoded, chosen from its MySQL type name alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ColumnKind {
    Bool,
    Signed,
    Unsigned,
    Year,
    Decimal,
    Float,
    Double,
    Date,
    DateTime,
    Time,
    Text,
}

/// Maps a driver type name (`"INT"`, `"BIGINT UNSIGNED"`, ...) to its decoder.
pub(crate) fn column_kind(type_name: &str) -> ColumnKind {
    let name = type_name.trim().to_ascii_uppercase();
    match name.as_str() {
        "BOOLEAN" => ColumnKind::Bool,
        "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" => ColumnKind::Signed,
        n if n.ends_with("UNSIGNED") => ColumnKind::Unsigned,
        "YEAR" => ColumnKind::Year,
        "DECIMAL" => ColumnKind::Decimal,
        "FLOAT" => ColumnKind::Float,
        "DOUBLE" => ColumnKind::Double,
        "DATE" => ColumnKind::Date,
        "DATETIME" | "TIMESTAMP" => ColumnKind::DateTime,
        "TIME" => ColumnKind::Time,
        _ => ColumnKind::Text,
    }
}

fn decode_value(row: &MySqlRow, index: usize) -> Result<Value, sqlx::Error> {
    if row.try_get_raw(index)?.is_null() {
        return Ok(Value::Null);
    }

    let value = match column_kind(row.columns()[index].type_info().name()) {
        ColumnKind::Bool => Value::Bool(row.try_get::<bool, _>(index)?),
        ColumnKind::Signed => Value::Integer(row.try_get::<i64, _>(index)?),
        ColumnKind::Unsigned => {
            let v = row.try_get::<u64, _>(index)?;
            i64::try_from(v)
                .map(Value::Integer)
                .unwrap_or_else(|_| Value::Text(v.to_string()))
        }
        ColumnKind::Year => Value::Integer(i64::from(row.try_get_unchecked::<u16, _>(index)?)),
        ColumnKind::Decimal => Value::Decimal(row.try_get::<Decimal, _>(index)?),
        ColumnKind::Float => Value::Float(f64::from(row.try_get::<f32, _>(index)?)),
        ColumnKind::Double => Value::Float(row.try_get::<f64, _>(index)?),
        ColumnKind::Date => Value::Date(row.try_get::<NaiveDate, _>(index)?),
        ColumnKind::DateTime => {
            Value::DateTime(row.try_get::<DateTime<Utc>, _>(index)?.naive_utc())
        }
        ColumnKind::Time => Value::Text(row.try_get::<NaiveTime, _>(index)?.to_string()),
        ColumnKind::Text => decode_text(row, index)?,
    };

    Ok(value)
}

/// Textual columns, with a byte-level fallback for types the driver has no
/// string mapping for.
fn decode_text(row: &MySqlRow, index: usize) -> Result<Value, sqlx::Error> {
    match row.try_get::<String, _>(index) {
        Ok(s) => Ok(Value::Text(s)),
        Err(_) => {
            let bytes = row.try_get_unchecked::<Vec<u8>, _>(index)?;
            Ok(Value::Text(String::from_utf8_lossy(&bytes).into_owned()))
        }
    }
}
