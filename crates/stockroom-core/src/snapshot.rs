//! # Snapshot Tables
//!
//! In-memory, point-in-time copies of database tables.
//!
//! ## Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Table "produtos"                                                       │
//! │                                                                         │
//! │  columns: id_produto │ nome      │ categoria │ quantidade_... │ ...     │
//! │  ─────────────────────────────────────────────────────────────────      │
//! │  row 0:   Integer(1) │ Text(..)  │ Text(..)  │ Integer(12)    │ ...     │
//! │  row 1:   Integer(2) │ Null      │ Text(..)  │ Integer(0)     │ ...     │
//! │                                                                         │
//! │  Column order is the database's. Rows keep the order the store         │
//! │  returned them in. A Table is never patched in place: it is replaced   │
//! │  wholesale when the underlying table is reloaded.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::fmt;

// =============================================================================
// Value
// =============================================================================

/// A single decoded cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Decimal(Decimal),
    Text(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl Value {
    /// Returns true for SQL NULL.
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Integer view of the cell.
    ///
    /// Decimals with no fractional part are accepted, since MySQL reports
    /// some integer expressions as DECIMAL.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            Value::Decimal(d) if d.fract().is_zero() => d.to_i64(),
            _ => None,
        }
    }

    /// Exact numeric view of the cell.
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Value::Integer(i) => Some(Decimal::from(*i)),
            Value::Decimal(d) => Some(*d),
            Value::Float(f) => Decimal::try_from(*f).ok(),
            _ => None,
        }
    }

    /// Text view of the cell. Only `Text` cells qualify.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// NULL renders as an empty string, everything else in its natural form.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Decimal(d) => write!(f, "{d}"),
            Value::Text(s) => f.write_str(s),
            Value::Date(d) => write!(f, "{d}"),
            Value::DateTime(dt) => write!(f, "{dt}"),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<Decimal> for Value {
    fn from(v: Decimal) -> Self {
        Value::Decimal(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

// =============================================================================
// Table
// =============================================================================

/// A full snapshot of one table.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    name: String,
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Creates a table with the given columns and no rows.
    pub fn new(name: impl Into<String>, columns: Vec<String>) -> Self {
        Table {
            name: name.into(),
            columns,
            rows: Vec::new(),
        }
    }

    /// A table with neither columns nor rows.
    ///
    /// Used before the first successful load.
    pub fn empty(name: impl Into<String>) -> Self {
        Table::new(name, Vec::new())
    }

    /// Appends a row.
    ///
    /// Short rows are padded with `Null`, extra cells are dropped, so every
    /// row always has exactly one cell per column.
    pub fn push_row(&mut self, mut values: Vec<Value>) {
        values.resize(self.columns.len(), Value::Null);
        self.rows.push(values);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column. Exact match first, then ASCII case-insensitive
    /// (MySQL column names are case-insensitive).
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c == column)
            .or_else(|| {
                self.columns
                    .iter()
                    .position(|c| c.eq_ignore_ascii_case(column))
            })
    }

    /// Iterates rows in snapshot order.
    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> + '_ {
        self.rows.iter().map(move |values| Row {
            table: self,
            values: values.as_slice(),
        })
    }

    /// Returns a new table with the same columns holding only matching rows.
    pub fn filter<F>(&self, mut keep: F) -> Table
    where
        F: FnMut(&Row<'_>) -> bool,
    {
        let rows = self
            .rows()
            .filter(|row| keep(row))
            .map(|row| row.values.to_vec())
            .collect();

        Table {
            name: self.name.clone(),
            columns: self.columns.clone(),
            rows,
        }
    }
}

// =============================================================================
// Row
// =============================================================================

/// Borrowed view of one row: a column-name → value mapping in column order.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    table: &'a Table,
    values: &'a [Value],
}

impl<'a> Row<'a> {
    /// Value of the named column, or `None` if the table has no such column.
    pub fn get(&self, column: &str) -> Option<&'a Value> {
        let values = self.values;
        self.table.column_index(column).and_then(|i| values.get(i))
    }

    /// Cells in column order.
    pub fn values(&self) -> &'a [Value] {
        self.values
    }

    /// `(column, value)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a Value)> + 'a {
        let columns = self.table.columns.as_slice();
        columns.iter().map(String::as_str).zip(self.values.iter())
    }
}

/// Serializes as a map that keeps the database column order.
impl Serialize for Row<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (column, value) in self.iter() {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn sample() -> Table {
        let mut table = Table::new(
            "produtos",
            vec!["id_produto".to_string(), "nome".to_string()],
        );
        table.push_row(vec![Value::Integer(1), Value::from("Hammer")]);
        table.push_row(vec![Value::Integer(2), Value::Null]);
        table
    }

    #[test]
    fn test_row_lookup_by_column() {
        let table = sample();
        let first = table.rows().next().unwrap();

        assert_eq!(first.get("nome"), Some(&Value::from("Hammer")));
        assert_eq!(first.get("NOME"), Some(&Value::from("Hammer")));
        assert_eq!(first.get("missing"), None);
    }

    #[test]
    fn test_push_row_normalizes_width() {
        let mut table = sample();
        table.push_row(vec![Value::Integer(3)]);
        table.push_row(vec![Value::Integer(4), Value::Null, Value::from("extra")]);

        assert!(table.rows().all(|r| r.values().len() == 2));
        assert!(table.rows().nth(2).unwrap().get("nome").unwrap().is_null());
    }

    #[test]
    fn test_filter_keeps_columns() {
        let table = sample();
        let only_named = table.filter(|row| !row.get("nome").unwrap().is_null());

        assert_eq!(only_named.columns(), table.columns());
        assert_eq!(only_named.len(), 1);
        assert_eq!(only_named.name(), "produtos");
    }

    #[test]
    fn test_value_views() {
        assert_eq!(Value::Integer(5).as_i64(), Some(5));
        assert_eq!(Value::Decimal(Decimal::from(7)).as_i64(), Some(7));
        assert_eq!(
            Value::Decimal(Decimal::from_str("7.5").unwrap()).as_i64(),
            None
        );
        assert_eq!(Value::Integer(3).as_decimal(), Some(Decimal::from(3)));
        assert_eq!(Value::from("x").as_i64(), None);
        assert_eq!(Value::Null.to_string(), "");
    }

    #[test]
    fn test_row_serializes_in_column_order() {
        let table = sample();
        let row = table.rows().next().unwrap();
        let json = serde_json::to_string(&row).unwrap();

        assert_eq!(json, r#"{"id_produto":1,"nome":"Hammer"}"#);
    }
}
