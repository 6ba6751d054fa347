//! # Export
//!
//! Writes a snapshot to `<table>.<ext>`.
//!
//! | Format | Writer            | Cells                              |
//! |--------|-------------------|------------------------------------|
//! | `csv`  | `csv::Writer`     | display text, NULL → empty string  |
//! | `xlsx` | `rust_xlsxwriter` | numbers as numbers, NULL → blank   |
//!
//! The header row is the column list in database order. An existing file
//! with the same name is overwritten.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};
use thiserror::Error;
use tracing::info;

use stockroom_core::{Table, Value};

/// Worksheet limits.
const XLSX_MAX_ROWS: usize = 1_048_576;
const XLSX_MAX_COLUMNS: usize = 16_384;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Unsupported export format '{0}' (expected csv or xlsx)")]
    UnsupportedFormat(String),

    #[error("{rows} rows x {columns} columns does not fit in a worksheet")]
    TooLarge { rows: usize, columns: usize },

    #[error("I/O error")]
    Io(#[from] std::io::Error),

    #[error("CSV error")]
    Csv(#[from] csv::Error),

    #[error("XLSX error")]
    Xlsx(#[from] XlsxError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Xlsx,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "xlsx" => Ok(ExportFormat::Xlsx),
            other => Err(ExportError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Writes `table` to `dir/<name>.<ext>` and returns the path written.
pub fn export_table(
    table: &Table,
    name: &str,
    format: ExportFormat,
    dir: &Path,
) -> Result<PathBuf, ExportError> {
    let path = dir.join(format!("{name}.{}", format.extension()));

    match format {
        ExportFormat::Csv => write_csv(table, &path)?,
        ExportFormat::Xlsx => write_xlsx(table, name, &path)?,
    }

    info!(path = %path.display(), rows = table.len(), "Exported {}", table.name());
    Ok(path)
}

fn write_csv(table: &Table, path: &Path) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(table.columns())?;
    for row in table.rows() {
        writer.write_record(row.values().iter().map(|v| v.to_string()))?;
    }
    writer.flush()?;
    Ok(())
}

fn write_xlsx(table: &Table, sheet_name: &str, path: &Path) -> Result<(), ExportError> {
    // +1 for the header row
    if table.len() + 1 > XLSX_MAX_ROWS || table.columns().len() > XLSX_MAX_COLUMNS {
        return Err(ExportError::TooLarge {
            rows: table.len(),
            columns: table.columns().len(),
        });
    }

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(sheet_name)?;

    for (col, column) in table.columns().iter().enumerate() {
        sheet.write_string(0, col as u16, column)?;
    }

    for (r, row) in table.rows().enumerate() {
        for (col, value) in row.values().iter().enumerate() {
            write_cell(sheet, r as u32 + 1, col as u16, value)?;
        }
    }

    workbook.save(path)?;
    Ok(())
}

fn write_cell(sheet: &mut Worksheet, row: u32, col: u16, value: &Value) -> Result<(), XlsxError> {
    match value {
        Value::Null => {}
        Value::Bool(b) => {
            sheet.write_boolean(row, col, *b)?;
        }
        Value::Integer(i) => {
            sheet.write_number(row, col, *i as f64)?;
        }
        Value::Float(f) => {
            sheet.write_number(row, col, *f)?;
        }
        Value::Decimal(d) => match d.to_f64() {
            Some(n) => {
                sheet.write_number(row, col, n)?;
            }
            None => {
                sheet.write_string(row, col, d.to_string())?;
            }
        },
        other => {
            sheet.write_string(row, col, other.to_string())?;
        }
    }
    Ok(())
}
