//! `export <table> <format>`

use std::path::Path;

use anyhow::Context;
use stockroom_core::{TableName, ValidationError};
use stockroom_db::{Inventory, InventoryStore};

use crate::export::{export_table, ExportFormat};

/// Writes the cached snapshot of `table` into `dir`.
pub fn export<S: InventoryStore>(
    inventory: &Inventory<S>,
    table: &str,
    format: &str,
    dir: &Path,
) -> anyhow::Result<String> {
    let table: TableName = table
        .parse()
        .map_err(|reason| ValidationError::InvalidFormat {
            field: "table".to_string(),
            reason,
        })?;
    let format: ExportFormat = format.parse()?;

    let path = export_table(
        inventory.snapshot(table),
        table.export_name(),
        format,
        dir,
    )
    .with_context(|| format!("exporting {} as {format}", table.export_name()))?;

    Ok(format!("Saved {}", path.display()))
}
