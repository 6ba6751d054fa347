//! Snapshot views: `stock`, `suppliers`, `movements`.

use stockroom_core::TableName;
use stockroom_db::{Inventory, InventoryStore};

use crate::render;

/// Renders the cached snapshot of `table`.
pub fn show<S: InventoryStore>(
    inventory: &Inventory<S>,
    table: TableName,
    json: bool,
) -> anyhow::Result<String> {
    Ok(render::table(inventory.snapshot(table), json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::FixedStore;

    #[tokio::test]
    async fn test_show_products_as_json() {
        let inventory = Inventory::open(FixedStore::new(&[(4, "Saw", 2)]))
            .await
            .unwrap();

        let out = show(&inventory, TableName::Products, true).unwrap();
        let rows: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(rows[0]["id_produto"], 4);
        assert_eq!(rows[0]["nome"], "Saw");
    }
}
