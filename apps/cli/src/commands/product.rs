//! # Product Commands
//!
//! `search`, `add-stock` and `register`.
//!
//! Lookups read the cached product snapshot. Writes go through
//! [`Inventory`], which validates, commits and refreshes the snapshot
//! before returning.

use anyhow::Context;
use stockroom_core::{ProductForm, StockAddition, ValidationError};
use stockroom_db::{Inventory, InventoryStore};
use tracing::debug;

use crate::render;

/// Appended when a write committed but the product list could not be reloaded.
const STALE_NOTE: &str = "; saved, but the product list could not be reloaded";

/// Searches by exact id or by partial name.
///
/// An unknown id is not an error; it renders as "no products found".
pub fn search<S: InventoryStore>(
    inventory: &Inventory<S>,
    name: Option<String>,
    id: Option<String>,
    json: bool,
) -> anyhow::Result<String> {
    let hits = match (id, name) {
        (Some(id), _) => {
            let id = id
                .trim()
                .parse::<i64>()
                .map_err(|_| ValidationError::InvalidFormat {
                    field: "product id".to_string(),
                    reason: "must be a whole number".to_string(),
                })?;
            inventory.find_by_id(id).into_iter().collect()
        }
        (None, Some(name)) => inventory.find_by_name(&name)?,
        (None, None) => {
            return Err(ValidationError::Required {
                field: "search term".to_string(),
            }
            .into())
        }
    };

    debug!(hits = hits.len(), "Search finished");
    Ok(render::products(&hits, json)?)
}

/// Adds stock from the raw id and quantity strings.
pub async fn add_stock<S: InventoryStore>(
    inventory: &mut Inventory<S>,
    id: &str,
    quantity: &str,
    json: bool,
) -> anyhow::Result<String> {
    let addition = StockAddition::parse(id, quantity)?;

    let added = inventory
        .add_stock(addition)
        .await
        .context("adding stock")?;

    let mut message = match added.current_stock {
        Some(stock) => format!(
            "Added {} units to product {} ({} in stock)",
            added.quantity, added.product_id, stock
        ),
        None => format!(
            "Added {} units to product {}",
            added.quantity, added.product_id
        ),
    };
    if !added.refreshed {
        message.push_str(STALE_NOTE);
    }
    Ok(render::outcome(&added, message, json)?)
}

/// Registers a product from the raw form fields.
pub async fn register<S: InventoryStore>(
    inventory: &mut Inventory<S>,
    form: ProductForm,
    json: bool,
) -> anyhow::Result<String> {
    let product = form.parse()?;

    let registered = inventory
        .register_product(product)
        .await
        .context("registering product")?;

    let mut message = format!("Registered '{}' (id {})", registered.name, registered.id);
    if !registered.refreshed {
        message.push_str(STALE_NOTE);
    }
    Ok(render::outcome(&registered, message, json)?)
}
