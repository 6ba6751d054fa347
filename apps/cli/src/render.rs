//! Text grid and JSON rendering for snapshots and search results.
//!
//! ```text
//! id_produto | nome        | quantidade_estoque_atual
//! -----------+-------------+-------------------------
//! 1          | Claw Hammer | 12
//! 2          |             | 0
//! ```
//!
//! NULL cells render blank. Everything goes to stdout; logs stay on stderr.

use serde::Serialize;
use stockroom_core::{Product, Table};

pub const NO_DATA: &str = "no data to display";
pub const NO_PRODUCTS: &str = "no products found";

/// Renders a whole snapshot.
pub fn table(table: &Table, json: bool) -> serde_json::Result<String> {
    if json {
        let rows: Vec<_> = table.rows().collect();
        return serde_json::to_string_pretty(&rows);
    }

    if table.is_empty() {
        return Ok(NO_DATA.to_string());
    }

    let rows: Vec<Vec<String>> = table
        .rows()
        .map(|row| row.values().iter().map(|v| v.to_string()).collect())
        .collect();
    Ok(grid(table.columns(), &rows))
}

/// Renders search hits.
pub fn products(products: &[Product], json: bool) -> serde_json::Result<String> {
    if json {
        return serde_json::to_string_pretty(products);
    }

    if products.is_empty() {
        return Ok(NO_PRODUCTS.to_string());
    }

    let header = ["id", "name", "category", "quantity", "price", "supplier"].map(String::from);
    let rows: Vec<Vec<String>> = products
        .iter()
        .map(|p| {
            vec![
                p.id.to_string(),
                p.name.clone().unwrap_or_default(),
                p.category.clone().unwrap_or_default(),
                p.quantity.to_string(),
                p.price.to_string(),
                p.supplier_id.map(|id| id.to_string()).unwrap_or_default(),
            ]
        })
        .collect();
    Ok(grid(&header, &rows))
}

/// Renders a single result: JSON object or its plain message.
pub fn outcome<T: Serialize>(value: &T, message: String, json: bool) -> serde_json::Result<String> {
    if json {
        serde_json::to_string_pretty(value)
    } else {
        Ok(message)
    }
}

fn grid(header: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let separator = widths
        .iter()
        .map(|&w| "-".repeat(w))
        .collect::<Vec<_>>()
        .join("-+-");

    let mut out = line(header);
    out.push('\n');
    out.push_str(&separator);
    for row in rows {
        out.push('\n');
        out.push_str(&line(row));
    }
    out
}
