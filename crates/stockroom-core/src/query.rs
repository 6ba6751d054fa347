//! # Product Queries
//!
//! Lookups over the current `produtos` snapshot. Nothing here touches the
//! database or forces a reload: callers get whatever snapshot is current.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  find_by_id(7)        exact match on id_produto        → 0 or 1 rows    │
//! │  find_by_name("ham")  case-insensitive substring of    → 0..n rows      │
//! │                       nome, NULL names never match                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::snapshot::Table;
use crate::types::Product;
use crate::validation::ValidationResult;

/// Finds the product with the given identifier.
///
/// An unknown id is not an error; it simply yields `None`.
pub fn find_by_id(products: &Table, id: i64) -> Option<Product> {
    products
        .rows()
        .filter_map(|row| Product::from_row(&row))
        .find(|product| product.id == id)
}

/// Finds products whose name contains `term`, ignoring case.
///
/// The term is trimmed first; a blank term is rejected rather than matching
/// everything. Results keep snapshot order.
pub fn find_by_name(products: &Table, term: &str) -> ValidationResult<Vec<Product>> {
    let term = term.trim();
    if term.is_empty() {
        return Err(ValidationError::Required {
            field: "search term".to_string(),
        });
    }

    let needle = term.to_lowercase();

    Ok(products
        .rows()
        .filter_map(|row| Product::from_row(&row))
        .filter(|product| {
            product
                .name
                .as_deref()
                .is_some_and(|name| name.to_lowercase().contains(&needle))
        })
        .collect())
}

// =============================================================================
// Unit Tests
// =============================================================================
