//! # Validation Module
//!
//! Turns untrusted form input into typed write requests.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Front-end                                                    │
//! │  └── Collects raw strings (ProductForm, id/quantity pairs)             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Presence checks (blank → Required)                                │
//! │  ├── Parsing (not a number → InvalidFormat)                            │
//! │  └── Ranges (quantity, price)                                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (MySQL)                                             │
//! │  ├── Product must exist for an UPDATE to touch a row                   │
//! │  └── Foreign key on id_Fornecedor                                      │
//! │                                                                         │
//! │  Nothing reaches layer 3 unless layer 2 passed.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use stockroom_core::validation::{ProductForm, StockAddition};
//!
//! let addition = StockAddition::parse("12", "5").unwrap();
//! assert_eq!(addition.quantity, 5);
//!
//! let form = ProductForm {
//!     name: "Widget".into(),
//!     category: "Tools".into(),
//!     quantity: "5".into(),
//!     price: "10".into(),
//!     supplier_id: "1".into(),
//! };
//! assert!(form.parse().is_ok());
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted product name.
pub const MAX_NAME_LEN: usize = 200;

/// Longest accepted category.
pub const MAX_CATEGORY_LEN: usize = 100;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a product name: non-blank, at most [`MAX_NAME_LEN`] characters.
///
/// ## Example
/// ```rust
/// use stockroom_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Widget").is_ok());
/// assert!(validate_product_name("   ").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    validate_text("name", name, MAX_NAME_LEN)
}

/// Validates a category: non-blank, at most [`MAX_CATEGORY_LEN`] characters.
pub fn validate_category(category: &str) -> ValidationResult<()> {
    validate_text("category", category, MAX_CATEGORY_LEN)
}

fn validate_text(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

/// Validates a quantity being added to existing stock. Must be > 0.
pub fn validate_stock_delta(quantity: i64) -> ValidationResult<()> {
    if quantity <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates an initial stock level. Zero is allowed.
pub fn validate_initial_stock(quantity: i64) -> ValidationResult<()> {
    if quantity < 0 {
        return Err(ValidationError::Negative {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a unit price. Zero is allowed (free items).
///
/// ## Example
/// ```rust
/// use rust_decimal::Decimal;
/// use stockroom_core::validation::validate_price;
///
/// assert!(validate_price(Decimal::new(1099, 2)).is_ok());
/// assert!(validate_price(Decimal::ZERO).is_ok());
/// assert!(validate_price(Decimal::new(-1, 0)).is_err());
/// ```
pub fn validate_price(price: Decimal) -> ValidationResult<()> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Parsers
// =============================================================================

fn required<'a>(field: &str, raw: &'a str) -> ValidationResult<&'a str> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(raw)
}

fn parse_integer(field: &str, raw: &str) -> ValidationResult<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must be a whole number".to_string(),
        })
}

/// Parses a price. A lone comma is accepted as the decimal separator
/// ("10,50").
fn parse_price(raw: &str) -> ValidationResult<Decimal> {
    let raw = raw.trim();
    let normalized = if !raw.contains('.') && raw.matches(',').count() == 1 {
        raw.replace(',', ".")
    } else {
        raw.to_string()
    };

    Decimal::from_str(&normalized).map_err(|_| ValidationError::InvalidFormat {
        field: "price".to_string(),
        reason: "must be a number".to_string(),
    })
}

// =============================================================================
// Stock Addition
// =============================================================================

/// Request to add units to an existing product's stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockAddition {
    pub product_id: i64,
    pub quantity: i64,
}

impl StockAddition {
    /// Creates a validated request.
    pub fn new(product_id: i64, quantity: i64) -> ValidationResult<Self> {
        let addition = StockAddition {
            product_id,
            quantity,
        };
        addition.validate()?;
        Ok(addition)
    }

    /// Parses raw form strings, then validates.
    ///
    /// Existence of the product is left to the database.
    pub fn parse(product_id: &str, quantity: &str) -> ValidationResult<Self> {
        let product_id = required("product id", product_id)?;
        let quantity = required("quantity", quantity)?;

        let product_id = parse_integer("product id", product_id)?;
        let quantity = parse_integer("quantity", quantity)?;

        StockAddition::new(product_id, quantity)
    }

    pub fn validate(&self) -> ValidationResult<()> {
        validate_stock_delta(self.quantity)
    }
}

// =============================================================================
// New Product
// =============================================================================

/// Raw product registration form, exactly as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductForm {
    pub name: String,
    pub category: String,
    pub quantity: String,
    pub price: String,
    pub supplier_id: String,
}

impl ProductForm {
    /// Parses and validates the form.
    ///
    /// ## Order
    /// 1. Every field present (name, category, quantity, price, supplier)
    /// 2. Numeric fields parse
    /// 3. Ranges and lengths
    ///
    /// The first failure wins.
    pub fn parse(&self) -> ValidationResult<NewProduct> {
        let name = required("name", &self.name)?;
        let category = required("category", &self.category)?;
        let quantity = required("quantity", &self.quantity)?;
        let price = required("price", &self.price)?;
        let supplier_id = required("supplier id", &self.supplier_id)?;

        let product = NewProduct {
            name: name.to_string(),
            category: category.to_string(),
            quantity: parse_integer("quantity", quantity)?,
            price: parse_price(price)?,
            supplier_id: parse_integer("supplier id", supplier_id)?,
        };

        product.validate()?;
        Ok(product)
    }
}

/// A validated product registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub category: String,
    pub quantity: i64,
    pub price: Decimal,
    pub supplier_id: i64,
}

impl NewProduct {
    pub fn validate(&self) -> ValidationResult<()> {
        validate_product_name(&self.name)?;
        validate_category(&self.category)?;
        validate_initial_stock(self.quantity)?;
        validate_price(self.price)?;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
