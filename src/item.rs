//! Item types - the single record kind tracked by the inventory

use serde::{Deserialize, Serialize};

/// A single inventory record.
///
/// `id` is supplied by the caller and never changes after the item is added.
/// `quantity` and `price` are stored as given; the core does not validate them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique key of the item
    pub id: i64,
    /// Display name, matched by substring search
    pub name: String,
    /// Units in stock
    pub quantity: i64,
    /// Unit price
    pub price: f64,
}

impl Item {
    pub fn new(id: i64, name: impl Into<String>, quantity: i64, price: f64) -> Self {
        Self {
            id,
            name: name.into(),
            quantity,
            price,
        }
    }

    /// Case-insensitive substring match against the name.
    ///
    /// `needle` must already be lowercased.
    pub fn name_contains(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
    }

    /// Quantity times price
    pub fn stock_value(&self) -> f64 {
        self.quantity as f64 * self.price
    }

    /// Apply a single-field update in place
    pub fn apply(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::Quantity(quantity) => self.quantity = quantity,
            FieldUpdate::Price(price) => self.price = price,
        }
    }
}

impl std::fmt::Display for Item {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ID:{} | {} | Cant:{} | Precio:{}",
            self.id,
            self.name,
            self.quantity,
            format_price(self.price)
        )
    }
}

/// Shortest round-tripping form of a price.
///
/// Whole values keep their decimal point (`10.0`) and scientific notation
/// carries a signed exponent of at least two digits (`1e+16`, `1.5e-05`).
pub fn format_price(price: f64) -> String {
    if price.is_nan() {
        return "nan".to_string();
    }

    let repr = format!("{:?}", price);
    let Some((mantissa, exponent)) = repr.split_once('e') else {
        return repr;
    };
    let (sign, digits) = match exponent.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exponent),
    };
    format!("{}e{}{:0>2}", mantissa, sign, digits)
}

/// A mutation of exactly one item field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldUpdate {
    Quantity(i64),
    Price(f64),
}

impl FieldUpdate {
    /// Column of the `products` table holding this field
    pub fn column(&self) -> &'static str {
        match self {
            FieldUpdate::Quantity(_) => "quantity",
            FieldUpdate::Price(_) => "price",
        }
    }
}
