//! Cart domain entity

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::Product;

/// Largest quantity a single add-to-cart may request
pub const MAX_ADD_QUANTITY: u32 = 999;

/// One cart entry. Lines are unique per (product id, size).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: String,
    pub quantity: u32,
    pub name: String,
    pub price: Decimal,
    pub image: String,
    /// Selected size, empty when the product has no size choice
    pub size: String,
}

impl CartLine {
    fn from_product(product: &Product, quantity: u32, size: &str) -> Self {
        Self {
            product_id: product.id.clone(),
            quantity,
            name: product.name.clone(),
            price: product.price,
            image: product.image.clone(),
            size: size.to_string(),
        }
    }

    pub fn subtotal(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }

    /// Name shown to the shopper, with the size appended when one was picked
    pub fn display_name(&self) -> String {
        if self.size.is_empty() {
            self.name.clone()
        } else {
            format!("{} ({})", self.name, self.size)
        }
    }
}

/// Shopping cart
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    pub lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `quantity` of a product, merging into an existing line with the same size.
    ///
    /// Returns the merged line.
    pub fn add(&mut self, product: &Product, quantity: u32, size: &str) -> &CartLine {
        let position = self
            .lines
            .iter()
            .position(|line| line.product_id == product.id && line.size == size);

        let index = match position {
            Some(index) => {
                let line = &mut self.lines[index];
                line.quantity = line.quantity.saturating_add(quantity);
                index
            }
            None => {
                self.lines
                    .push(CartLine::from_product(product, quantity, size));
                self.lines.len() - 1
            }
        };
        &self.lines[index]
    }

    /// Drop every line for the product, whatever its size.
    ///
    /// Returns whether anything was removed.
    pub fn remove(&mut self, product_id: &str) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.product_id != product_id);
        self.lines.len() != before
    }

    /// Set the quantity of the first line for the product. Quantities below 1 become 1.
    pub fn set_quantity(&mut self, product_id: &str, quantity: u32) -> bool {
        match self
            .lines
            .iter_mut()
            .find(|line| line.product_id == product_id)
        {
            Some(line) => {
                line.quantity = quantity.max(1);
                true
            }
            None => false,
        }
    }

    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0u32, |n, line| n.saturating_add(line.quantity))
    }

    pub fn total(&self) -> Decimal {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
