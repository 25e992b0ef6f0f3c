//! Order domain entity

use chrono::{DateTime, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::CartLine;

/// Order status. Every order is stored as pending; fulfilment happens
/// outside the storefront.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
        }
    }
}

/// Human-facing order reference: `<PREFIX>-<unix millis>-<5 uppercase alphanumerics>`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderNumber(String);

impl OrderNumber {
    pub const SUFFIX_LEN: usize = 5;

    pub fn generate(prefix: &str, at: DateTime<Utc>) -> Self {
        let suffix: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(Self::SUFFIX_LEN)
            .map(|b| char::from(b).to_ascii_uppercase())
            .collect();
        Self(format!("{}-{}-{}", prefix, at.timestamp_millis(), suffix))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Contact and fulfilment details captured at checkout
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerDetails {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub fulfillment_method: String,
    pub payment_method: String,
    pub color_preference: Option<String>,
    pub payment_receipt_url: Option<String>,
}

/// A submitted order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub order_number: OrderNumber,
    pub session_id: String,
    pub items: Vec<CartLine>,
    pub total_amount: Decimal,
    pub customer: CustomerDetails,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// New pending order; the total is computed from the lines.
    pub fn pending(
        number_prefix: &str,
        session_id: impl Into<String>,
        items: Vec<CartLine>,
        customer: CustomerDetails,
    ) -> Self {
        let now = Utc::now();
        let total_amount = items.iter().map(CartLine::subtotal).sum();
        Self {
            id: Uuid::new_v4(),
            order_number: OrderNumber::generate(number_prefix, now),
            session_id: session_id.into(),
            items,
            total_amount,
            customer,
            status: OrderStatus::Pending,
            created_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Cart, Product};
    use chrono::TimeZone;

    #[test]
    fn order_number_has_prefix_millis_and_suffix() {
        let at = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        let number = OrderNumber::generate("COJJ", at);
        let parts: Vec<&str> = number.as_str().split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "COJJ");
        assert_eq!(parts[1], "1700000000123");
        assert_eq!(parts[2].len(), OrderNumber::SUFFIX_LEN);
        assert!(parts[2]
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }

    #[test]
    fn pending_order_totals_its_lines() {
        let mut cart = Cart::new();
        cart.add(&Product::new("a", "Phone X", Decimal::from(5000)), 2, "");
        let order = Order::pending("COJJ", "s1", cart.lines, CustomerDetails::default());
        assert_eq!(order.total_amount, Decimal::from(10000));
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.status.to_string(), "pending");
    }
}
