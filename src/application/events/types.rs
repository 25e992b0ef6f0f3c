//! Event types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Event {
    SessionOpened { session_id: String },
    SessionClosed { session_id: String, expired: bool },
    CartUpdated {
        session_id: String,
        product_id: String,
        cart_count: u32,
    },
    OrderSubmitted {
        session_id: String,
        order_number: String,
        total_amount: Decimal,
    },
}

impl Event {
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::SessionOpened { .. } => "session_opened",
            Event::SessionClosed { .. } => "session_closed",
            Event::CartUpdated { .. } => "cart_updated",
            Event::OrderSubmitted { .. } => "order_submitted",
        }
    }

    pub fn session_id(&self) -> &str {
        match self {
            Event::SessionOpened { session_id }
            | Event::SessionClosed { session_id, .. }
            | Event::CartUpdated { session_id, .. }
            | Event::OrderSubmitted { session_id, .. } => session_id,
        }
    }
}

/// Envelope stamped when the event is published
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventMessage {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub event: Event,
}

impl EventMessage {
    pub fn new(event: Event) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            event,
        }
    }
}
