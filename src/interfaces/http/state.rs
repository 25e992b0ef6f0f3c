//! Handler state shared by the storefront routes

use std::sync::Arc;

use crate::application::services::{OrderService, StorefrontService};

#[derive(Clone)]
pub struct StorefrontState {
    pub storefront: Arc<StorefrontService>,
    pub orders: Arc<OrderService>,
}
