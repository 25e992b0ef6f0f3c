//! Order repository interface

use async_trait::async_trait;
use uuid::Uuid;

use super::model::Order;
use crate::domain::DomainResult;

#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn save(&self, order: Order) -> DomainResult<Order>;
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Order>>;
    async fn find_by_session(&self, session_id: &str) -> DomainResult<Vec<Order>>;
}
