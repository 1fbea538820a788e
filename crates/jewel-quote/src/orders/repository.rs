use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{CustomJewelryOrder, OrderId};

/// Storage abstraction standing in for the hosted entity API.
pub trait OrderRepository: Send + Sync {
    fn insert(&self, order: CustomJewelryOrder) -> Result<CustomJewelryOrder, RepositoryError>;
    fn update(&self, order: CustomJewelryOrder) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &OrderId) -> Result<Option<CustomJewelryOrder>, RepositoryError>;
    fn list(&self, limit: usize) -> Result<Vec<CustomJewelryOrder>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("order already exists")]
    Conflict,
    #[error("order not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Outbound e-mail hook for confirmations and studio notifications.
pub trait NotificationPublisher: Send + Sync {
    fn publish(&self, notification: OrderNotification) -> Result<(), NotificationError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderNotification {
    pub template: String,
    pub order_id: OrderId,
    pub recipient: String,
    pub details: BTreeMap<String, String>,
}

#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}
