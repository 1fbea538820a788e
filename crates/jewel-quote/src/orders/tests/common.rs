use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::orders::domain::{ContactInfo, CustomJewelryOrder, OrderId, OrderSubmission};
use crate::orders::repository::{
    NotificationError, NotificationPublisher, OrderNotification, OrderRepository,
    RepositoryError,
};
use crate::orders::{order_router, OrderService};
use crate::pricing::{DesignConfiguration, GemstoneSize, GemstoneType, JewelryType, MetalType};

pub(super) const STUDIO_EMAIL: &str = "studio@example.com";

pub(super) fn contact() -> ContactInfo {
    ContactInfo {
        name: "Jordan Reyes".to_string(),
        email: "jordan@example.com".to_string(),
        phone: Some("555-0142".to_string()),
    }
}

pub(super) fn gold_ring_design(quantity: u32) -> DesignConfiguration {
    let mut design = DesignConfiguration::new().with_jewelry_type(JewelryType::Ring);
    design.select_metal(MetalType::YellowGold);
    design.select_gemstone(GemstoneType::Diamond);
    design.select_gemstone_size(GemstoneSize::Large);
    design.set_quantity(quantity).expect("positive quantity");
    design
}

pub(super) fn submission() -> OrderSubmission {
    OrderSubmission {
        contact: contact(),
        design: gold_ring_design(30),
        notes: Some("Engrave \"always\" inside the band".to_string()),
    }
}

#[derive(Default)]
pub(super) struct MemoryRepository {
    orders: Mutex<BTreeMap<OrderId, CustomJewelryOrder>>,
}

impl OrderRepository for MemoryRepository {
    fn insert(&self, order: CustomJewelryOrder) -> Result<CustomJewelryOrder, RepositoryError> {
        let mut guard = self.orders.lock().expect("repository mutex poisoned");
        if guard.contains_key(&order.order_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(order.order_id.clone(), order.clone());
        Ok(order)
    }

    fn update(&self, order: CustomJewelryOrder) -> Result<(), RepositoryError> {
        let mut guard = self.orders.lock().expect("repository mutex poisoned");
        match guard.get_mut(&order.order_id) {
            Some(slot) => {
                *slot = order;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(&self, id: &OrderId) -> Result<Option<CustomJewelryOrder>, RepositoryError> {
        let guard = self.orders.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self, limit: usize) -> Result<Vec<CustomJewelryOrder>, RepositoryError> {
        let guard = self.orders.lock().expect("repository mutex poisoned");
        Ok(guard.values().take(limit).cloned().collect())
    }
}

#[derive(Default)]
pub(super) struct MemoryNotifications {
    sent: Mutex<Vec<OrderNotification>>,
}

impl MemoryNotifications {
    pub(super) fn sent(&self) -> Vec<OrderNotification> {
        self.sent.lock().expect("notification mutex poisoned").clone()
    }
}

impl NotificationPublisher for MemoryNotifications {
    fn publish(&self, notification: OrderNotification) -> Result<(), NotificationError> {
        self.sent
            .lock()
            .expect("notification mutex poisoned")
            .push(notification);
        Ok(())
    }
}

pub(super) struct OfflineMailer;

impl NotificationPublisher for OfflineMailer {
    fn publish(&self, _notification: OrderNotification) -> Result<(), NotificationError> {
        Err(NotificationError::Transport("smtp offline".to_string()))
    }
}

pub(super) struct ConflictRepository;

impl OrderRepository for ConflictRepository {
    fn insert(&self, _order: CustomJewelryOrder) -> Result<CustomJewelryOrder, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn update(&self, _order: CustomJewelryOrder) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("read only".to_string()))
    }

    fn fetch(&self, _id: &OrderId) -> Result<Option<CustomJewelryOrder>, RepositoryError> {
        Ok(None)
    }

    fn list(&self, _limit: usize) -> Result<Vec<CustomJewelryOrder>, RepositoryError> {
        Ok(Vec::new())
    }
}

pub(super) fn build_service() -> (
    OrderService<MemoryRepository, MemoryNotifications>,
    Arc<MemoryRepository>,
    Arc<MemoryNotifications>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let notifications = Arc::new(MemoryNotifications::default());
    let service = OrderService::new(repository.clone(), notifications.clone(), STUDIO_EMAIL);
    (service, repository, notifications)
}

pub(super) fn router_with_service<R, N>(service: OrderService<R, N>) -> axum::Router
where
    R: OrderRepository + 'static,
    N: NotificationPublisher + 'static,
{
    order_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
