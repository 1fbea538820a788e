use jewel_quote::orders::{
    CustomJewelryOrder, NotificationError, NotificationPublisher, OrderId, OrderNotification,
    OrderRepository, RepositoryError,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryOrderRepository {
    orders: Arc<Mutex<HashMap<OrderId, CustomJewelryOrder>>>,
}

impl OrderRepository for InMemoryOrderRepository {
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
        if guard.contains_key(&order.order_id) {
            guard.insert(order.order_id.clone(), order);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &OrderId) -> Result<Option<CustomJewelryOrder>, RepositoryError> {
        let guard = self.orders.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    /// Newest first.
    fn list(&self, limit: usize) -> Result<Vec<CustomJewelryOrder>, RepositoryError> {
        let guard = self.orders.lock().expect("repository mutex poisoned");
        let mut orders: Vec<_> = guard.values().cloned().collect();
        orders.sort_by(|a, b| {
            b.submitted_at
                .cmp(&a.submitted_at)
                .then_with(|| b.order_id.cmp(&a.order_id))
        });
        orders.truncate(limit);
        Ok(orders)
    }
}

/// Keeps notifications in memory and logs them in place of an e-mail transport.
#[derive(Default, Clone)]
pub(crate) struct LoggingNotificationPublisher {
    outbox: Arc<Mutex<Vec<OrderNotification>>>,
}

impl NotificationPublisher for LoggingNotificationPublisher {
    fn publish(&self, notification: OrderNotification) -> Result<(), NotificationError> {
        info!(
            template = %notification.template,
            order_id = %notification.order_id,
            recipient = %notification.recipient,
            "notification queued"
        );
        let mut guard = self.outbox.lock().expect("outbox mutex poisoned");
        guard.push(notification);
        Ok(())
    }
}

impl LoggingNotificationPublisher {
    #[cfg(test)]
    pub(crate) fn outbox(&self) -> Vec<OrderNotification> {
        self.outbox.lock().expect("outbox mutex poisoned").clone()
    }
}
