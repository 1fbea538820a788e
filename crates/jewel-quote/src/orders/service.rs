use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::domain::{CustomJewelryOrder, OrderId, OrderStatus, OrderSubmission};
use super::repository::{
    NotificationPublisher, OrderNotification, OrderRepository, RepositoryError,
};
use super::validation::{validate_submission, OrderValidationError};
use crate::pricing::{quote, DesignConfiguration, PriceQuote};
use crate::text::truncate;

const NOTES_PREVIEW_CHARS: usize = 120;

/// Service composing submission validation, pricing, storage, and notifications.
pub struct OrderService<R, N> {
    repository: Arc<R>,
    notifications: Arc<N>,
    studio_email: String,
}

static ORDER_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_order_id() -> OrderId {
    let id = ORDER_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    OrderId(format!("ord-{id:06}"))
}

impl<R, N> OrderService<R, N>
where
    R: OrderRepository + 'static,
    N: NotificationPublisher + 'static,
{
    pub fn new(repository: Arc<R>, notifications: Arc<N>, studio_email: impl Into<String>) -> Self {
        Self {
            repository,
            notifications,
            studio_email: studio_email.into(),
        }
    }

    pub fn quote(&self, design: &DesignConfiguration) -> PriceQuote {
        quote(design)
    }

    /// Validate, price, and store a submission, then notify the customer and the studio.
    pub fn submit(
        &self,
        submission: OrderSubmission,
    ) -> Result<CustomJewelryOrder, OrderServiceError> {
        validate_submission(&submission)?;

        let quote = quote(&submission.design);
        let order = CustomJewelryOrder::new(next_order_id(), submission, quote, Utc::now());
        let stored = self.repository.insert(order)?;

        info!(
            order_id = %stored.order_id,
            unit_price = stored.estimated_price,
            total = stored.total_estimated_price,
            "custom order submitted"
        );

        // The order is already stored; a failed e-mail must not lose it.
        for notification in self.notifications_for(&stored) {
            let template = notification.template.clone();
            if let Err(err) = self.notifications.publish(notification) {
                warn!(order_id = %stored.order_id, %template, %err, "notification failed");
            }
        }

        Ok(stored)
    }

    fn notifications_for(&self, order: &CustomJewelryOrder) -> [OrderNotification; 2] {
        let mut details = BTreeMap::new();
        details.insert("customer".to_string(), order.contact.name.clone());
        details.insert("summary".to_string(), order.summary());
        details.insert(
            "estimated_price".to_string(),
            order.estimated_price.to_string(),
        );
        details.insert(
            "total_estimated_price".to_string(),
            order.total_estimated_price.to_string(),
        );
        if let Some(notes) = &order.notes {
            details.insert("notes".to_string(), truncate(notes, NOTES_PREVIEW_CHARS));
        }

        let mut studio_details = details.clone();
        studio_details.insert("customer_email".to_string(), order.contact.email.clone());
        if let Some(phone) = &order.contact.phone {
            studio_details.insert("customer_phone".to_string(), phone.clone());
        }

        [
            OrderNotification {
                template: "order_confirmation".to_string(),
                order_id: order.order_id.clone(),
                recipient: order.contact.email.clone(),
                details,
            },
            OrderNotification {
                template: "studio_new_order".to_string(),
                order_id: order.order_id.clone(),
                recipient: self.studio_email.clone(),
                details: studio_details,
            },
        ]
    }

    pub fn get(&self, order_id: &OrderId) -> Result<CustomJewelryOrder, OrderServiceError> {
        let order = self
            .repository
            .fetch(order_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(order)
    }

    pub fn list(&self, limit: usize) -> Result<Vec<CustomJewelryOrder>, OrderServiceError> {
        Ok(self.repository.list(limit)?)
    }

    /// Move an order along; completed and cancelled orders are final.
    pub fn update_status(
        &self,
        order_id: &OrderId,
        status: OrderStatus,
    ) -> Result<CustomJewelryOrder, OrderServiceError> {
        let mut order = self.get(order_id)?;
        if order.status.is_terminal() && order.status != status {
            return Err(OrderServiceError::InvalidTransition {
                from: order.status,
                to: status,
            });
        }

        order.status = status;
        self.repository.update(order.clone())?;
        info!(order_id = %order.order_id, status = status.label(), "order status updated");
        Ok(order)
    }
}

/// Error raised by the order service.
#[derive(Debug, thiserror::Error)]
pub enum OrderServiceError {
    #[error(transparent)]
    Validation(#[from] OrderValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("cannot move order from {} to {}", .from.label(), .to.label())]
    InvalidTransition { from: OrderStatus, to: OrderStatus },
}
