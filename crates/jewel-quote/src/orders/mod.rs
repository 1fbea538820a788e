//! Custom order intake: submission validation, priced order records, and the HTTP surface.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{
    ContactInfo, CustomJewelryOrder, OrderId, OrderStatus, OrderSubmission,
    OrderSubmissionRequest, OrderView,
};
pub use repository::{
    NotificationError, NotificationPublisher, OrderNotification, OrderRepository,
    RepositoryError,
};
pub use router::order_router;
pub use service::{OrderService, OrderServiceError};
pub use validation::{validate_submission, OrderValidationError, ValidationProblem};
