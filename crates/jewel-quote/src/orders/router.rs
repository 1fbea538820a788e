use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{OrderId, OrderStatus, OrderSubmissionRequest};
use super::repository::{NotificationPublisher, OrderRepository, RepositoryError};
use super::service::{OrderService, OrderServiceError};
use crate::pricing::DesignKeys;

const LIST_LIMIT: usize = 50;

/// Router builder exposing quoting and order intake endpoints.
pub fn order_router<R, N>(service: Arc<OrderService<R, N>>) -> Router
where
    R: OrderRepository + 'static,
    N: NotificationPublisher + 'static,
{
    Router::new()
        .route("/api/v1/quotes", post(quote_handler::<R, N>))
        .route(
            "/api/v1/orders",
            post(submit_handler::<R, N>).get(list_handler::<R, N>),
        )
        .route("/api/v1/orders/:order_id", get(order_handler::<R, N>))
        .route(
            "/api/v1/orders/:order_id/status",
            put(status_handler::<R, N>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatusUpdate {
    status: OrderStatus,
}

fn error_response(err: OrderServiceError) -> Response {
    match err {
        OrderServiceError::Validation(error) => {
            let payload = json!({
                "error": error.to_string(),
                "problems": error.problems,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
        OrderServiceError::Repository(RepositoryError::Conflict) => {
            let payload = json!({ "error": "order already exists" });
            (StatusCode::CONFLICT, Json(payload)).into_response()
        }
        OrderServiceError::Repository(RepositoryError::NotFound) => {
            let payload = json!({ "error": "order not found" });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
        err @ OrderServiceError::InvalidTransition { .. } => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::CONFLICT, Json(payload)).into_response()
        }
        other => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn quote_handler<R, N>(
    State(service): State<Arc<OrderService<R, N>>>,
    Json(keys): Json<DesignKeys>,
) -> Response
where
    R: OrderRepository + 'static,
    N: NotificationPublisher + 'static,
{
    let design = keys.into_design();
    (StatusCode::OK, Json(service.quote(&design))).into_response()
}

pub(crate) async fn submit_handler<R, N>(
    State(service): State<Arc<OrderService<R, N>>>,
    Json(request): Json<OrderSubmissionRequest>,
) -> Response
where
    R: OrderRepository + 'static,
    N: NotificationPublisher + 'static,
{
    match service.submit(request.into()) {
        Ok(order) => (StatusCode::CREATED, Json(order.view())).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn list_handler<R, N>(
    State(service): State<Arc<OrderService<R, N>>>,
) -> Response
where
    R: OrderRepository + 'static,
    N: NotificationPublisher + 'static,
{
    match service.list(LIST_LIMIT) {
        Ok(orders) => {
            let views: Vec<_> = orders.iter().map(|order| order.view()).collect();
            (StatusCode::OK, Json(views)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn order_handler<R, N>(
    State(service): State<Arc<OrderService<R, N>>>,
    Path(order_id): Path<String>,
) -> Response
where
    R: OrderRepository + 'static,
    N: NotificationPublisher + 'static,
{
    match service.get(&OrderId(order_id)) {
        Ok(order) => (StatusCode::OK, Json(order)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn status_handler<R, N>(
    State(service): State<Arc<OrderService<R, N>>>,
    Path(order_id): Path<String>,
    Json(update): Json<StatusUpdate>,
) -> Response
where
    R: OrderRepository + 'static,
    N: NotificationPublisher + 'static,
{
    match service.update_status(&OrderId(order_id), update.status) {
        Ok(order) => (StatusCode::OK, Json(order.view())).into_response(),
        Err(err) => error_response(err),
    }
}
