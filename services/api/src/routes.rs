use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Extension;
use axum::Json;
use jewel_quote::orders::{order_router, NotificationPublisher, OrderRepository, OrderService};
use jewel_quote::pricing::{
    ChainStyle, ChainThickness, ClosureType, GemstoneSize, GemstoneType, JewelryType, KaratGate,
    MetalType, CUSTOM_DESIGN_FEE, MAX_CHAIN_LENGTH_INCHES,
};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_order_routes<R, N>(service: Arc<OrderService<R, N>>) -> axum::Router
where
    R: OrderRepository + 'static,
    N: NotificationPublisher + 'static,
{
    order_router(service)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/catalog", get(catalog_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Option keys, labels, and prices for building selector UIs.
pub(crate) async fn catalog_endpoint() -> Json<serde_json::Value> {
    let metals: Vec<_> = MetalType::ALL
        .iter()
        .map(|metal| {
            let karats: Vec<_> = KaratGate::for_metal(Some(*metal))
                .options()
                .iter()
                .map(|karat| {
                    json!({
                        "key": karat.key(),
                        "label": karat.label(),
                        "fineness": karat.fineness(),
                    })
                })
                .collect();
            json!({
                "key": metal.key(),
                "label": metal.label(),
                "price": metal.price(),
                "karats": karats,
            })
        })
        .collect();
    let jewelry_types: Vec<_> = JewelryType::ALL
        .iter()
        .map(|kind| {
            json!({
                "key": kind.key(),
                "label": kind.label(),
                "price": kind.base_price(),
            })
        })
        .collect();
    let gemstones: Vec<_> = GemstoneType::ALL
        .iter()
        .map(|gem| {
            json!({
                "key": gem.key(),
                "label": gem.label(),
                "price": gem.price(),
            })
        })
        .collect();
    let gemstone_sizes: Vec<_> = GemstoneSize::ALL
        .iter()
        .map(|size| {
            json!({
                "key": size.key(),
                "label": size.label(),
                "multiplier": size.multiplier().as_f64(),
            })
        })
        .collect();
    let chain_styles: Vec<_> = ChainStyle::ALL
        .iter()
        .map(|style| {
            json!({
                "key": style.key(),
                "label": style.label(),
                "price": style.price(),
            })
        })
        .collect();
    let chain_thicknesses: Vec<_> = ChainThickness::ALL
        .iter()
        .map(|thickness| {
            json!({
                "key": thickness.key(),
                "label": thickness.label(),
                "multiplier": thickness.multiplier().as_f64(),
            })
        })
        .collect();
    let closures: Vec<_> = ClosureType::ALL
        .iter()
        .map(|closure| {
            json!({
                "key": closure.key(),
                "label": closure.label(),
                "price": closure.price(),
            })
        })
        .collect();

    Json(json!({
        "metals": metals,
        "jewelry_types": jewelry_types,
        "gemstones": gemstones,
        "gemstone_sizes": gemstone_sizes,
        "chain_styles": chain_styles,
        "chain_thicknesses": chain_thicknesses,
        "closures": closures,
        "max_chain_length_inches": MAX_CHAIN_LENGTH_INCHES,
        "custom_design_fee": CUSTOM_DESIGN_FEE,
    }))
}
