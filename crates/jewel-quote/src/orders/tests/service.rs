use super::common::*;
use crate::orders::domain::{OrderId, OrderStatus};
use crate::orders::repository::{OrderRepository, RepositoryError};
use crate::orders::validation::ValidationProblem;
use crate::orders::{OrderService, OrderServiceError};
use crate::pricing::MetalType;
use std::sync::Arc;

#[test]
fn submit_stores_both_estimates() {
    let (service, repository, _) = build_service();

    let order = service.submit(submission()).expect("submission succeeds");

    assert_eq!(order.estimated_price, 930);
    assert_eq!(order.total_estimated_price, 20_925);
    assert_eq!(order.status, OrderStatus::Pending);
    assert!(order.order_id.0.starts_with("ord-"));
    let stored = repository
        .fetch(&order.order_id)
        .expect("fetch succeeds")
        .expect("order present");
    assert_eq!(stored, order);
}

#[test]
fn submit_notifies_customer_and_studio() {
    let (service, _, notifications) = build_service();

    let order = service.submit(submission()).expect("submission succeeds");

    let sent = notifications.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].template, "order_confirmation");
    assert_eq!(sent[0].recipient, "jordan@example.com");
    assert_eq!(sent[1].template, "studio_new_order");
    assert_eq!(sent[1].recipient, STUDIO_EMAIL);
    assert_eq!(
        sent[1].details.get("customer_phone").map(String::as_str),
        Some("555-0142")
    );
    assert_eq!(
        sent[0].details.get("summary"),
        Some(&"30 x Ring in Yellow Gold".to_string())
    );
    assert!(sent.iter().all(|note| note.order_id == order.order_id));
}

#[test]
fn long_notes_are_shortened_in_notifications() {
    let (service, _, notifications) = build_service();
    let mut submission = submission();
    submission.notes = Some("x".repeat(500));

    let order = service.submit(submission).expect("submission succeeds");

    assert_eq!(order.notes.as_deref().map(str::len), Some(500));
    let preview = notifications.sent()[0]
        .details
        .get("notes")
        .cloned()
        .expect("notes preview");
    assert_eq!(preview.chars().count(), 120);
    assert!(preview.ends_with('…'));
}

#[test]
fn submit_rejects_incomplete_designs() {
    let (service, repository, notifications) = build_service();
    let mut submission = submission();
    submission.design.clear_metal();
    submission.design.jewelry_types.clear();

    match service.submit(submission) {
        Err(OrderServiceError::Validation(err)) => {
            assert_eq!(
                err.problems,
                vec![ValidationProblem::NoJewelryType, ValidationProblem::NoMetal]
            );
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    assert!(repository.list(10).expect("list").is_empty());
    assert!(notifications.sent().is_empty());
}

#[test]
fn notification_failure_keeps_the_order() {
    let repository = Arc::new(MemoryRepository::default());
    let service = OrderService::new(repository.clone(), Arc::new(OfflineMailer), STUDIO_EMAIL);

    let order = service.submit(submission()).expect("order still accepted");

    assert!(repository
        .fetch(&order.order_id)
        .expect("fetch")
        .is_some());
}

#[test]
fn submit_propagates_repository_conflicts() {
    let service = OrderService::new(
        Arc::new(ConflictRepository),
        Arc::new(MemoryNotifications::default()),
        STUDIO_EMAIL,
    );

    match service.submit(submission()) {
        Err(OrderServiceError::Repository(RepositoryError::Conflict)) => {}
        other => panic!("expected conflict, got {other:?}"),
    }
}

#[test]
fn get_propagates_not_found() {
    let (service, _, _) = build_service();

    match service.get(&OrderId("ord-missing".to_string())) {
        Err(OrderServiceError::Repository(RepositoryError::NotFound)) => {}
        other => panic!("expected not found, got {other:?}"),
    }
}

#[test]
fn status_moves_forward_until_terminal() {
    let (service, _, _) = build_service();
    let order = service.submit(submission()).expect("submission succeeds");

    let quoted = service
        .update_status(&order.order_id, OrderStatus::Quoted)
        .expect("quoted");
    assert_eq!(quoted.status, OrderStatus::Quoted);

    service
        .update_status(&order.order_id, OrderStatus::Cancelled)
        .expect("cancelled");

    match service.update_status(&order.order_id, OrderStatus::InProduction) {
        Err(OrderServiceError::InvalidTransition { from, to }) => {
            assert_eq!(from, OrderStatus::Cancelled);
            assert_eq!(to, OrderStatus::InProduction);
        }
        other => panic!("expected invalid transition, got {other:?}"),
    }
    assert_eq!(
        service.get(&order.order_id).expect("order").status,
        OrderStatus::Cancelled
    );
}

#[test]
fn quote_matches_stored_estimate() {
    let (service, _, _) = build_service();
    let mut submission = submission();
    submission.design.select_metal(MetalType::StainlessSteel);

    let preview = service.quote(&submission.design);
    let order = service.submit(submission).expect("submission succeeds");

    assert_eq!(preview.unit_price, order.estimated_price);
    assert_eq!(preview.total_price, order.total_estimated_price);
    assert_eq!(preview.breakdown, order.breakdown);
}
