use super::common::*;
use crate::pricing::{
    compose_order_total, quote, ChainStyle, ChainThickness, ClosureType, DesignKeys,
    JewelryType, LineItemKind, MetalType, Rate, MAX_CHAIN_LENGTH_INCHES,
};

#[test]
fn steel_discount_applies_to_every_type() {
    let quarter = Rate::from_basis_points(2_500);
    for metal in steel_metals() {
        for &kind in JewelryType::ALL {
            let quote = quote(&design(metal, &[kind]));
            assert_eq!(
                type_line(&quote, kind.label()).amount,
                quarter.apply(kind.base_price()),
                "{kind} in {metal}"
            );
        }
    }
}

#[test]
fn bundle_halves_pendant_for_every_metal() {
    let half = Rate::from_basis_points(5_000);
    let quarter = Rate::from_basis_points(2_500);
    for &metal in MetalType::ALL {
        let quote = quote(&design(
            metal,
            &[JewelryType::Necklace, JewelryType::Pendant],
        ));
        let before_bundle = if matches!(
            metal,
            MetalType::StainlessSteel | MetalType::GoldPlatedStainlessSteel
        ) {
            quarter.apply(JewelryType::Pendant.base_price())
        } else {
            JewelryType::Pendant.base_price()
        };
        assert_eq!(
            type_line(&quote, "Pendant").amount,
            half.apply(before_bundle),
            "pendant in {metal}"
        );
    }
}

#[test]
fn steel_never_pays_for_chain_or_closure() {
    for metal in steel_metals() {
        for &style in ChainStyle::ALL {
            let mut design = design(metal, &[JewelryType::Necklace, JewelryType::Bracelet]);
            design.select_chain_style(style);
            design.select_chain_thickness(ChainThickness::Statement);
            design.set_chain_length(30.0);
            design.select_closure(ClosureType::BoxClasp);

            let quote = quote(&design);

            assert!(line(&quote, LineItemKind::Chain).is_empty());
            assert!(line(&quote, LineItemKind::Closure).is_empty());
        }
    }
}

#[test]
fn no_bulk_discount_below_twenty_five() {
    for unit in [0_u32, 1, 53, 930, 4_321] {
        for quantity in 1..25 {
            let order = compose_order_total(unit, quantity);
            assert_eq!(order.total, u64::from(unit) * u64::from(quantity));
        }
    }
}

#[test]
fn per_unit_price_never_rises_across_tier_boundaries() {
    for unit in [1_u32, 3, 53, 930, 1_999] {
        for (below, at) in [(24_u32, 25_u32), (49, 50), (99, 100)] {
            let before = compose_order_total(unit, below);
            let after = compose_order_total(unit, at);
            let before_per_unit = before.total as f64 / f64::from(below);
            let after_per_unit = after.total as f64 / f64::from(at);
            assert!(
                after_per_unit <= before_per_unit,
                "unit {unit}: {before_per_unit} -> {after_per_unit} at {at}"
            );
        }
    }
}

#[test]
fn quoting_is_idempotent() {
    let mut design = gold_diamond_ring(60);
    design.jewelry_types.insert(JewelryType::Necklace);
    design.select_chain_style(ChainStyle::Wheat);
    design.attach_logo("https://files.example/logo.png");

    let first = quote(&design);
    let second = quote(&design);

    assert_eq!(first, second);
}

#[test]
fn oversized_chain_is_quoted_at_longest_length() {
    let keys = DesignKeys {
        jewelry_types: vec!["necklace".to_string()],
        metal_type: Some("yellow_gold".to_string()),
        chain_style: Some("franco".to_string()),
        chain_length: Some(1e12),
        ..DesignKeys::default()
    };

    let quote = quote(&keys.into_design());
    let chain = line(&quote, LineItemKind::Chain);

    assert_eq!(chain.len(), 1);
    assert_eq!(chain[0].label, format!("Chain: Franco (Medium, {MAX_CHAIN_LENGTH_INCHES}\")"));
    assert_eq!(chain[0].amount, 170);
    assert_eq!(quote.unit_price, 180 + 80 + 170);
}

#[test]
fn huge_orders_price_without_overflow() {
    let keys = DesignKeys {
        jewelry_types: vec!["bracelet".to_string()],
        metal_type: Some("platinum".to_string()),
        chain_style: Some("cable".to_string()),
        chain_length: Some(1e9),
        quantity: Some(10_000_000),
        ..DesignKeys::default()
    };

    let quote = quote(&keys.into_design());

    assert_eq!(quote.unit_price, 320 + 100 + 80);
    assert_eq!(quote.order.subtotal, 5_000_000_000);
    assert_eq!(quote.total_price, 3_250_000_000);
    assert_eq!(quote.savings(), 1_750_000_000);
}
