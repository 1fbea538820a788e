use serde::{Deserialize, Serialize};

use super::catalog::{
    round_half_up, ChainThickness, GemstoneSize, GemstoneType, CUSTOM_DESIGN_FEE,
    MAX_CHAIN_LENGTH_INCHES, STANDARD_CHAIN_LENGTH_INCHES,
};
use super::design::DesignConfiguration;
use super::discounts::{is_steel_selection, TypeDiscounts};

/// Which facet a line item prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineItemKind {
    Metal,
    JewelryType,
    Gemstone,
    Chain,
    Closure,
    CustomDesignFee,
}

/// One row of the price breakdown shown next to the estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricedLineItem {
    pub kind: LineItemKind,
    pub label: String,
    pub amount: u32,
}

/// Price of a single unit along with the contributions that make it up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitPrice {
    pub amount: u32,
    pub breakdown: Vec<PricedLineItem>,
}

#[derive(Default)]
struct Breakdown {
    items: Vec<PricedLineItem>,
}

impl Breakdown {
    fn push(&mut self, kind: LineItemKind, label: String, amount: u32) {
        if amount > 0 {
            self.items.push(PricedLineItem {
                kind,
                label,
                amount,
            });
        }
    }

    fn finish(self) -> UnitPrice {
        let amount = self
            .items
            .iter()
            .fold(0_u32, |total, item| total.saturating_add(item.amount));
        UnitPrice {
            amount,
            breakdown: self.items,
        }
    }
}

/// Sum metal, jewelry types, gemstone, chain, closure, and design fee for one unit.
pub fn compose_unit_price(design: &DesignConfiguration) -> UnitPrice {
    let mut breakdown = Breakdown::default();
    let steel = is_steel_selection(design.metal_type);

    if let Some(metal) = design.metal_type {
        let label = match design.metal_karat {
            Some(karat) => format!("Metal: {} ({})", metal.label(), karat.key()),
            None => format!("Metal: {}", metal.label()),
        };
        breakdown.push(LineItemKind::Metal, label, metal.price());
    }

    for &jewelry_type in &design.jewelry_types {
        let discounts =
            TypeDiscounts::evaluate(jewelry_type, &design.jewelry_types, design.metal_type);
        let amount = discounts.apply(jewelry_type.base_price());
        let label = match discounts.label_suffix() {
            Some(suffix) => format!("{} {suffix}", jewelry_type.label()),
            None => jewelry_type.label().to_string(),
        };
        breakdown.push(LineItemKind::JewelryType, label, amount);
    }

    if let Some(gemstone) = design.gemstone_type.filter(|gem| *gem != GemstoneType::None) {
        let size = design.gemstone_size.unwrap_or(GemstoneSize::Medium);
        breakdown.push(
            LineItemKind::Gemstone,
            format!("Gemstone: {} ({})", gemstone.label(), size.label()),
            size.multiplier().apply(gemstone.price()),
        );
    }

    // Steel pieces ship with their chain and closure included.
    if design.needs_chain() && !steel {
        if let Some(style) = design.chain_style {
            let thickness = design.chain_thickness.unwrap_or(ChainThickness::Medium);
            let length = chain_length(design.chain_length);
            let amount = round_half_up(
                f64::from(style.price()) * thickness.multiplier().as_f64() * length
                    / STANDARD_CHAIN_LENGTH_INCHES,
            );
            breakdown.push(
                LineItemKind::Chain,
                format!(
                    "Chain: {} ({}, {}\")",
                    style.label(),
                    thickness.label(),
                    length
                ),
                amount,
            );
        }

        if let Some(closure) = design.closure_type {
            breakdown.push(
                LineItemKind::Closure,
                format!("Closure: {}", closure.label()),
                closure.price(),
            );
        }
    }

    if design.has_logo() && !steel {
        breakdown.push(
            LineItemKind::CustomDesignFee,
            "Custom design fee".to_string(),
            CUSTOM_DESIGN_FEE,
        );
    }

    breakdown.finish()
}

fn chain_length(inches: Option<f64>) -> f64 {
    inches
        .filter(|value| value.is_finite() && *value > 0.0)
        .map_or(STANDARD_CHAIN_LENGTH_INCHES, |value| {
            value.min(MAX_CHAIN_LENGTH_INCHES)
        })
}
