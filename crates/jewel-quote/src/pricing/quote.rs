use serde::{Deserialize, Serialize};
use tracing::debug;

use super::design::DesignConfiguration;
use super::discounts::{eligible_discounts, AppliedDiscount};
use super::totals::{compose_order_total, OrderTotal};
use super::unit::{compose_unit_price, PricedLineItem};

/// Complete estimate for a design: unit price, order total, and how each was reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub unit_price: u32,
    pub total_price: u64,
    pub breakdown: Vec<PricedLineItem>,
    pub order: OrderTotal,
    pub applied_discounts: Vec<AppliedDiscount>,
}

impl PriceQuote {
    pub fn savings(&self) -> u64 {
        self.order.savings
    }
}

/// Price a design. Pure: the same configuration always yields the same quote.
pub fn quote(design: &DesignConfiguration) -> PriceQuote {
    let unit = compose_unit_price(design);
    let order = compose_order_total(unit.amount, design.quantity);
    let applied_discounts =
        eligible_discounts(&design.jewelry_types, design.metal_type, design.quantity);

    debug!(
        unit_price = unit.amount,
        quantity = design.quantity,
        total = order.total,
        line_items = unit.breakdown.len(),
        "design priced"
    );

    PriceQuote {
        unit_price: unit.amount,
        total_price: order.total,
        breakdown: unit.breakdown,
        order,
        applied_discounts,
    }
}
