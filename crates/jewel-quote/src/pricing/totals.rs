use serde::{Deserialize, Serialize};

use super::catalog::Rate;
use super::discounts::BulkTier;

/// Order-level pricing after quantity and the bulk discount tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTotal {
    pub quantity: u32,
    pub subtotal: u64,
    pub bulk_tier: BulkTier,
    pub discount_rate: Rate,
    pub savings: u64,
    pub total: u64,
}

impl OrderTotal {
    pub fn has_discount(&self) -> bool {
        self.bulk_tier != BulkTier::None
    }

    /// Per-unit price after the bulk discount, rounded half up.
    pub fn effective_unit_price(&self) -> u64 {
        if self.quantity == 0 {
            return 0;
        }
        let quantity = u64::from(self.quantity);
        (self.total + quantity / 2) / quantity
    }

    /// Units still needed to reach the next bulk tier.
    pub fn units_to_next_tier(&self) -> Option<(BulkTier, u32)> {
        let next = self.bulk_tier.next()?;
        Some((next, next.minimum_quantity().saturating_sub(self.quantity)))
    }
}

fn apply_rate(amount: u64, rate: Rate) -> u64 {
    let scaled = (u128::from(amount) * u128::from(rate.basis_points()) + 5_000) / 10_000;
    u64::try_from(scaled).unwrap_or(u64::MAX)
}

/// Multiply out the unit price and take off the single bulk tier the quantity reaches.
pub fn compose_order_total(unit_price: u32, quantity: u32) -> OrderTotal {
    let subtotal = u64::from(unit_price) * u64::from(quantity);
    let bulk_tier = BulkTier::for_quantity(quantity);
    let discount_rate = bulk_tier.rate();

    OrderTotal {
        quantity,
        subtotal,
        bulk_tier,
        discount_rate,
        savings: apply_rate(subtotal, discount_rate),
        total: apply_rate(subtotal, discount_rate.complement()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_orders_pay_full_price() {
        let order = compose_order_total(53, 24);
        assert_eq!(order.subtotal, 1_272);
        assert_eq!(order.total, 1_272);
        assert_eq!(order.savings, 0);
        assert!(!order.has_discount());
        assert_eq!(order.units_to_next_tier(), Some((BulkTier::Tier25, 1)));
    }

    #[test]
    fn thirty_units_get_quarter_off() {
        let order = compose_order_total(930, 30);
        assert_eq!(order.subtotal, 27_900);
        assert_eq!(order.bulk_tier, BulkTier::Tier25);
        assert_eq!(order.total, 20_925);
        assert_eq!(order.savings, 6_975);
        assert_eq!(order.effective_unit_price(), 698);
    }

    #[test]
    fn top_tier_has_no_next_tier() {
        let order = compose_order_total(10, 150);
        assert_eq!(order.bulk_tier, BulkTier::Tier100);
        assert_eq!(order.total, 975);
        assert_eq!(order.savings, 525);
        assert_eq!(order.units_to_next_tier(), None);
    }

    #[test]
    fn extreme_orders_do_not_overflow() {
        let order = compose_order_total(u32::MAX, u32::MAX);
        let subtotal = u64::from(u32::MAX) * u64::from(u32::MAX);
        assert_eq!(order.subtotal, subtotal);
        assert_eq!(order.bulk_tier, BulkTier::Tier100);
        assert!(order.total < order.subtotal);
        assert!(order.savings < order.subtotal);
        assert!(order.effective_unit_price() <= u64::from(u32::MAX));
    }

    #[test]
    fn savings_and_total_reconcile_with_subtotal() {
        for unit in [1_u32, 7, 53, 333, 999] {
            for quantity in [1_u32, 25, 33, 50, 77, 100, 101] {
                let order = compose_order_total(unit, quantity);
                let reconciled = order.savings + order.total;
                assert!(
                    reconciled.abs_diff(order.subtotal) <= 1,
                    "unit {unit} x {quantity}: {reconciled} vs {}",
                    order.subtotal
                );
            }
        }
    }
}
