//! Discount rules and their stacking order.
//!
//! Per-type discounts are evaluated in a fixed sequence: the steel discount first, then the
//! necklace + pendant bundle discount on the already discounted amount. Each step rounds half
//! up to a whole dollar, so the order changes totals and must not be rearranged.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::catalog::{JewelryType, MetalType, Rate};

pub const STEEL_DISCOUNT: Rate = Rate::from_basis_points(7_500);
pub const BUNDLE_DISCOUNT: Rate = Rate::from_basis_points(5_000);

/// Steel variants form the low-cost tier.
pub const fn is_steel(metal: MetalType) -> bool {
    matches!(
        metal,
        MetalType::StainlessSteel | MetalType::GoldPlatedStainlessSteel
    )
}

pub fn is_steel_selection(metal: Option<MetalType>) -> bool {
    metal.is_some_and(is_steel)
}

/// Discount rule that may apply to a design.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountKind {
    Steel,
    Bundle,
    Bulk,
}

/// Discount that applied to a quote, reported alongside the price for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedDiscount {
    pub kind: DiscountKind,
    pub rate: Rate,
    pub description: String,
}

/// Discounts taken off a single jewelry type's base price.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TypeDiscounts {
    pub steel: bool,
    pub bundle: bool,
}

impl TypeDiscounts {
    pub fn evaluate(
        jewelry_type: JewelryType,
        selected: &BTreeSet<JewelryType>,
        metal: Option<MetalType>,
    ) -> Self {
        Self {
            steel: is_steel_selection(metal),
            bundle: jewelry_type == JewelryType::Pendant && bundle_applies(selected),
        }
    }

    pub fn is_empty(self) -> bool {
        !self.steel && !self.bundle
    }

    /// Steel first, then bundle, rounding after each step.
    pub fn apply(self, base_price: u32) -> u32 {
        let mut price = base_price;
        if self.steel {
            price = STEEL_DISCOUNT.complement().apply(price);
        }
        if self.bundle {
            price = BUNDLE_DISCOUNT.complement().apply(price);
        }
        price
    }

    pub fn label_suffix(self) -> Option<String> {
        match (self.steel, self.bundle) {
            (false, false) => None,
            (true, false) => Some(format!("({STEEL_DISCOUNT} steel discount)")),
            (false, true) => Some(format!("({BUNDLE_DISCOUNT} bundle discount)")),
            (true, true) => Some(format!(
                "({STEEL_DISCOUNT} steel + {BUNDLE_DISCOUNT} bundle discount)"
            )),
        }
    }
}

pub fn bundle_applies(selected: &BTreeSet<JewelryType>) -> bool {
    selected.contains(&JewelryType::Necklace) && selected.contains(&JewelryType::Pendant)
}

/// Quantity tiers; the highest tier reached wins and tiers never stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BulkTier {
    None,
    Tier25,
    Tier50,
    Tier100,
}

impl BulkTier {
    pub const fn for_quantity(quantity: u32) -> Self {
        if quantity >= 100 {
            Self::Tier100
        } else if quantity >= 50 {
            Self::Tier50
        } else if quantity >= 25 {
            Self::Tier25
        } else {
            Self::None
        }
    }

    pub const fn rate(self) -> Rate {
        match self {
            Self::None => Rate::ZERO,
            Self::Tier25 => Rate::from_basis_points(2_500),
            Self::Tier50 => Rate::from_basis_points(3_000),
            Self::Tier100 => Rate::from_basis_points(3_500),
        }
    }

    pub const fn minimum_quantity(self) -> u32 {
        match self {
            Self::None => 1,
            Self::Tier25 => 25,
            Self::Tier50 => 50,
            Self::Tier100 => 100,
        }
    }

    /// Next tier up, if any, for "order N more to save X%" hints.
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::None => Some(Self::Tier25),
            Self::Tier25 => Some(Self::Tier50),
            Self::Tier50 => Some(Self::Tier100),
            Self::Tier100 => None,
        }
    }

    pub fn label(self) -> String {
        match self {
            Self::None => "no bulk discount".to_string(),
            tier => format!("{}+ units: {} off", tier.minimum_quantity(), tier.rate()),
        }
    }
}

/// Every discount eligible for `(jewelry_types, metal_type, quantity)`, in stacking order.
pub fn eligible_discounts(
    selected: &BTreeSet<JewelryType>,
    metal: Option<MetalType>,
    quantity: u32,
) -> Vec<AppliedDiscount> {
    let mut applied = Vec::new();

    if is_steel_selection(metal) && !selected.is_empty() {
        applied.push(AppliedDiscount {
            kind: DiscountKind::Steel,
            rate: STEEL_DISCOUNT,
            description: format!(
                "{STEEL_DISCOUNT} off every piece, free chain and closure, custom design fee waived"
            ),
        });
    }

    if bundle_applies(selected) {
        applied.push(AppliedDiscount {
            kind: DiscountKind::Bundle,
            rate: BUNDLE_DISCOUNT,
            description: format!("{BUNDLE_DISCOUNT} off the pendant when paired with a necklace"),
        });
    }

    let tier = BulkTier::for_quantity(quantity);
    if tier != BulkTier::None {
        applied.push(AppliedDiscount {
            kind: DiscountKind::Bulk,
            rate: tier.rate(),
            description: tier.label(),
        });
    }

    applied
}
