//! Custom jewelry pricing: catalog tables, design configuration, discount rules, and the
//! unit/order price composers that turn a design into an estimate.

pub mod catalog;
pub mod design;
pub mod discounts;
mod quote;
pub mod totals;
pub mod unit;

#[cfg(test)]
mod tests;

pub use catalog::{
    ChainStyle, ChainThickness, ClosureType, GemstoneSize, GemstoneType, JewelryType, Karat,
    MetalType, Rate, CUSTOM_DESIGN_FEE, MAX_CHAIN_LENGTH_INCHES,
};
pub use design::{DesignConfiguration, DesignError, DesignKeys, KaratGate};
pub use discounts::{AppliedDiscount, BulkTier, DiscountKind};
pub use quote::{quote, PriceQuote};
pub use totals::{compose_order_total, OrderTotal};
pub use unit::{compose_unit_price, LineItemKind, PricedLineItem, UnitPrice};
