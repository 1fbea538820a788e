use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::pricing::{DesignConfiguration, DesignKeys, PriceQuote, PricedLineItem};

/// Identifier wrapper for submitted custom orders.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrderId(pub String);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Who to contact about the order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Finished design handed over for a quote confirmation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSubmission {
    pub contact: ContactInfo,
    pub design: DesignConfiguration,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Wire form of a submission carrying raw catalog keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSubmissionRequest {
    pub contact: ContactInfo,
    pub design: DesignKeys,
    #[serde(default)]
    pub notes: Option<String>,
}

impl From<OrderSubmissionRequest> for OrderSubmission {
    fn from(request: OrderSubmissionRequest) -> Self {
        Self {
            contact: request.contact,
            design: request.design.into_design(),
            notes: request.notes.filter(|notes| !notes.trim().is_empty()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    InReview,
    Quoted,
    InProduction,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InReview => "in_review",
            Self::Quoted => "quoted",
            Self::InProduction => "in_production",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

/// Persisted order: the submitted design plus the two estimates computed at submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomJewelryOrder {
    pub order_id: OrderId,
    pub contact: ContactInfo,
    pub design: DesignConfiguration,
    pub notes: Option<String>,
    pub estimated_price: u32,
    pub total_estimated_price: u64,
    pub breakdown: Vec<PricedLineItem>,
    pub status: OrderStatus,
    pub submitted_at: DateTime<Utc>,
}

impl CustomJewelryOrder {
    pub(crate) fn new(
        order_id: OrderId,
        submission: OrderSubmission,
        quote: PriceQuote,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            order_id,
            contact: submission.contact,
            design: submission.design,
            notes: submission.notes,
            estimated_price: quote.unit_price,
            total_estimated_price: quote.total_price,
            breakdown: quote.breakdown,
            status: OrderStatus::Pending,
            submitted_at,
        }
    }

    /// Short human summary, e.g. "2 x Necklace + Pendant in Stainless Steel".
    pub fn summary(&self) -> String {
        let pieces = self
            .design
            .jewelry_types
            .iter()
            .map(|kind| kind.label())
            .collect::<Vec<_>>()
            .join(" + ");
        let metal = self
            .design
            .metal_type
            .map(|metal| metal.label())
            .unwrap_or("unspecified metal");
        format!("{} x {pieces} in {metal}", self.design.quantity)
    }

    pub fn view(&self) -> OrderView {
        OrderView {
            order_id: self.order_id.clone(),
            status: self.status.label(),
            summary: self.summary(),
            quantity: self.design.quantity,
            estimated_price: self.estimated_price,
            total_estimated_price: self.total_estimated_price,
            submitted_at: self.submitted_at,
        }
    }
}

/// Customer-facing projection of an order.
#[derive(Debug, Clone, Serialize)]
pub struct OrderView {
    pub order_id: OrderId,
    pub status: &'static str,
    pub summary: String,
    pub quantity: u32,
    pub estimated_price: u32,
    pub total_estimated_price: u64,
    pub submitted_at: DateTime<Utc>,
}
