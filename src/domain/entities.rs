use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// One product entry in an order draft.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    pub quantity: u32,
    pub unit_price_usd: f64,
    pub unit_cost_usd: f64,
}

impl LineItem {
    pub fn line_total(&self) -> f64 {
        self.quantity as f64 * self.unit_price_usd
    }

    pub fn line_cost(&self) -> f64 {
        self.quantity as f64 * self.unit_cost_usd
    }
}

/// An order being assembled in the wizard. Submitted drafts become [`Order`]s.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderDraft {
    pub customer_id: Option<String>,
    pub agency_id: Option<String>,
    pub guide_id: Option<String>,
    pub branch_id: Option<String>,
    #[serde(default)]
    pub note: String,
    pub line_items: Vec<LineItem>,
}

impl OrderDraft {
    /// Tax-inclusive order total: Σ(quantity × unit price).
    pub fn subtotal(&self) -> f64 {
        self.line_items.iter().map(LineItem::line_total).sum()
    }

    /// Σ(quantity × unit cost).
    pub fn total_cost(&self) -> f64 {
        self.line_items.iter().map(LineItem::line_cost).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.line_items.is_empty()
    }
}

/// Directory identifiers arrive from the API as strings or numbers; we keep
/// them as strings throughout.
pub type EntityId = String;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Agency {
    pub id: EntityId,
    pub name: String,
    /// Percentage fee in [0, 100], deducted from the tax-exclusive order value.
    pub commission_rate: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Guide {
    pub id: EntityId,
    pub name: String,
    pub commission_rate: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    pub id: EntityId,
    pub name: String,
    pub city: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Product {
    pub id: EntityId,
    pub name: String,
    pub category: Option<String>,
    pub price_usd: f64,
    pub cost_usd: f64,
    pub stock: Option<i64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Customer {
    pub id: EntityId,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub country: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrderStatus {
    Draft,
    Confirmed,
    Paid,
    Cancelled,
}

impl OrderStatus {
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Draft => "Draft",
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::Paid => "Paid",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    pub fn from_api(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "confirmed" => OrderStatus::Confirmed,
            "paid" => OrderStatus::Paid,
            "cancelled" | "canceled" => OrderStatus::Cancelled,
            _ => OrderStatus::Draft,
        }
    }

    pub fn as_api(&self) -> &'static str {
        match self {
            OrderStatus::Draft => "draft",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Paid => "paid",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

/// A submitted order as the server stores it.
#[derive(Clone, Debug, PartialEq)]
pub struct Order {
    pub id: EntityId,
    pub customer_name: String,
    pub branch_name: Option<String>,
    pub status: OrderStatus,
    pub total_usd: f64,
    pub line_items: Vec<LineItem>,
    pub created_at: Option<OffsetDateTime>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Payment {
    pub id: EntityId,
    pub order_id: EntityId,
    pub amount_usd: f64,
    pub method: PaymentMethod,
    pub paid_at: Option<OffsetDateTime>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PaymentMethod {
    #[default]
    Cash,
    Card,
    Transfer,
}

impl PaymentMethod {
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Card => "Card",
            PaymentMethod::Transfer => "Transfer",
        }
    }

    pub fn from_api(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "card" | "credit_card" => PaymentMethod::Card,
            "transfer" | "bank_transfer" | "wire" => PaymentMethod::Transfer,
            _ => PaymentMethod::Cash,
        }
    }

    pub fn as_api(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
            PaymentMethod::Transfer => "transfer",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DashboardStats {
    pub orders_today: i64,
    pub revenue_month_usd: f64,
    pub open_payments: i64,
    pub customer_count: i64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CurrentUser {
    pub id: EntityId,
    pub username: String,
    pub display_name: String,
    pub role: String,
}

/// Looks up an agency commission rate by id, defaulting to 0 when nothing is
/// selected or the id no longer exists in the directory.
pub fn agency_rate(agencies: &[Agency], id: Option<&str>) -> f64 {
    id.and_then(|wanted| agencies.iter().find(|a| a.id == wanted))
        .map(|a| a.commission_rate)
        .unwrap_or(0.0)
}

pub fn guide_rate(guides: &[Guide], id: Option<&str>) -> f64 {
    id.and_then(|wanted| guides.iter().find(|g| g.id == wanted))
        .map(|g| g.commission_rate)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(quantity: u32, price: f64, cost: f64) -> LineItem {
        LineItem {
            name: "Test".to_string(),
            quantity,
            unit_price_usd: price,
            unit_cost_usd: cost,
        }
    }

    #[test]
    fn subtotal_sums_line_totals() {
        let draft = OrderDraft {
            line_items: vec![item(2, 100.0, 40.0), item(1, 50.0, 10.0)],
            ..OrderDraft::default()
        };
        assert_eq!(draft.subtotal(), 250.0);
        assert_eq!(draft.total_cost(), 90.0);
    }

    #[test]
    fn zero_priced_items_contribute_nothing() {
        let draft = OrderDraft {
            line_items: vec![item(5, 0.0, 0.0)],
            ..OrderDraft::default()
        };
        assert_eq!(draft.subtotal(), 0.0);
        assert_eq!(draft.total_cost(), 0.0);
    }

    #[test]
    fn rate_lookup_defaults_to_zero() {
        let agencies = vec![Agency {
            id: "7".to_string(),
            name: "Sunrise Tours".to_string(),
            commission_rate: 12.5,
        }];
        assert_eq!(agency_rate(&agencies, Some("7")), 12.5);
        assert_eq!(agency_rate(&agencies, Some("99")), 0.0);
        assert_eq!(agency_rate(&agencies, None), 0.0);
    }
}
