//! Domain types and the order-profitability logic live here.

pub mod app_state;
pub mod draft;
pub mod entities;
pub mod profit;

#[allow(unused_imports)]
pub use app_state::{
    ApiConfig, AppState, CacheResource, CacheTimestamps, PersistedState, Session,
    DEFAULT_API_BASE_URL,
};
#[allow(unused_imports)]
pub use draft::{reduce, DraftAction};
#[allow(unused_imports)]
pub use entities::{
    agency_rate, guide_rate, Agency, Branch, CurrentUser, Customer, DashboardStats, EntityId,
    Guide, LineItem, Order, OrderDraft, OrderStatus, Payment, PaymentMethod, Product,
};
#[allow(unused_imports)]
pub use profit::{
    assess, assess_draft, submit_gate, ProfitAssessment, SubmitGate,
    LOW_MARGIN_THRESHOLD_PERCENT, TAX_RATE_PERCENT,
};
