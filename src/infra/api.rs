//! Thin asynchronous client for the AICO REST API.
//!
//! - Provides typed accessors for orders, products, customers, payments,
//!   the agency/guide/branch directory, and dashboard stats.
//! - The directory falls back to a 24h on-disk snapshot when the network
//!   fails, so commission lookups keep working offline.

use std::time::SystemTime;

use reqwest::{Client, Url};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::domain::{
    Agency, ApiConfig, Branch, CurrentUser, Customer, DashboardStats, Guide, LineItem, Order,
    OrderDraft, OrderStatus, Payment, PaymentMethod, Product,
};
use crate::infra::directory::{load_directory_cache, save_directory_cache, DirectoryCache};

const USER_AGENT: &str = concat!("aico-erp-desktop/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum ApiClientError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("http request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid username or password")]
    Unauthorized,
    #[error("api error: {0}")]
    Api(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CacheStatus {
    Fresh,
    Stale,
}

#[derive(Clone, Debug)]
pub struct CachedPayload<T> {
    pub data: T,
    pub fetched_at: SystemTime,
    pub status: CacheStatus,
}

impl<T> CachedPayload<T> {
    fn new(data: T, fetched_at: SystemTime, status: CacheStatus) -> Self {
        Self {
            data,
            fetched_at,
            status,
        }
    }
}

/// Agency/guide/branch lists fetched together; commission lookups need all
/// three screensful at once.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Directory {
    pub agencies: Vec<Agency>,
    pub guides: Vec<Guide>,
    pub branches: Vec<Branch>,
}

#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    status: String,
    #[serde(default)]
    #[allow(dead_code)]
    http_code: Option<u16>,
    data: Option<T>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Clone)]
pub struct AicoClient {
    http: Client,
    base_url: Url,
    token: Option<String>,
}

impl AicoClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiClientError> {
        let base_url = Url::parse(&config.base_url)?;
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            http,
            base_url,
            token: None,
        })
    }

    /// Returns a client that sends the session's bearer token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<(CurrentUser, String), ApiClientError> {
        let url = self.url("auth/login")?;
        let body = LoginRequest { username, password };
        let response = self.http.post(url).json(&body).send().await?;
        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ApiClientError::Unauthorized);
        }
        let envelope: ApiEnvelope<LoginDto> = response.error_for_status()?.json().await?;
        let login = unwrap_envelope(envelope)?;
        Ok((login.user.into(), login.token))
    }

    pub async fn get_orders(&self) -> Result<Vec<Order>, ApiClientError> {
        let url = self.url("orders")?;
        let dtos: Vec<OrderDto> = self.fetch_data(self.http.get(url)).await?;
        Ok(dtos.into_iter().map(Order::from).collect())
    }

    /// Submits a draft. The profitability gate runs in the wizard before this
    /// call; by the time we are here the order goes out as-is.
    pub async fn create_order(&self, draft: &OrderDraft) -> Result<Order, ApiClientError> {
        let url = self.url("orders")?;
        let payload = OrderPayload::from_draft(draft);
        let dto: OrderDto = self.fetch_data(self.http.post(url).json(&payload)).await?;
        Ok(dto.into())
    }

    pub async fn update_order_status(
        &self,
        order_id: &str,
        status: OrderStatus,
    ) -> Result<Order, ApiClientError> {
        let url = self.url(&format!("orders/{order_id}"))?;
        let body = serde_json::json!({ "status": status.as_api() });
        let dto: OrderDto = self.fetch_data(self.http.patch(url).json(&body)).await?;
        Ok(dto.into())
    }

    pub async fn delete_order(&self, order_id: &str) -> Result<(), ApiClientError> {
        let url = self.url(&format!("orders/{order_id}"))?;
        let _: serde_json::Value = self.fetch_data(self.http.delete(url)).await?;
        Ok(())
    }

    pub async fn get_products(&self) -> Result<Vec<Product>, ApiClientError> {
        let url = self.url("products")?;
        let dtos: Vec<ProductDto> = self.fetch_data(self.http.get(url)).await?;
        Ok(dtos.into_iter().map(Product::from).collect())
    }

    pub async fn create_product(&self, product: &Product) -> Result<Product, ApiClientError> {
        let url = self.url("products")?;
        let payload = ProductPayload::from(product);
        let dto: ProductDto = self.fetch_data(self.http.post(url).json(&payload)).await?;
        Ok(dto.into())
    }

    pub async fn get_customers(&self) -> Result<Vec<Customer>, ApiClientError> {
        let url = self.url("customers")?;
        let dtos: Vec<CustomerDto> = self.fetch_data(self.http.get(url)).await?;
        Ok(dtos.into_iter().map(Customer::from).collect())
    }

    pub async fn create_customer(&self, customer: &Customer) -> Result<Customer, ApiClientError> {
        let url = self.url("customers")?;
        let payload = CustomerPayload::from(customer);
        let dto: CustomerDto = self.fetch_data(self.http.post(url).json(&payload)).await?;
        Ok(dto.into())
    }

    pub async fn get_payments(&self) -> Result<Vec<Payment>, ApiClientError> {
        let url = self.url("payments")?;
        let dtos: Vec<PaymentDto> = self.fetch_data(self.http.get(url)).await?;
        Ok(dtos.into_iter().map(Payment::from).collect())
    }

    pub async fn create_payment(&self, payment: &Payment) -> Result<Payment, ApiClientError> {
        let url = self.url("payments")?;
        let payload = PaymentPayload::from(payment);
        let dto: PaymentDto = self.fetch_data(self.http.post(url).json(&payload)).await?;
        Ok(dto.into())
    }

    pub async fn get_dashboard_stats(&self) -> Result<DashboardStats, ApiClientError> {
        let url = self.url("stats/dashboard")?;
        let dto: StatsDto = self.fetch_data(self.http.get(url)).await?;
        Ok(dto.into())
    }

    /// Loads the commission directory, falling back to the on-disk snapshot
    /// when the network is down.
    pub async fn get_directory(&self) -> Result<CachedPayload<Directory>, ApiClientError> {
        match self.fetch_directory().await {
            Ok(directory) => {
                if let Err(e) = save_directory_cache(&DirectoryCache::new(
                    directory.agencies.clone(),
                    directory.guides.clone(),
                    directory.branches.clone(),
                )) {
                    println!("[directory] Warning: failed to save cache: {e}");
                }
                Ok(CachedPayload::new(
                    directory,
                    SystemTime::now(),
                    CacheStatus::Fresh,
                ))
            }
            Err(error) => {
                if let Some(disk) = load_directory_cache() {
                    println!(
                        "[directory] Network failed ({error}); using disk snapshot (age: {})",
                        disk.age_string()
                    );
                    let fetched_at =
                        SystemTime::UNIX_EPOCH + std::time::Duration::from_secs(disk.cached_at);
                    let directory = Directory {
                        agencies: disk.agencies,
                        guides: disk.guides,
                        branches: disk.branches,
                    };
                    return Ok(CachedPayload::new(
                        directory,
                        fetched_at,
                        CacheStatus::Stale,
                    ));
                }
                Err(error)
            }
        }
    }

    async fn fetch_directory(&self) -> Result<Directory, ApiClientError> {
        let agencies: Vec<AgencyDto> = self.fetch_data(self.http.get(self.url("agencies")?)).await?;
        let guides: Vec<GuideDto> = self.fetch_data(self.http.get(self.url("guides")?)).await?;
        let branches: Vec<BranchDto> = self.fetch_data(self.http.get(self.url("branches")?)).await?;
        Ok(Directory {
            agencies: agencies.into_iter().map(Agency::from).collect(),
            guides: guides.into_iter().map(Guide::from).collect(),
            branches: branches.into_iter().map(Branch::from).collect(),
        })
    }

    async fn fetch_data<T>(&self, builder: reqwest::RequestBuilder) -> Result<T, ApiClientError>
    where
        T: DeserializeOwned,
    {
        let builder = match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        };
        let response = builder.send().await?;
        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ApiClientError::Unauthorized);
        }
        let envelope: ApiEnvelope<T> = response.error_for_status()?.json().await?;
        unwrap_envelope(envelope)
    }

    fn url(&self, path: &str) -> Result<Url, url::ParseError> {
        self.base_url.join(path)
    }
}

fn unwrap_envelope<T>(envelope: ApiEnvelope<T>) -> Result<T, ApiClientError> {
    let ApiEnvelope {
        status,
        data,
        message,
        ..
    } = envelope;

    if status.eq_ignore_ascii_case("ok") {
        data.ok_or_else(|| ApiClientError::Api("response missing data".into()))
    } else {
        Err(ApiClientError::Api(message.unwrap_or(status)))
    }
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginDto {
    token: String,
    user: UserDto,
}

#[derive(Debug, Deserialize)]
struct UserDto {
    #[serde(deserialize_with = "string_from_json")]
    id: String,
    username: String,
    #[serde(default, alias = "full_name", alias = "displayName")]
    display_name: Option<String>,
    #[serde(default)]
    role: Option<String>,
}

impl From<UserDto> for CurrentUser {
    fn from(dto: UserDto) -> Self {
        let display_name = dto.display_name.unwrap_or_else(|| dto.username.clone());
        Self {
            id: dto.id,
            username: dto.username,
            display_name,
            role: dto.role.unwrap_or_else(|| "staff".to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct AgencyDto {
    #[serde(deserialize_with = "string_from_json")]
    id: String,
    name: String,
    #[serde(default, alias = "commission")]
    commission_rate: Option<f64>,
}

impl From<AgencyDto> for Agency {
    fn from(dto: AgencyDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            commission_rate: sanitize_rate(dto.commission_rate),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GuideDto {
    #[serde(deserialize_with = "string_from_json")]
    id: String,
    name: String,
    #[serde(default, alias = "commission")]
    commission_rate: Option<f64>,
}

impl From<GuideDto> for Guide {
    fn from(dto: GuideDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            commission_rate: sanitize_rate(dto.commission_rate),
        }
    }
}

#[derive(Debug, Deserialize)]
struct BranchDto {
    #[serde(deserialize_with = "string_from_json")]
    id: String,
    name: String,
    #[serde(default)]
    city: Option<String>,
}

impl From<BranchDto> for Branch {
    fn from(dto: BranchDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            city: dto.city,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ProductDto {
    #[serde(deserialize_with = "string_from_json")]
    id: String,
    name: String,
    #[serde(default)]
    category: Option<String>,
    #[serde(default, alias = "price")]
    price_usd: Option<f64>,
    #[serde(default, alias = "cost")]
    cost_usd: Option<f64>,
    #[serde(default)]
    stock: Option<i64>,
}

impl From<ProductDto> for Product {
    fn from(dto: ProductDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            category: dto.category,
            price_usd: dto.price_usd.unwrap_or(0.0),
            cost_usd: dto.cost_usd.unwrap_or(0.0),
            stock: dto.stock,
        }
    }
}

#[derive(Serialize)]
struct ProductPayload<'a> {
    name: &'a str,
    category: Option<&'a str>,
    price_usd: f64,
    cost_usd: f64,
    stock: Option<i64>,
}

impl<'a> From<&'a Product> for ProductPayload<'a> {
    fn from(product: &'a Product) -> Self {
        Self {
            name: &product.name,
            category: product.category.as_deref(),
            price_usd: product.price_usd,
            cost_usd: product.cost_usd,
            stock: product.stock,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CustomerDto {
    #[serde(deserialize_with = "string_from_json")]
    id: String,
    name: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    country: Option<String>,
}

impl From<CustomerDto> for Customer {
    fn from(dto: CustomerDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            email: dto.email,
            phone: dto.phone,
            country: dto.country,
        }
    }
}

#[derive(Serialize)]
struct CustomerPayload<'a> {
    name: &'a str,
    email: Option<&'a str>,
    phone: Option<&'a str>,
    country: Option<&'a str>,
}

impl<'a> From<&'a Customer> for CustomerPayload<'a> {
    fn from(customer: &'a Customer) -> Self {
        Self {
            name: &customer.name,
            email: customer.email.as_deref(),
            phone: customer.phone.as_deref(),
            country: customer.country.as_deref(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct LineItemDto {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    quantity: Option<u32>,
    #[serde(default, alias = "unit_price")]
    unit_price_usd: Option<f64>,
    #[serde(default, alias = "unit_cost")]
    unit_cost_usd: Option<f64>,
}

impl From<LineItemDto> for LineItem {
    fn from(dto: LineItemDto) -> Self {
        Self {
            name: dto.name.unwrap_or_else(|| "Unnamed item".to_string()),
            quantity: dto.quantity.unwrap_or(0),
            unit_price_usd: dto.unit_price_usd.unwrap_or(0.0),
            unit_cost_usd: dto.unit_cost_usd.unwrap_or(0.0),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OrderDto {
    #[serde(deserialize_with = "string_from_json")]
    id: String,
    #[serde(default)]
    customer_name: Option<String>,
    #[serde(default)]
    branch_name: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default, alias = "total")]
    total_usd: Option<f64>,
    #[serde(default, alias = "items")]
    line_items: Vec<LineItemDto>,
    #[serde(default, alias = "created_at", alias = "createdAt")]
    created_at: Option<serde_json::Value>,
}

impl From<OrderDto> for Order {
    fn from(dto: OrderDto) -> Self {
        let line_items: Vec<LineItem> = dto.line_items.into_iter().map(LineItem::from).collect();
        let total_usd = dto
            .total_usd
            .unwrap_or_else(|| line_items.iter().map(LineItem::line_total).sum());
        Self {
            id: dto.id,
            customer_name: dto.customer_name.unwrap_or_else(|| "Walk-in".to_string()),
            branch_name: dto.branch_name,
            status: dto
                .status
                .as_deref()
                .map(OrderStatus::from_api)
                .unwrap_or(OrderStatus::Draft),
            total_usd,
            line_items,
            created_at: parse_timestamp_value(dto.created_at.as_ref()),
        }
    }
}

#[derive(Serialize)]
struct OrderPayload<'a> {
    customer_id: Option<&'a str>,
    agency_id: Option<&'a str>,
    guide_id: Option<&'a str>,
    branch_id: Option<&'a str>,
    note: &'a str,
    items: Vec<LineItemPayload<'a>>,
}

#[derive(Serialize)]
struct LineItemPayload<'a> {
    name: &'a str,
    quantity: u32,
    unit_price_usd: f64,
    unit_cost_usd: f64,
}

impl<'a> OrderPayload<'a> {
    fn from_draft(draft: &'a OrderDraft) -> Self {
        Self {
            customer_id: draft.customer_id.as_deref(),
            agency_id: draft.agency_id.as_deref(),
            guide_id: draft.guide_id.as_deref(),
            branch_id: draft.branch_id.as_deref(),
            note: &draft.note,
            items: draft
                .line_items
                .iter()
                .map(|item| LineItemPayload {
                    name: &item.name,
                    quantity: item.quantity,
                    unit_price_usd: item.unit_price_usd,
                    unit_cost_usd: item.unit_cost_usd,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct PaymentDto {
    #[serde(deserialize_with = "string_from_json")]
    id: String,
    #[serde(deserialize_with = "string_from_json")]
    order_id: String,
    #[serde(default, alias = "amount")]
    amount_usd: Option<f64>,
    #[serde(default)]
    method: Option<String>,
    #[serde(default, alias = "paid_at", alias = "paidAt")]
    paid_at: Option<serde_json::Value>,
}

impl From<PaymentDto> for Payment {
    fn from(dto: PaymentDto) -> Self {
        Self {
            id: dto.id,
            order_id: dto.order_id,
            amount_usd: dto.amount_usd.unwrap_or(0.0),
            method: dto
                .method
                .as_deref()
                .map(PaymentMethod::from_api)
                .unwrap_or_default(),
            paid_at: parse_timestamp_value(dto.paid_at.as_ref()),
        }
    }
}

#[derive(Serialize)]
struct PaymentPayload<'a> {
    order_id: &'a str,
    amount_usd: f64,
    method: &'static str,
}

impl<'a> From<&'a Payment> for PaymentPayload<'a> {
    fn from(payment: &'a Payment) -> Self {
        Self {
            order_id: &payment.order_id,
            amount_usd: payment.amount_usd,
            method: payment.method.as_api(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct StatsDto {
    #[serde(default)]
    orders_today: Option<i64>,
    #[serde(default, alias = "revenue_month")]
    revenue_month_usd: Option<f64>,
    #[serde(default)]
    open_payments: Option<i64>,
    #[serde(default)]
    customer_count: Option<i64>,
}

impl From<StatsDto> for DashboardStats {
    fn from(dto: StatsDto) -> Self {
        Self {
            orders_today: dto.orders_today.unwrap_or(0),
            revenue_month_usd: dto.revenue_month_usd.unwrap_or(0.0),
            open_payments: dto.open_payments.unwrap_or(0),
            customer_count: dto.customer_count.unwrap_or(0),
        }
    }
}

fn sanitize_rate(raw: Option<f64>) -> f64 {
    raw.filter(|rate| rate.is_finite())
        .map(|rate| rate.clamp(0.0, 100.0))
        .unwrap_or(0.0)
}

fn parse_timestamp_value(value: Option<&serde_json::Value>) -> Option<OffsetDateTime> {
    match value {
        Some(serde_json::Value::Number(number)) => number
            .as_i64()
            .and_then(|secs| OffsetDateTime::from_unix_timestamp(secs).ok()),
        Some(serde_json::Value::String(string)) => OffsetDateTime::parse(string, &Rfc3339).ok(),
        _ => None,
    }
}

fn string_from_json<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    struct StringOrNumber;

    impl<'de> serde::de::Visitor<'de> for StringOrNumber {
        type Value = String;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a string or number")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value)
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }
    }

    deserializer.deserialize_any(StringOrNumber)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn agency_id_tolerates_numbers_and_strings() {
        let numeric: AgencyDto =
            serde_json::from_str(r#"{"id": 12, "name": "Anatolia Tours", "commission_rate": 10}"#)
                .unwrap();
        let textual: AgencyDto =
            serde_json::from_str(r#"{"id": "12", "name": "Anatolia Tours", "commission": 10.0}"#)
                .unwrap();
        assert_eq!(Agency::from(numeric), Agency::from(textual));
    }

    #[test]
    fn rates_are_clamped_to_percent_range() {
        assert_eq!(sanitize_rate(Some(150.0)), 100.0);
        assert_eq!(sanitize_rate(Some(-3.0)), 0.0);
        assert_eq!(sanitize_rate(Some(f64::NAN)), 0.0);
        assert_eq!(sanitize_rate(None), 0.0);
    }

    #[test]
    fn order_total_falls_back_to_line_sum() {
        let dto: OrderDto = serde_json::from_str(
            r#"{
                "id": 5,
                "customer_name": "K. Demir",
                "status": "confirmed",
                "items": [
                    {"name": "Balloon ride", "quantity": 2, "unit_price": 180.0, "unit_cost": 90.0}
                ]
            }"#,
        )
        .unwrap();
        let order = Order::from(dto);
        assert_eq!(order.status, OrderStatus::Confirmed);
        assert_eq!(order.total_usd, 360.0);
        assert_eq!(order.line_items[0].unit_cost_usd, 90.0);
    }

    #[test]
    fn timestamps_parse_from_epoch_or_rfc3339() {
        let epoch = serde_json::json!(1_700_000_000);
        let iso = serde_json::json!("2024-05-01T10:30:00Z");
        let bogus = serde_json::json!("not a date");
        assert!(parse_timestamp_value(Some(&epoch)).is_some());
        assert!(parse_timestamp_value(Some(&iso)).is_some());
        assert!(parse_timestamp_value(Some(&bogus)).is_none());
        assert!(parse_timestamp_value(None).is_none());
    }

    #[test]
    fn non_ok_envelope_maps_to_api_error() {
        let envelope: ApiEnvelope<Vec<AgencyDto>> = serde_json::from_str(
            r#"{"status": "error", "http_code": 422, "data": null, "message": "validation failed"}"#,
        )
        .unwrap();
        match unwrap_envelope(envelope) {
            Err(ApiClientError::Api(message)) => assert_eq!(message, "validation failed"),
            other => panic!("expected api error, got {other:?}"),
        }
    }

    #[test]
    fn order_payload_mirrors_the_draft() {
        let draft = OrderDraft {
            customer_id: Some("c1".to_string()),
            agency_id: Some("a2".to_string()),
            guide_id: None,
            branch_id: None,
            note: "pickup 9am".to_string(),
            line_items: vec![LineItem {
                name: "Day trip".to_string(),
                quantity: 3,
                unit_price_usd: 120.0,
                unit_cost_usd: 60.0,
            }],
        };
        let json = serde_json::to_value(OrderPayload::from_draft(&draft)).unwrap();
        assert_eq!(json["customer_id"], "c1");
        assert_eq!(json["agency_id"], "a2");
        assert!(json["guide_id"].is_null());
        assert_eq!(json["items"][0]["quantity"], 3);
        assert_eq!(json["items"][0]["unit_price_usd"], 120.0);
    }
}
