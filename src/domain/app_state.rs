use std::{
    collections::HashMap,
    time::{Duration, SystemTime},
};

use serde::{Deserialize, Serialize};

use super::entities::{
    Agency, Branch, CurrentUser, Customer, DashboardStats, Guide, Order, OrderDraft, Payment,
    Product,
};

pub const DEFAULT_API_BASE_URL: &str = "https://api.aico-erp.example.com/v1/";

/// Where the client talks to. Passed to [`crate::infra::api::AicoClient`]
/// explicitly rather than living in a process-wide global.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }
}

/// Authenticated session, held in memory only. The token is never persisted.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    pub user: Option<CurrentUser>,
    pub token: Option<String>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.token.is_some()
    }

    pub fn sign_in(&mut self, user: CurrentUser, token: String) {
        self.user = Some(user);
        self.token = Some(token);
    }

    pub fn sign_out(&mut self) {
        self.user = None;
        self.token = None;
    }
}

#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub session: Session,
    pub draft: OrderDraft,
    pub orders: Vec<Order>,
    pub products: Vec<Product>,
    pub customers: Vec<Customer>,
    pub payments: Vec<Payment>,
    pub agencies: Vec<Agency>,
    pub guides: Vec<Guide>,
    pub branches: Vec<Branch>,
    pub stats: DashboardStats,
    pub cache: CacheTimestamps,
}

impl AppState {
    pub fn is_stale(&self, resource: &CacheResource, ttl: Duration) -> bool {
        self.cache.is_stale(resource, ttl)
    }

    pub fn apply_persisted(&mut self, persisted: PersistedState) {
        self.draft = persisted.draft;
    }

    pub fn to_persisted(&self, api: &ApiConfig) -> PersistedState {
        PersistedState {
            api_base_url: api.base_url.clone(),
            last_username: self
                .session
                .user
                .as_ref()
                .map(|user| user.username.clone())
                .unwrap_or_default(),
            draft: self.draft.clone(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct CacheTimestamps {
    entries: HashMap<CacheResource, SystemTime>,
}

impl CacheTimestamps {
    pub fn record_fetch(&mut self, resource: CacheResource, fetched_at: SystemTime) {
        self.entries.insert(resource, fetched_at);
    }

    pub fn fetched_at(&self, resource: &CacheResource) -> Option<SystemTime> {
        self.entries.get(resource).copied()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CacheResource, &SystemTime)> {
        self.entries.iter()
    }

    pub fn is_stale(&self, resource: &CacheResource, ttl: Duration) -> bool {
        self.fetched_at(resource)
            .map(|time| time.elapsed().map(|elapsed| elapsed > ttl).unwrap_or(true))
            .unwrap_or(true)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum CacheResource {
    Orders,
    Products,
    Customers,
    Payments,
    Directory,
    Stats,
}

/// What survives a restart. Deliberately excludes credentials and tokens.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PersistedState {
    #[serde(default)]
    pub api_base_url: String,
    #[serde(default)]
    pub last_username: String,
    #[serde(default)]
    pub draft: OrderDraft,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_state_is_unauthenticated() {
        let state = AppState::default();
        assert!(!state.session.is_authenticated());
    }

    #[test]
    fn persisted_state_never_carries_the_token() {
        let mut state = AppState::default();
        state.session.sign_in(
            CurrentUser {
                id: "1".to_string(),
                username: "ayse".to_string(),
                display_name: "Ayşe".to_string(),
                role: "manager".to_string(),
            },
            "secret-token".to_string(),
        );
        let persisted = state.to_persisted(&ApiConfig::default());
        let json = serde_json::to_string(&persisted).unwrap();
        assert!(!json.contains("secret-token"));
        assert_eq!(persisted.last_username, "ayse");
    }

    #[test]
    fn unknown_resources_are_stale() {
        let state = AppState::default();
        assert!(state.is_stale(&CacheResource::Orders, Duration::from_secs(60)));
    }
}
