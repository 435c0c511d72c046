use std::time::Duration;

use dioxus::{prelude::*, signals::Signal};

use crate::{
    domain::{ApiConfig, AppState, CacheResource},
    infra::api::{AicoClient, CacheStatus},
    ui::{
        components::toast::{push_toast, Toast, ToastKind, ToastMessage},
        pages::{
            CustomersPage, DashboardPage, OrderNewPage, OrdersPage, PaymentsPage, ProductsPage,
            SettingsPage,
        },
        shell::Shell,
    },
    util::{
        assets,
        persistence::{load_persisted_state, save_persisted_state},
    },
};

/// Shared TTL for API data before a refresh is triggered.
pub const CACHE_TTL: Duration = Duration::from_secs(60 * 60);

#[derive(Routable, Clone, PartialEq)]
pub enum Route {
    #[route("/")]
    Dashboard {},
    #[route("/orders")]
    Orders {},
    #[route("/orders/new")]
    OrderNew {},
    #[route("/products")]
    Products {},
    #[route("/customers")]
    Customers {},
    #[route("/payments")]
    Payments {},
    #[route("/settings")]
    Settings {},
}

#[component]
pub fn App() -> Element {
    let state = use_signal(AppState::default);
    let api_config = use_signal(ApiConfig::default);
    let last_username = use_signal(String::new);

    use_hook({
        let mut state = state.clone();
        let mut api_config = api_config.clone();
        let mut last_username = last_username.clone();
        move || {
            if let Some(saved) = load_persisted_state() {
                if !saved.api_base_url.is_empty() {
                    api_config.set(ApiConfig {
                        base_url: saved.api_base_url.clone(),
                    });
                }
                last_username.set(saved.last_username.clone());
                state.with_mut(|st| st.apply_persisted(saved));
            }
        }
    });
    use_context_provider(|| state.clone());
    use_context_provider(|| api_config.clone());
    use_context_provider(|| last_username.clone());

    let toasts = use_signal(Vec::<ToastMessage>::new);
    use_context_provider(|| toasts.clone());

    // Fetch trigger shared across routes; pages queue the resource they need.
    let data_request = use_signal(|| None::<CacheResource>);
    use_context_provider(|| data_request.clone());

    let _fetcher = use_resource({
        let state = state.clone();
        let api_config = api_config.clone();
        let toasts = toasts.clone();
        let data_request = data_request.clone();
        move || async move {
            fetch_requested(
                state.clone(),
                api_config.clone(),
                toasts.clone(),
                data_request.clone(),
            )
            .await
        }
    });

    rsx! {
        document::Link { rel: "icon", href: assets::favicon_data_uri() }
        document::Style { "{assets::main_css()}" }
        document::Style { "{assets::tailwind_css()}" }
        Router::<Route> {}
        Toast {}
    }
}

pub fn persist_user_state(state: &Signal<AppState>, api_config: &Signal<ApiConfig>) {
    let snapshot = api_config.with(|config| state.with(|st| st.to_persisted(config)));
    if let Err(err) = save_persisted_state(&snapshot) {
        println!("Failed to persist user state: {err}");
    }
}

/// Builds a client carrying the session token, or `None` before sign-in.
pub fn session_client(state: &Signal<AppState>, api_config: &Signal<ApiConfig>) -> Option<AicoClient> {
    let token = state.with(|st| st.session.token.clone())?;
    let client = api_config.with(|config| AicoClient::new(config)).ok()?;
    Some(client.with_token(token))
}

/// Queues a fetch for `resource` unless the cached copy is still fresh.
pub fn request_fetch(
    state: Signal<AppState>,
    mut data_request: Signal<Option<CacheResource>>,
    resource: CacheResource,
) {
    let needs_fetch = state.with(|st| st.is_stale(&resource, CACHE_TTL));
    if needs_fetch {
        data_request.set(Some(resource));
    }
}

/// Like [`request_fetch`] but skips the freshness check.
pub fn force_fetch(mut data_request: Signal<Option<CacheResource>>, resource: CacheResource) {
    data_request.set(Some(resource));
}

async fn fetch_requested(
    mut state: Signal<AppState>,
    api_config: Signal<ApiConfig>,
    toasts: Signal<Vec<ToastMessage>>,
    mut data_request: Signal<Option<CacheResource>>,
) -> Option<CacheResource> {
    let requested = data_request();
    let resource = requested?;

    let Some(client) = session_client(&state, &api_config) else {
        // Not signed in yet; drop the request, the page re-queues after login.
        data_request.set(None);
        return None;
    };

    let mut fetched_at = std::time::SystemTime::now();
    let outcome: Result<(), crate::infra::api::ApiClientError> = match &resource {
        CacheResource::Orders => client.get_orders().await.map(|orders| {
            state.with_mut(|st| st.orders = orders);
        }),
        CacheResource::Products => client.get_products().await.map(|products| {
            state.with_mut(|st| st.products = products);
        }),
        CacheResource::Customers => client.get_customers().await.map(|customers| {
            state.with_mut(|st| st.customers = customers);
        }),
        CacheResource::Payments => client.get_payments().await.map(|payments| {
            state.with_mut(|st| st.payments = payments);
        }),
        CacheResource::Stats => client.get_dashboard_stats().await.map(|stats| {
            state.with_mut(|st| st.stats = stats);
        }),
        CacheResource::Directory => match client.get_directory().await {
            Ok(payload) => {
                // A disk snapshot keeps its original timestamp, so the next
                // visit retries the network once the snapshot ages out.
                fetched_at = payload.fetched_at;
                if payload.status == CacheStatus::Stale {
                    push_toast(
                        toasts.clone(),
                        ToastKind::Warning,
                        "Using a cached agency/guide directory; commission rates may be stale.",
                    );
                }
                state.with_mut(|st| {
                    st.agencies = payload.data.agencies;
                    st.guides = payload.data.guides;
                    st.branches = payload.data.branches;
                });
                Ok(())
            }
            Err(err) => Err(err),
        },
    };

    data_request.set(None);

    match outcome {
        Ok(()) => {
            state.with_mut(|st| st.cache.record_fetch(resource.clone(), fetched_at));
            Some(resource)
        }
        Err(err) => {
            push_toast(
                toasts.clone(),
                ToastKind::Error,
                format!("Failed to load data: {err}"),
            );
            None
        }
    }
}

#[component]
pub fn Dashboard() -> Element {
    rsx! { Shell { DashboardPage {} } }
}

#[component]
pub fn Orders() -> Element {
    rsx! { Shell { OrdersPage {} } }
}

#[component]
pub fn OrderNew() -> Element {
    rsx! { Shell { OrderNewPage {} } }
}

#[component]
pub fn Products() -> Element {
    rsx! { Shell { ProductsPage {} } }
}

#[component]
pub fn Customers() -> Element {
    rsx! { Shell { CustomersPage {} } }
}

#[component]
pub fn Payments() -> Element {
    rsx! { Shell { PaymentsPage {} } }
}

#[component]
pub fn Settings() -> Element {
    rsx! { Shell { SettingsPage {} } }
}
