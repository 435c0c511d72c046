use dioxus::prelude::*;

use crate::{
    app::{force_fetch, request_fetch, session_client},
    domain::{ApiConfig, AppState, CacheResource, Product},
    ui::{
        components::toast::{push_toast, ToastKind, ToastMessage},
        pages::order_new::parse_money,
        theme,
    },
};

#[component]
pub fn ProductsPage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let api_config = use_context::<Signal<ApiConfig>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let data_request = use_context::<Signal<Option<CacheResource>>>();

    use_hook({
        let state = state.clone();
        let data_request = data_request.clone();
        move || request_fetch(state.clone(), data_request.clone(), CacheResource::Products)
    });

    let mut name = use_signal(String::new);
    let mut category = use_signal(String::new);
    let mut price = use_signal(String::new);
    let mut cost = use_signal(String::new);

    let products = state.with(|st| st.products.clone());

    let on_create = {
        let state = state.clone();
        let api_config = api_config.clone();
        let toasts = toasts.clone();
        let data_request = data_request.clone();
        let mut name = name.clone();
        let mut category = category.clone();
        let mut price = price.clone();
        let mut cost = cost.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            let trimmed = name().trim().to_string();
            if trimmed.is_empty() {
                push_toast(toasts.clone(), ToastKind::Warning, "Product needs a name.");
                return;
            }
            let product = Product {
                id: String::new(),
                name: trimmed,
                category: {
                    let c = category().trim().to_string();
                    if c.is_empty() { None } else { Some(c) }
                },
                price_usd: parse_money(&price()),
                cost_usd: parse_money(&cost()),
                stock: None,
            };
            name.set(String::new());
            category.set(String::new());
            price.set(String::new());
            cost.set(String::new());

            let state = state.clone();
            let api_config = api_config.clone();
            let toasts = toasts.clone();
            let data_request = data_request.clone();
            spawn(async move {
                let Some(client) = session_client(&state, &api_config) else {
                    return;
                };
                match client.create_product(&product).await {
                    Ok(created) => {
                        push_toast(
                            toasts.clone(),
                            ToastKind::Success,
                            format!("Product \"{}\" created.", created.name),
                        );
                        force_fetch(data_request.clone(), CacheResource::Products);
                    }
                    Err(err) => push_toast(
                        toasts.clone(),
                        ToastKind::Error,
                        format!("Failed to create product: {err}"),
                    ),
                }
            });
        }
    };

    let is_empty = products.is_empty();

    rsx! {
        div { class: "space-y-6",
            div { class: "flex items-center justify-between",
                h2 { class: "text-lg font-semibold text-slate-200", "Products" }
                button {
                    class: "{theme::btn_link()}",
                    onclick: move |_| force_fetch(data_request.clone(), CacheResource::Products),
                    "Refresh"
                }
            }

            form {
                class: "flex flex-wrap items-end gap-4 {theme::panel()}",
                onsubmit: on_create,
                div { class: "flex-1 min-w-[180px]",
                    label { class: "{theme::label_class()}", "Name" }
                    input {
                        class: "{theme::input_class()}",
                        value: name(),
                        oninput: move |evt| name.set(evt.value().to_string()),
                        placeholder: "e.g. Hot Air Balloon Ride",
                    }
                }
                div { class: "w-40",
                    label { class: "{theme::label_class()}", "Category" }
                    input {
                        class: "{theme::input_class()}",
                        value: category(),
                        oninput: move |evt| category.set(evt.value().to_string()),
                        placeholder: "tour",
                    }
                }
                div { class: "w-32",
                    label { class: "{theme::label_class()}", "Price ($)" }
                    input {
                        class: "{theme::input_class()}",
                        inputmode: "decimal",
                        value: price(),
                        oninput: move |evt| price.set(evt.value().to_string()),
                    }
                }
                div { class: "w-32",
                    label { class: "{theme::label_class()}", "Cost ($)" }
                    input {
                        class: "{theme::input_class()}",
                        inputmode: "decimal",
                        value: cost(),
                        oninput: move |evt| cost.set(evt.value().to_string()),
                    }
                }
                button { class: "{theme::btn_primary()}", r#type: "submit", "Add Product" }
            }

            div {
                class: "{theme::table_container()}",
                table {
                    class: "min-w-full {theme::table_divider()} text-sm",
                    thead {
                        class: "{theme::table_header()}",
                        tr {
                            th { class: "px-4 py-3 font-medium", "Name" }
                            th { class: "px-4 py-3 font-medium", "Category" }
                            th { class: "px-4 py-3 font-medium text-right", "Price ($)" }
                            th { class: "px-4 py-3 font-medium text-right", "Cost ($)" }
                            th { class: "px-4 py-3 font-medium text-right", "Stock" }
                        }
                    }
                    tbody {
                        class: "{theme::table_divider()}",
                        for product in products.into_iter() {
                            ProductRow { product }
                        }
                    }
                }
                if is_empty {
                    p { class: "px-4 py-6 text-sm text-slate-500", "No products yet." }
                }
            }
        }
    }
}

#[component]
fn ProductRow(product: Product) -> Element {
    let category = product.category.clone().unwrap_or_else(|| "—".to_string());
    let stock = product
        .stock
        .map(|s| s.to_string())
        .unwrap_or_else(|| "—".to_string());
    rsx! {
        tr {
            td { class: "px-4 py-3 text-slate-200", "{product.name}" }
            td { class: "px-4 py-3 text-slate-400", "{category}" }
            td { class: "px-4 py-3 text-right text-slate-200", {format!("{:.2}", product.price_usd)} }
            td { class: "px-4 py-3 text-right text-slate-400", {format!("{:.2}", product.cost_usd)} }
            td { class: "px-4 py-3 text-right text-slate-400", "{stock}" }
        }
    }
}
