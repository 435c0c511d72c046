use dioxus::prelude::*;

use crate::{
    app::{force_fetch, request_fetch, session_client},
    domain::{ApiConfig, AppState, CacheResource, Customer},
    ui::{
        components::toast::{push_toast, ToastKind, ToastMessage},
        theme,
    },
};

#[component]
pub fn CustomersPage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let api_config = use_context::<Signal<ApiConfig>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let data_request = use_context::<Signal<Option<CacheResource>>>();

    use_hook({
        let state = state.clone();
        let data_request = data_request.clone();
        move || request_fetch(state.clone(), data_request.clone(), CacheResource::Customers)
    });

    let mut name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut phone = use_signal(String::new);
    let mut country = use_signal(String::new);

    let customers = state.with(|st| st.customers.clone());

    let on_create = {
        let state = state.clone();
        let api_config = api_config.clone();
        let toasts = toasts.clone();
        let data_request = data_request.clone();
        let mut name = name.clone();
        let mut email = email.clone();
        let mut phone = phone.clone();
        let mut country = country.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            let trimmed = name().trim().to_string();
            if trimmed.is_empty() {
                push_toast(toasts.clone(), ToastKind::Warning, "Customer needs a name.");
                return;
            }
            let customer = Customer {
                id: String::new(),
                name: trimmed,
                email: optional(email()),
                phone: optional(phone()),
                country: optional(country()),
            };
            name.set(String::new());
            email.set(String::new());
            phone.set(String::new());
            country.set(String::new());

            let state = state.clone();
            let api_config = api_config.clone();
            let toasts = toasts.clone();
            let data_request = data_request.clone();
            spawn(async move {
                let Some(client) = session_client(&state, &api_config) else {
                    return;
                };
                match client.create_customer(&customer).await {
                    Ok(created) => {
                        push_toast(
                            toasts.clone(),
                            ToastKind::Success,
                            format!("Customer \"{}\" created.", created.name),
                        );
                        force_fetch(data_request.clone(), CacheResource::Customers);
                    }
                    Err(err) => push_toast(
                        toasts.clone(),
                        ToastKind::Error,
                        format!("Failed to create customer: {err}"),
                    ),
                }
            });
        }
    };

    let is_empty = customers.is_empty();

    rsx! {
        div { class: "space-y-6",
            div { class: "flex items-center justify-between",
                h2 { class: "text-lg font-semibold text-slate-200", "Customers" }
                button {
                    class: "{theme::btn_link()}",
                    onclick: move |_| force_fetch(data_request.clone(), CacheResource::Customers),
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
                    }
                }
                div { class: "w-56",
                    label { class: "{theme::label_class()}", "Email" }
                    input {
                        class: "{theme::input_class()}",
                        r#type: "email",
                        value: email(),
                        oninput: move |evt| email.set(evt.value().to_string()),
                    }
                }
                div { class: "w-40",
                    label { class: "{theme::label_class()}", "Phone" }
                    input {
                        class: "{theme::input_class()}",
                        value: phone(),
                        oninput: move |evt| phone.set(evt.value().to_string()),
                    }
                }
                div { class: "w-32",
                    label { class: "{theme::label_class()}", "Country" }
                    input {
                        class: "{theme::input_class()}",
                        value: country(),
                        oninput: move |evt| country.set(evt.value().to_string()),
                    }
                }
                button { class: "{theme::btn_primary()}", r#type: "submit", "Add Customer" }
            }

            div {
                class: "{theme::table_container()}",
                table {
                    class: "min-w-full {theme::table_divider()} text-sm",
                    thead {
                        class: "{theme::table_header()}",
                        tr {
                            th { class: "px-4 py-3 font-medium", "Name" }
                            th { class: "px-4 py-3 font-medium", "Email" }
                            th { class: "px-4 py-3 font-medium", "Phone" }
                            th { class: "px-4 py-3 font-medium", "Country" }
                        }
                    }
                    tbody {
                        class: "{theme::table_divider()}",
                        for customer in customers.into_iter() {
                            CustomerRow { customer }
                        }
                    }
                }
                if is_empty {
                    p { class: "px-4 py-6 text-sm text-slate-500", "No customers yet." }
                }
            }
        }
    }
}

#[component]
fn CustomerRow(customer: Customer) -> Element {
    let email = customer.email.clone().unwrap_or_else(|| "—".to_string());
    let phone = customer.phone.clone().unwrap_or_else(|| "—".to_string());
    let country = customer.country.clone().unwrap_or_else(|| "—".to_string());
    rsx! {
        tr {
            td { class: "px-4 py-3 text-slate-200", "{customer.name}" }
            td { class: "px-4 py-3 text-slate-400", "{email}" }
            td { class: "px-4 py-3 text-slate-400", "{phone}" }
            td { class: "px-4 py-3 text-slate-400", "{country}" }
        }
    }
}

fn optional(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
