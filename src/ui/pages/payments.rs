use dioxus::prelude::*;

use crate::{
    app::{force_fetch, request_fetch, session_client},
    domain::{ApiConfig, AppState, CacheResource, Payment, PaymentMethod},
    ui::{
        components::toast::{push_toast, ToastKind, ToastMessage},
        pages::order_new::parse_money,
        theme,
    },
};

#[component]
pub fn PaymentsPage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let api_config = use_context::<Signal<ApiConfig>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let data_request = use_context::<Signal<Option<CacheResource>>>();

    use_hook({
        let state = state.clone();
        let data_request = data_request.clone();
        move || {
            request_fetch(state.clone(), data_request.clone(), CacheResource::Payments);
            request_fetch(state.clone(), data_request.clone(), CacheResource::Orders);
        }
    });

    let mut order_id = use_signal(String::new);
    let mut amount = use_signal(String::new);
    let mut method = use_signal(|| PaymentMethod::Cash);

    let payments = state.with(|st| st.payments.clone());
    let orders = state.with(|st| st.orders.clone());

    let on_create = {
        let state = state.clone();
        let api_config = api_config.clone();
        let toasts = toasts.clone();
        let data_request = data_request.clone();
        let mut order_id = order_id.clone();
        let mut amount = amount.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            let selected_order = order_id().trim().to_string();
            if selected_order.is_empty() {
                push_toast(toasts.clone(), ToastKind::Warning, "Pick an order first.");
                return;
            }
            let amount_usd = parse_money(&amount());
            if amount_usd <= 0.0 {
                push_toast(
                    toasts.clone(),
                    ToastKind::Warning,
                    "Payment amount must be above zero.",
                );
                return;
            }
            let payment = Payment {
                id: String::new(),
                order_id: selected_order,
                amount_usd,
                method: method(),
                paid_at: None,
            };
            order_id.set(String::new());
            amount.set(String::new());

            let state = state.clone();
            let api_config = api_config.clone();
            let toasts = toasts.clone();
            let data_request = data_request.clone();
            spawn(async move {
                let Some(client) = session_client(&state, &api_config) else {
                    return;
                };
                match client.create_payment(&payment).await {
                    Ok(_) => {
                        push_toast(toasts.clone(), ToastKind::Success, "Payment recorded.");
                        force_fetch(data_request.clone(), CacheResource::Payments);
                    }
                    Err(err) => push_toast(
                        toasts.clone(),
                        ToastKind::Error,
                        format!("Failed to record payment: {err}"),
                    ),
                }
            });
        }
    };

    let is_empty = payments.is_empty();

    rsx! {
        div { class: "space-y-6",
            div { class: "flex items-center justify-between",
                h2 { class: "text-lg font-semibold text-slate-200", "Payments" }
                button {
                    class: "{theme::btn_link()}",
                    onclick: move |_| force_fetch(data_request.clone(), CacheResource::Payments),
                    "Refresh"
                }
            }

            form {
                class: "flex flex-wrap items-end gap-4 {theme::panel()}",
                onsubmit: on_create,
                div { class: "flex-1 min-w-[220px]",
                    label { class: "{theme::label_class()}", "Order" }
                    select {
                        class: "{theme::select_class()}",
                        value: order_id(),
                        onchange: move |evt| order_id.set(evt.value().to_string()),
                        option { value: "", "— select —" }
                        for order in orders.iter() {
                            option {
                                value: order.id.clone(),
                                {format!("#{} — {} (${:.2})", order.id, order.customer_name, order.total_usd)}
                            }
                        }
                    }
                }
                div { class: "w-32",
                    label { class: "{theme::label_class()}", "Amount ($)" }
                    input {
                        class: "{theme::input_class()}",
                        inputmode: "decimal",
                        value: amount(),
                        oninput: move |evt| amount.set(evt.value().to_string()),
                    }
                }
                div { class: "w-36",
                    label { class: "{theme::label_class()}", "Method" }
                    select {
                        class: "{theme::select_class()}",
                        value: method().as_api(),
                        onchange: move |evt| method.set(PaymentMethod::from_api(&evt.value())),
                        option { value: "cash", "Cash" }
                        option { value: "card", "Card" }
                        option { value: "transfer", "Transfer" }
                    }
                }
                button { class: "{theme::btn_primary()}", r#type: "submit", "Record Payment" }
            }

            div {
                class: "{theme::table_container()}",
                table {
                    class: "min-w-full {theme::table_divider()} text-sm",
                    thead {
                        class: "{theme::table_header()}",
                        tr {
                            th { class: "px-4 py-3 font-medium", "Order" }
                            th { class: "px-4 py-3 font-medium", "Method" }
                            th { class: "px-4 py-3 font-medium", "Date" }
                            th { class: "px-4 py-3 font-medium text-right", "Amount ($)" }
                        }
                    }
                    tbody {
                        class: "{theme::table_divider()}",
                        for payment in payments.into_iter() {
                            PaymentRow { payment }
                        }
                    }
                }
                if is_empty {
                    p { class: "px-4 py-6 text-sm text-slate-500", "No payments recorded." }
                }
            }
        }
    }
}

#[component]
fn PaymentRow(payment: Payment) -> Element {
    let date = payment
        .paid_at
        .map(|ts| format!("{:04}-{:02}-{:02}", ts.year(), u8::from(ts.month()), ts.day()))
        .unwrap_or_else(|| "—".to_string());
    rsx! {
        tr {
            td { class: "px-4 py-3 text-slate-200", "#{payment.order_id}" }
            td { class: "px-4 py-3 text-slate-400", "{payment.method.label()}" }
            td { class: "px-4 py-3 text-slate-400", "{date}" }
            td { class: "px-4 py-3 text-right text-slate-200", {format!("{:.2}", payment.amount_usd)} }
        }
    }
}
