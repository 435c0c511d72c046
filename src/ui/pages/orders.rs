use dioxus::prelude::*;

use crate::{
    app::{force_fetch, request_fetch, session_client},
    domain::{ApiConfig, AppState, CacheResource, Order, OrderStatus},
    ui::{
        components::toast::{push_toast, ToastKind, ToastMessage},
        theme,
    },
};

#[component]
pub fn OrdersPage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let api_config = use_context::<Signal<ApiConfig>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let data_request = use_context::<Signal<Option<CacheResource>>>();

    use_hook({
        let state = state.clone();
        let data_request = data_request.clone();
        move || request_fetch(state.clone(), data_request.clone(), CacheResource::Orders)
    });

    let orders = state.with(|st| st.orders.clone());

    let on_mark_paid = {
        let state = state.clone();
        let api_config = api_config.clone();
        let toasts = toasts.clone();
        let data_request = data_request.clone();
        move |order_id: String| {
            let state = state.clone();
            let api_config = api_config.clone();
            let toasts = toasts.clone();
            let data_request = data_request.clone();
            spawn(async move {
                let Some(client) = session_client(&state, &api_config) else {
                    return;
                };
                match client
                    .update_order_status(&order_id, OrderStatus::Paid)
                    .await
                {
                    Ok(_) => {
                        push_toast(toasts.clone(), ToastKind::Success, "Order marked as paid.");
                        force_fetch(data_request.clone(), CacheResource::Orders);
                    }
                    Err(err) => push_toast(
                        toasts.clone(),
                        ToastKind::Error,
                        format!("Failed to update order: {err}"),
                    ),
                }
            });
        }
    };

    let on_delete = {
        let state = state.clone();
        let api_config = api_config.clone();
        let toasts = toasts.clone();
        let data_request = data_request.clone();
        move |order_id: String| {
            let state = state.clone();
            let api_config = api_config.clone();
            let toasts = toasts.clone();
            let data_request = data_request.clone();
            spawn(async move {
                let Some(client) = session_client(&state, &api_config) else {
                    return;
                };
                match client.delete_order(&order_id).await {
                    Ok(()) => {
                        push_toast(toasts.clone(), ToastKind::Info, "Order deleted.");
                        force_fetch(data_request.clone(), CacheResource::Orders);
                    }
                    Err(err) => push_toast(
                        toasts.clone(),
                        ToastKind::Error,
                        format!("Failed to delete order: {err}"),
                    ),
                }
            });
        }
    };

    let is_empty = orders.is_empty();

    rsx! {
        div { class: "space-y-6",
            div { class: "flex items-center justify-between",
                h2 { class: "text-lg font-semibold text-slate-200", "Orders" }
                button {
                    class: "{theme::btn_link()}",
                    onclick: move |_| force_fetch(data_request.clone(), CacheResource::Orders),
                    "Refresh"
                }
            }
            div {
                class: "{theme::table_container()}",
                table {
                    class: "min-w-full {theme::table_divider()} text-sm",
                    thead {
                        class: "{theme::table_header()}",
                        tr {
                            th { class: "px-4 py-3 font-medium", "Customer" }
                            th { class: "px-4 py-3 font-medium", "Branch" }
                            th { class: "px-4 py-3 font-medium", "Date" }
                            th { class: "px-4 py-3 font-medium", "Status" }
                            th { class: "px-4 py-3 font-medium text-right", "Total ($)" }
                            th { class: "px-4 py-3" }
                        }
                    }
                    tbody {
                        class: "{theme::table_divider()}",
                        for order in orders.into_iter() {
                            OrderRow {
                                order,
                                on_mark_paid: on_mark_paid.clone(),
                                on_delete: on_delete.clone(),
                            }
                        }
                    }
                }
                if is_empty {
                    p { class: "px-4 py-6 text-sm text-slate-500",
                        "No orders yet. Create one from the New Order tab."
                    }
                }
            }
        }
    }
}

#[component]
fn OrderRow(
    order: Order,
    on_mark_paid: EventHandler<String>,
    on_delete: EventHandler<String>,
) -> Element {
    let branch = order.branch_name.clone().unwrap_or_else(|| "—".to_string());
    let date = order
        .created_at
        .map(|ts| format!("{:04}-{:02}-{:02}", ts.year(), u8::from(ts.month()), ts.day()))
        .unwrap_or_else(|| "—".to_string());
    let total = format!("{:.2}", order.total_usd);
    let status_class = match order.status {
        OrderStatus::Paid => "text-emerald-300",
        OrderStatus::Confirmed => "text-sky-100",
        OrderStatus::Cancelled => "text-rose-300",
        OrderStatus::Draft => "text-slate-400",
    };
    let can_mark_paid = order.status == OrderStatus::Confirmed;
    let paid_id = order.id.clone();
    let delete_id = order.id.clone();

    rsx! {
        tr {
            td { class: "px-4 py-3 text-slate-200", "{order.customer_name}" }
            td { class: "px-4 py-3 text-slate-400", "{branch}" }
            td { class: "px-4 py-3 text-slate-400", "{date}" }
            td { class: "px-4 py-3 {status_class}", "{order.status.label()}" }
            td { class: "px-4 py-3 text-right text-slate-200", "{total}" }
            td { class: "px-4 py-3 text-right",
                div { class: "flex justify-end gap-3",
                    if can_mark_paid {
                        button {
                            class: "{theme::btn_link()}",
                            onclick: move |_| on_mark_paid.call(paid_id.clone()),
                            "Mark paid"
                        }
                    }
                    button {
                        class: "{theme::btn_danger_link()}",
                        onclick: move |_| on_delete.call(delete_id.clone()),
                        "Delete"
                    }
                }
            }
        }
    }
}
