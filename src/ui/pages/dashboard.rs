use dioxus::prelude::*;

use crate::{
    app::{force_fetch, request_fetch},
    domain::{AppState, CacheResource},
    ui::{components::kpi_card::KpiCard, theme},
};

#[component]
pub fn DashboardPage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let data_request = use_context::<Signal<Option<CacheResource>>>();

    use_hook({
        let state = state.clone();
        let data_request = data_request.clone();
        move || {
            request_fetch(state.clone(), data_request.clone(), CacheResource::Stats);
            request_fetch(state.clone(), data_request.clone(), CacheResource::Orders);
        }
    });

    let stats = state.with(|st| st.stats.clone());
    let recent: Vec<_> = state.with(|st| st.orders.iter().take(5).cloned().collect());

    let revenue_display = format!("${:.0}", stats.revenue_month_usd);

    rsx! {
        div { class: "space-y-8",
            section {
                class: "flex items-center justify-between",
                h2 { class: "text-lg font-semibold text-slate-200", "Today at a glance" }
                button {
                    class: "{theme::btn_link()}",
                    onclick: move |_| force_fetch(data_request.clone(), CacheResource::Stats),
                    "Refresh"
                }
            }
            section {
                class: "grid gap-4 sm:grid-cols-4",
                KpiCard {
                    title: "Orders Today".to_string(),
                    value: stats.orders_today.to_string(),
                    description: Some("Submitted since midnight".to_string()),
                }
                KpiCard {
                    title: "Revenue (Month)".to_string(),
                    value: revenue_display,
                    description: Some("Tax-inclusive order totals".to_string()),
                }
                KpiCard {
                    title: "Open Payments".to_string(),
                    value: stats.open_payments.to_string(),
                    description: Some("Confirmed orders awaiting payment".to_string()),
                }
                KpiCard {
                    title: "Customers".to_string(),
                    value: stats.customer_count.to_string(),
                    description: None,
                }
            }
            section {
                class: "space-y-3",
                h2 { class: "text-sm font-semibold text-slate-200", "Recent Orders" }
                div {
                    class: "{theme::table_container()}",
                    table {
                        class: "min-w-full {theme::table_divider()} text-sm",
                        thead {
                            class: "{theme::table_header()}",
                            tr {
                                th { class: "px-4 py-3 font-medium", "Customer" }
                                th { class: "px-4 py-3 font-medium", "Status" }
                                th { class: "px-4 py-3 font-medium text-right", "Total ($)" }
                            }
                        }
                        tbody {
                            class: "{theme::table_divider()}",
                            for order in recent.iter() {
                                tr {
                                    td { class: "px-4 py-3 text-slate-200", "{order.customer_name}" }
                                    td { class: "px-4 py-3 text-slate-400", "{order.status.label()}" }
                                    td { class: "px-4 py-3 text-right text-slate-200",
                                        {format!("{:.2}", order.total_usd)}
                                    }
                                }
                            }
                        }
                    }
                    if recent.is_empty() {
                        p { class: "px-4 py-6 text-sm text-slate-500", "No orders yet." }
                    }
                }
            }
        }
    }
}
