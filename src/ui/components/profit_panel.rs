use dioxus::prelude::*;

use crate::domain::{submit_gate, ProfitAssessment, SubmitGate};
use crate::ui::components::margin_badge::MarginBadge;

/// Live profitability breakdown shown next to the order wizard. Recomputed
/// from the current draft on every render; nothing here is cached.
#[component]
pub fn ProfitPanel(assessment: ProfitAssessment) -> Element {
    let gate = submit_gate(&assessment);
    let (status_label, theme) = match gate {
        SubmitGate::Clear => (
            "Ready to submit",
            "border-emerald-500/40 bg-emerald-500/10 text-emerald-200",
        ),
        SubmitGate::BlockedLowMargin => (
            "Low margin — override needed",
            "border-amber-500/40 bg-amber-500/10 text-amber-200",
        ),
        SubmitGate::BlockedLoss => (
            "Loss — override needed",
            "border-rose-500/40 bg-rose-500/10 text-rose-200",
        ),
    };

    let net_display = format!("{:.2}", assessment.net_profit);
    let margin_display = format!("{:.1}%", assessment.profit_margin_percent);

    rsx! {
        div {
            class: "rounded-xl border px-4 py-3 {theme}",
            div {
                class: "flex items-center justify-between",
                span { class: "text-xs font-semibold uppercase tracking-wide", "Profitability" }
                MarginBadge {
                    margin_percent: assessment.profit_margin_percent,
                    is_loss: assessment.is_loss,
                }
            }
            p { class: "mt-2 text-2xl font-semibold", "${net_display}" }
            p { class: "mt-1 text-xs opacity-80", "Net margin {margin_display} · {status_label}" }
            dl {
                class: "mt-3 space-y-1 text-xs",
                BreakdownRow { label: "Order total", value: assessment.total }
                BreakdownRow { label: "Tax (in total)", value: assessment.tax_amount }
                BreakdownRow { label: "Commissions", value: assessment.commissions }
                BreakdownRow { label: "Cost", value: assessment.total_cost }
            }
        }
    }
}

#[component]
fn BreakdownRow(label: &'static str, value: f64) -> Element {
    let display = format!("{value:.2}");
    rsx! {
        div {
            class: "flex items-center justify-between",
            dt { class: "opacity-80", "{label}" }
            dd { class: "font-medium", "${display}" }
        }
    }
}
