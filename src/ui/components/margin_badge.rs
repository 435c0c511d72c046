use dioxus::prelude::*;

use crate::domain::LOW_MARGIN_THRESHOLD_PERCENT;

/// Small pill summarising an order's margin at a glance.
#[component]
pub fn MarginBadge(margin_percent: f64, is_loss: bool) -> Element {
    let (label, color) = if is_loss {
        ("Loss", "bg-rose-500/10 text-rose-300 border-rose-500/40")
    } else if margin_percent < LOW_MARGIN_THRESHOLD_PERCENT {
        ("Thin", "bg-amber-500/10 text-amber-300 border-amber-500/40")
    } else if margin_percent >= 15.0 {
        ("Strong", "bg-emerald-500/10 text-emerald-300 border-emerald-500/40")
    } else {
        ("OK", "bg-slate-700/40 text-slate-300 border-slate-600/60")
    };

    rsx! {
        span {
            class: "inline-flex items-center rounded-full border px-2 py-0.5 text-xs font-medium {color}",
            "{label}"
        }
    }
}
