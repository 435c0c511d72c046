use dioxus::prelude::*;

use crate::domain::{ProfitAssessment, SubmitGate};
use crate::ui::theme;

/// Override prompt shown when the profitability gate blocks a submission.
/// Confirming sends the order exactly as assessed; the check is not re-run.
#[component]
pub fn OverrideDialog(
    assessment: ProfitAssessment,
    gate: SubmitGate,
    on_confirm: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    let headline = match gate {
        SubmitGate::BlockedLoss => "This order makes a loss.",
        SubmitGate::BlockedLowMargin => "This order's margin is below 5%.",
        SubmitGate::Clear => return rsx! { Fragment {} },
    };

    let net = format!("{:.2}", assessment.net_profit);
    let margin = format!("{:.1}%", assessment.profit_margin_percent);

    rsx! {
        div {
            class: "fixed inset-0 z-50 flex items-center justify-center bg-slate-950/80 backdrop-blur",
            div {
                class: "w-full max-w-md rounded-xl border border-amber-500/40 bg-slate-900 p-6 shadow-lg",
                h2 { class: "text-lg font-semibold text-amber-200", "{headline}" }
                p { class: "mt-2 text-sm text-slate-300",
                    "Net profit ${net} at a {margin} margin after tax, commissions and cost."
                }
                p { class: "mt-2 text-xs text-slate-500",
                    "Submit anyway? The order goes out unchanged."
                }
                div {
                    class: "mt-6 flex justify-end gap-3",
                    button {
                        class: "{theme::btn_secondary()}",
                        onclick: move |_| on_cancel.call(()),
                        "Go back"
                    }
                    button {
                        class: "rounded-lg bg-amber-500 px-4 py-2 text-sm font-semibold text-slate-950 hover:bg-amber-400",
                        onclick: move |_| on_confirm.call(()),
                        "Submit anyway"
                    }
                }
            }
        }
    }
}
