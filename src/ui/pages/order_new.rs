use dioxus::prelude::*;

use crate::{
    app::{force_fetch, persist_user_state, request_fetch, session_client},
    domain::{
        agency_rate, assess_draft, guide_rate, reduce, submit_gate, ApiConfig, AppState,
        CacheResource, DraftAction, ProfitAssessment, SubmitGate,
    },
    ui::{
        components::{
            confirm_dialog::OverrideDialog,
            line_item_table::LineItemTable,
            profit_panel::ProfitPanel,
            toast::{push_toast, ToastKind, ToastMessage},
        },
        theme,
    },
};

#[component]
pub fn OrderNewPage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let api_config = use_context::<Signal<ApiConfig>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let data_request = use_context::<Signal<Option<CacheResource>>>();

    use_hook({
        let state = state.clone();
        let data_request = data_request.clone();
        move || {
            request_fetch(state.clone(), data_request.clone(), CacheResource::Directory);
            request_fetch(state.clone(), data_request.clone(), CacheResource::Customers);
            request_fetch(state.clone(), data_request.clone(), CacheResource::Products);
        }
    });

    let mut product_query = use_signal(String::new);
    let mut quantity_input = use_signal(|| "1".to_string());
    // A blocked submission waiting for the user's override decision.
    let pending_override = use_signal(|| None::<(ProfitAssessment, SubmitGate)>);
    let submitting = use_signal(|| false);

    let draft = state.with(|st| st.draft.clone());
    let customers = state.with(|st| st.customers.clone());
    let products = state.with(|st| st.products.clone());
    let agencies = state.with(|st| st.agencies.clone());
    let guides = state.with(|st| st.guides.clone());
    let branches = state.with(|st| st.branches.clone());

    // Assessed fresh on every render; never carried across edits.
    let current_agency_rate = agency_rate(&agencies, draft.agency_id.as_deref());
    let current_guide_rate = guide_rate(&guides, draft.guide_id.as_deref());
    let assessment = assess_draft(&draft, current_agency_rate, current_guide_rate);

    let dispatch = {
        let mut state = state.clone();
        let api_config = api_config.clone();
        move |action: DraftAction| {
            state.with_mut(|st| st.draft = reduce(&st.draft, action));
            persist_user_state(&state, &api_config);
        }
    };

    let on_add_product = {
        let state = state.clone();
        let toasts = toasts.clone();
        let mut dispatch = dispatch.clone();
        let mut product_query = product_query.clone();
        let mut quantity_input = quantity_input.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            let query = product_query().trim().to_string();
            if query.is_empty() {
                push_toast(toasts.clone(), ToastKind::Warning, "Pick a product first.");
                return;
            }

            let product = state.with(|st| {
                st.products
                    .iter()
                    .find(|p| p.name.eq_ignore_ascii_case(&query) || p.id == query)
                    .cloned()
            });

            let Some(product) = product else {
                push_toast(
                    toasts.clone(),
                    ToastKind::Error,
                    "Product not found. Use the autocomplete list.",
                );
                return;
            };

            let Some(quantity) = parse_quantity(&quantity_input()) else {
                push_toast(
                    toasts.clone(),
                    ToastKind::Error,
                    "Quantity must be a non-negative whole number.",
                );
                return;
            };

            dispatch(DraftAction::AddProductLine { product, quantity });
            product_query.set(String::new());
            quantity_input.set("1".to_string());
        }
    };

    let submit_order = {
        let state = state.clone();
        let api_config = api_config.clone();
        let toasts = toasts.clone();
        let data_request = data_request.clone();
        let submitting = submitting.clone();
        move || {
            let state = state.clone();
            let api_config = api_config.clone();
            let toasts = toasts.clone();
            let data_request = data_request.clone();
            let mut submitting = submitting.clone();
            submitting.set(true);
            spawn(async move {
                let Some(client) = session_client(&state, &api_config) else {
                    submitting.set(false);
                    return;
                };
                let draft = state.with(|st| st.draft.clone());
                match client.create_order(&draft).await {
                    Ok(order) => {
                        let mut state = state.clone();
                        state.with_mut(|st| st.draft = reduce(&st.draft, DraftAction::Clear));
                        persist_user_state(&state, &api_config);
                        push_toast(
                            toasts.clone(),
                            ToastKind::Success,
                            format!("Order {} submitted.", order.id),
                        );
                        force_fetch(data_request.clone(), CacheResource::Orders);
                    }
                    Err(err) => push_toast(
                        toasts.clone(),
                        ToastKind::Error,
                        format!("Failed to submit order: {err}"),
                    ),
                }
                submitting.set(false);
            });
        }
    };

    let on_submit_click = {
        let state = state.clone();
        let toasts = toasts.clone();
        let mut pending_override = pending_override.clone();
        let submit_order = submit_order.clone();
        move |_| {
            let draft = state.with(|st| st.draft.clone());
            if draft.is_empty() {
                push_toast(
                    toasts.clone(),
                    ToastKind::Warning,
                    "Add at least one line item before submitting.",
                );
                return;
            }

            // The gate runs against the draft exactly as it stands now.
            let (agencies, guides) = state.with(|st| (st.agencies.clone(), st.guides.clone()));
            let assessment = assess_draft(
                &draft,
                agency_rate(&agencies, draft.agency_id.as_deref()),
                guide_rate(&guides, draft.guide_id.as_deref()),
            );
            let gate = submit_gate(&assessment);
            if gate.requires_override() {
                pending_override.set(Some((assessment, gate)));
            } else {
                submit_order();
            }
        }
    };

    let on_override_confirm = {
        let mut pending_override = pending_override.clone();
        let submit_order = submit_order.clone();
        move |_| {
            pending_override.set(None);
            submit_order();
        }
    };

    let on_override_cancel = {
        let mut pending_override = pending_override.clone();
        move |_| pending_override.set(None)
    };

    let submit_label = if submitting() { "Submitting..." } else { "Submit Order" };

    rsx! {
        div { class: "space-y-8",
            if let Some((assessment, gate)) = pending_override() {
                OverrideDialog {
                    assessment,
                    gate,
                    on_confirm: on_override_confirm,
                    on_cancel: on_override_cancel,
                }
            }

            section {
                class: "grid gap-4 sm:grid-cols-2 {theme::panel()}",
                div {
                    label { class: "{theme::label_class()}", "Customer" }
                    select {
                        class: "{theme::select_class()}",
                        value: draft.customer_id.clone().unwrap_or_default(),
                        onchange: {
                            let mut dispatch = dispatch.clone();
                            move |evt: Event<FormData>| {
                                dispatch(DraftAction::SetCustomer(non_empty(evt.value())));
                            }
                        },
                        option { value: "", "— select —" }
                        for customer in customers.iter() {
                            option { value: customer.id.clone(), "{customer.name}" }
                        }
                    }
                }
                div {
                    label { class: "{theme::label_class()}", "Branch" }
                    select {
                        class: "{theme::select_class()}",
                        value: draft.branch_id.clone().unwrap_or_default(),
                        onchange: {
                            let mut dispatch = dispatch.clone();
                            move |evt: Event<FormData>| {
                                dispatch(DraftAction::SetBranch(non_empty(evt.value())));
                            }
                        },
                        option { value: "", "— select —" }
                        for branch in branches.iter() {
                            option { value: branch.id.clone(), "{branch.name}" }
                        }
                    }
                }
                div {
                    label { class: "{theme::label_class()}", "Agency" }
                    select {
                        class: "{theme::select_class()}",
                        value: draft.agency_id.clone().unwrap_or_default(),
                        onchange: {
                            let mut dispatch = dispatch.clone();
                            move |evt: Event<FormData>| {
                                dispatch(DraftAction::SetAgency(non_empty(evt.value())));
                            }
                        },
                        option { value: "", "No agency" }
                        for agency in agencies.iter() {
                            option {
                                value: agency.id.clone(),
                                {format!("{} ({:.0}%)", agency.name, agency.commission_rate)}
                            }
                        }
                    }
                }
                div {
                    label { class: "{theme::label_class()}", "Guide" }
                    select {
                        class: "{theme::select_class()}",
                        value: draft.guide_id.clone().unwrap_or_default(),
                        onchange: {
                            let mut dispatch = dispatch.clone();
                            move |evt: Event<FormData>| {
                                dispatch(DraftAction::SetGuide(non_empty(evt.value())));
                            }
                        },
                        option { value: "", "No guide" }
                        for guide in guides.iter() {
                            option {
                                value: guide.id.clone(),
                                {format!("{} ({:.0}%)", guide.name, guide.commission_rate)}
                            }
                        }
                    }
                }
            }

            section {
                class: "grid gap-6 lg:grid-cols-[2fr,1fr]",
                div {
                    class: "space-y-4",
                    form {
                        class: "flex flex-wrap items-end gap-4 {theme::panel()}",
                        onsubmit: on_add_product,
                        div { class: "flex-1 min-w-[200px]",
                            label { class: "{theme::label_class()}", "Product" }
                            input {
                                class: "{theme::input_class()}",
                                value: product_query(),
                                oninput: move |evt| product_query.set(evt.value().to_string()),
                                list: "product-list",
                                placeholder: "e.g. Balloon Ride",
                            }
                            datalist {
                                id: "product-list",
                                for product in products.iter() {
                                    option { value: product.name.clone() }
                                }
                            }
                        }
                        div { class: "w-32",
                            label { class: "{theme::label_class()}", "Qty" }
                            input {
                                class: "{theme::input_class()}",
                                inputmode: "numeric",
                                value: quantity_input(),
                                oninput: move |evt| quantity_input.set(evt.value().to_string()),
                            }
                        }
                        button {
                            class: "{theme::btn_primary()}",
                            r#type: "submit",
                            "Add Item"
                        }
                    }

                    LineItemTable {
                        items: draft.line_items.clone(),
                        on_quantity: {
                            let mut dispatch = dispatch.clone();
                            move |(index, raw): (usize, String)| {
                                if let Some(quantity) = parse_quantity(&raw) {
                                    dispatch(DraftAction::SetLineQuantity { index, quantity });
                                }
                            }
                        },
                        on_price: {
                            let mut dispatch = dispatch.clone();
                            move |(index, raw): (usize, String)| {
                                dispatch(DraftAction::SetLinePrice {
                                    index,
                                    unit_price_usd: parse_money(&raw),
                                });
                            }
                        },
                        on_cost: {
                            let mut dispatch = dispatch.clone();
                            move |(index, raw): (usize, String)| {
                                dispatch(DraftAction::SetLineCost {
                                    index,
                                    unit_cost_usd: parse_money(&raw),
                                });
                            }
                        },
                        on_remove: {
                            let mut dispatch = dispatch.clone();
                            move |index: usize| dispatch(DraftAction::RemoveLine(index))
                        },
                    }

                    div {
                        label { class: "{theme::label_class()}", "Note" }
                        input {
                            class: "{theme::input_class()}",
                            value: draft.note.clone(),
                            oninput: {
                                let mut dispatch = dispatch.clone();
                                move |evt: Event<FormData>| {
                                    dispatch(DraftAction::SetNote(evt.value().to_string()));
                                }
                            },
                            placeholder: "Pickup details, special requests...",
                        }
                    }
                }

                div {
                    class: "space-y-4",
                    ProfitPanel { assessment: assessment.clone() }
                    button {
                        class: "w-full {theme::btn_primary()}",
                        disabled: submitting(),
                        onclick: on_submit_click,
                        "{submit_label}"
                    }
                    button {
                        class: "w-full {theme::btn_secondary()}",
                        onclick: {
                            let mut dispatch = dispatch.clone();
                            move |_| dispatch(DraftAction::Clear)
                        },
                        "Clear Draft"
                    }
                }
            }
        }
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Accepts only non-negative whole numbers; anything else is rejected so a
/// negative quantity never reaches the draft.
pub fn parse_quantity(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok()
}

/// Coerces malformed or negative money input to 0, matching the estimator's
/// contract that its inputs are already valid non-negative numbers.
pub fn parse_money(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value >= 0.0)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantity_rejects_negatives_and_fractions() {
        assert_eq!(parse_quantity("3"), Some(3));
        assert_eq!(parse_quantity(" 12 "), Some(12));
        assert_eq!(parse_quantity("-2"), None);
        assert_eq!(parse_quantity("1.5"), None);
        assert_eq!(parse_quantity("abc"), None);
    }

    #[test]
    fn money_coerces_garbage_to_zero() {
        assert_eq!(parse_money("120.50"), 120.5);
        assert_eq!(parse_money(""), 0.0);
        assert_eq!(parse_money("-5"), 0.0);
        assert_eq!(parse_money("NaN"), 0.0);
        assert_eq!(parse_money("twelve"), 0.0);
    }
}
