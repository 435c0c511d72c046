use dioxus::prelude::*;

use crate::domain::LineItem;
use crate::ui::theme;

/// Editable table of a draft's line items. Edits are reported upward as
/// `(index, raw input)` pairs; the wizard parses and reduces them.
#[component]
pub fn LineItemTable(
    items: Vec<LineItem>,
    on_quantity: EventHandler<(usize, String)>,
    on_price: EventHandler<(usize, String)>,
    on_cost: EventHandler<(usize, String)>,
    on_remove: EventHandler<usize>,
) -> Element {
    let is_empty = items.is_empty();

    rsx! {
        div {
            class: "{theme::table_container()}",
            table {
                class: "min-w-full {theme::table_divider()} text-sm",
                thead {
                    class: "{theme::table_header()}",
                    tr {
                        th { class: "px-4 py-3 font-medium", "Item" }
                        th { class: "px-4 py-3 font-medium", "Qty" }
                        th { class: "px-4 py-3 font-medium", "Unit Price ($)" }
                        th { class: "px-4 py-3 font-medium", "Unit Cost ($)" }
                        th { class: "px-4 py-3 font-medium text-right", "Line Total" }
                        th { class: "px-4 py-3" }
                    }
                }
                tbody {
                    class: "{theme::table_divider()}",
                    for (index, item) in items.into_iter().enumerate() {
                        LineItemRow {
                            index,
                            item,
                            on_quantity,
                            on_price,
                            on_cost,
                            on_remove,
                        }
                    }
                }
            }
            if is_empty {
                p { class: "px-4 py-6 text-sm text-slate-500",
                    "No line items yet. Pick a product above to start the order."
                }
            }
        }
    }
}

#[component]
fn LineItemRow(
    index: usize,
    item: LineItem,
    on_quantity: EventHandler<(usize, String)>,
    on_price: EventHandler<(usize, String)>,
    on_cost: EventHandler<(usize, String)>,
    on_remove: EventHandler<usize>,
) -> Element {
    let line_total = format!("{:.2}", item.line_total());
    let cell_input =
        "w-20 rounded border border-slate-700 bg-slate-950 px-2 py-1 text-right text-sm text-slate-100 focus:border-indigo-500 focus:outline-none";

    rsx! {
        tr {
            td { class: "px-4 py-3 text-slate-200", "{item.name}" }
            td { class: "px-4 py-3",
                input {
                    class: "{cell_input}",
                    inputmode: "numeric",
                    value: item.quantity.to_string(),
                    oninput: move |evt| on_quantity.call((index, evt.value().to_string())),
                }
            }
            td { class: "px-4 py-3",
                input {
                    class: "{cell_input}",
                    inputmode: "decimal",
                    value: format!("{:.2}", item.unit_price_usd),
                    oninput: move |evt| on_price.call((index, evt.value().to_string())),
                }
            }
            td { class: "px-4 py-3",
                input {
                    class: "{cell_input}",
                    inputmode: "decimal",
                    value: format!("{:.2}", item.unit_cost_usd),
                    oninput: move |evt| on_cost.call((index, evt.value().to_string())),
                }
            }
            td { class: "px-4 py-3 text-right text-slate-200", "${line_total}" }
            td { class: "px-4 py-3 text-right",
                button {
                    class: "{theme::btn_danger_link()}",
                    onclick: move |_| on_remove.call(index),
                    "Remove"
                }
            }
        }
    }
}
