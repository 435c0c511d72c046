//! Reducer for order-draft edits.
//!
//! Every form interaction in the wizard becomes a [`DraftAction`] applied by
//! [`reduce`], which returns a new draft. All fields are statically typed;
//! there is no merge of untyped field maps.

use super::entities::{LineItem, OrderDraft, Product};

#[derive(Clone, Debug, PartialEq)]
pub enum DraftAction {
    SetCustomer(Option<String>),
    SetAgency(Option<String>),
    SetGuide(Option<String>),
    SetBranch(Option<String>),
    SetNote(String),
    /// Appends a line item prefilled from the product catalogue.
    AddProductLine { product: Product, quantity: u32 },
    SetLineQuantity { index: usize, quantity: u32 },
    SetLinePrice { index: usize, unit_price_usd: f64 },
    SetLineCost { index: usize, unit_cost_usd: f64 },
    RemoveLine(usize),
    Clear,
}

pub fn reduce(draft: &OrderDraft, action: DraftAction) -> OrderDraft {
    let mut next = draft.clone();
    match action {
        DraftAction::SetCustomer(id) => next.customer_id = id,
        DraftAction::SetAgency(id) => next.agency_id = id,
        DraftAction::SetGuide(id) => next.guide_id = id,
        DraftAction::SetBranch(id) => next.branch_id = id,
        DraftAction::SetNote(note) => next.note = note,
        DraftAction::AddProductLine { product, quantity } => {
            next.line_items.push(LineItem {
                name: product.name,
                quantity,
                unit_price_usd: product.price_usd,
                unit_cost_usd: product.cost_usd,
            });
        }
        DraftAction::SetLineQuantity { index, quantity } => {
            if let Some(item) = next.line_items.get_mut(index) {
                item.quantity = quantity;
            }
        }
        DraftAction::SetLinePrice {
            index,
            unit_price_usd,
        } => {
            if let Some(item) = next.line_items.get_mut(index) {
                item.unit_price_usd = unit_price_usd;
            }
        }
        DraftAction::SetLineCost {
            index,
            unit_cost_usd,
        } => {
            if let Some(item) = next.line_items.get_mut(index) {
                item.unit_cost_usd = unit_cost_usd;
            }
        }
        DraftAction::RemoveLine(index) => {
            if index < next.line_items.len() {
                next.line_items.remove(index);
            }
        }
        DraftAction::Clear => next = OrderDraft::default(),
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str, price: f64, cost: f64) -> Product {
        Product {
            id: "p1".to_string(),
            name: name.to_string(),
            category: None,
            price_usd: price,
            cost_usd: cost,
            stock: None,
        }
    }

    #[test]
    fn add_product_line_copies_catalogue_prices() {
        let draft = reduce(
            &OrderDraft::default(),
            DraftAction::AddProductLine {
                product: product("Museum pass", 30.0, 12.0),
                quantity: 3,
            },
        );
        assert_eq!(draft.line_items.len(), 1);
        assert_eq!(draft.line_items[0].name, "Museum pass");
        assert_eq!(draft.subtotal(), 90.0);
        assert_eq!(draft.total_cost(), 36.0);
    }

    #[test]
    fn reduce_does_not_mutate_the_input() {
        let original = OrderDraft::default();
        let _ = reduce(
            &original,
            DraftAction::AddProductLine {
                product: product("Transfer", 45.0, 20.0),
                quantity: 1,
            },
        );
        assert!(original.line_items.is_empty());
    }

    #[test]
    fn line_edits_target_only_the_given_index() {
        let mut draft = OrderDraft::default();
        for name in ["A", "B"] {
            draft = reduce(
                &draft,
                DraftAction::AddProductLine {
                    product: product(name, 10.0, 5.0),
                    quantity: 1,
                },
            );
        }
        draft = reduce(
            &draft,
            DraftAction::SetLineQuantity {
                index: 1,
                quantity: 4,
            },
        );
        assert_eq!(draft.line_items[0].quantity, 1);
        assert_eq!(draft.line_items[1].quantity, 4);
    }

    #[test]
    fn out_of_range_edits_are_ignored() {
        let draft = reduce(
            &OrderDraft::default(),
            DraftAction::SetLinePrice {
                index: 3,
                unit_price_usd: 99.0,
            },
        );
        assert!(draft.line_items.is_empty());
        let draft = reduce(&draft, DraftAction::RemoveLine(0));
        assert!(draft.line_items.is_empty());
    }

    #[test]
    fn clear_resets_everything() {
        let mut draft = reduce(
            &OrderDraft::default(),
            DraftAction::SetCustomer(Some("c9".to_string())),
        );
        draft = reduce(&draft, DraftAction::SetNote("rush".to_string()));
        draft = reduce(&draft, DraftAction::Clear);
        assert_eq!(draft, OrderDraft::default());
    }
}
