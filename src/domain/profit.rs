//! Order profitability estimation and the submission gate.
//!
//! Pure arithmetic over a draft's totals; no state, no I/O. The wizard
//! recomputes an assessment from the current draft on every submission
//! attempt and never caches one across edits.

use super::entities::OrderDraft;

/// Tax embedded in the tax-inclusive order total, as a percentage.
pub const TAX_RATE_PERCENT: f64 = 20.0;

/// Orders below this net margin need an explicit user override.
pub const LOW_MARGIN_THRESHOLD_PERCENT: f64 = 5.0;

/// Derived profitability figures for a draft. Display-only; never persisted.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProfitAssessment {
    pub total: f64,
    pub total_cost: f64,
    pub tax_amount: f64,
    pub commissions: f64,
    pub net_profit: f64,
    pub profit_margin_percent: f64,
    pub is_loss: bool,
}

/// Outcome of the pre-submission profitability check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitGate {
    /// Margin is healthy; submit immediately.
    Clear,
    /// The order makes a loss.
    BlockedLoss,
    /// Positive but under [`LOW_MARGIN_THRESHOLD_PERCENT`].
    BlockedLowMargin,
}

impl SubmitGate {
    pub fn requires_override(&self) -> bool {
        !matches!(self, SubmitGate::Clear)
    }
}

/// Computes a [`ProfitAssessment`] from the four numeric inputs.
///
/// `total` is tax-inclusive; the 20% tax is extracted as `total * 20 / 120`.
/// Commissions apply to the tax-exclusive base. When `total` is 0 the margin
/// is reported as 0 rather than dividing by zero.
pub fn assess(total: f64, total_cost: f64, agency_rate: f64, guide_rate: f64) -> ProfitAssessment {
    let tax_amount = total * TAX_RATE_PERCENT / (100.0 + TAX_RATE_PERCENT);
    let net_base = total - tax_amount;
    let commissions = net_base * (agency_rate + guide_rate) / 100.0;
    let net_profit = net_base - commissions - total_cost;
    let profit_margin_percent = if total > 0.0 {
        net_profit / total * 100.0
    } else {
        0.0
    };

    ProfitAssessment {
        total,
        total_cost,
        tax_amount,
        commissions,
        net_profit,
        profit_margin_percent,
        is_loss: net_profit < 0.0,
    }
}

/// Convenience wrapper: assess the draft's current totals.
pub fn assess_draft(draft: &OrderDraft, agency_rate: f64, guide_rate: f64) -> ProfitAssessment {
    assess(draft.subtotal(), draft.total_cost(), agency_rate, guide_rate)
}

/// Decision policy: block on loss, or on a positive total with margin under
/// the threshold. An all-zero draft passes (the margin branch is guarded by
/// `total > 0`). On user override the caller bypasses this check and submits
/// with the same assessment shown for display.
pub fn submit_gate(assessment: &ProfitAssessment) -> SubmitGate {
    if assessment.is_loss {
        SubmitGate::BlockedLoss
    } else if assessment.total > 0.0
        && assessment.profit_margin_percent < LOW_MARGIN_THRESHOLD_PERCENT
    {
        SubmitGate::BlockedLowMargin
    } else {
        SubmitGate::Clear
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 0.005
    }

    #[test]
    fn tax_is_extracted_from_inclusive_total() {
        let a = assess(120.0, 0.0, 0.0, 0.0);
        assert!(close(a.tax_amount, 20.0));
        assert!(close(a.net_profit, 100.0));
    }

    #[test]
    fn healthy_order_is_not_blocked() {
        let a = assess(1000.0, 500.0, 10.0, 5.0);
        assert!(close(a.tax_amount, 166.67));
        assert!(close(a.commissions, 125.0));
        assert!(close(a.net_profit, 208.33));
        assert!(close(a.profit_margin_percent, 20.83));
        assert!(!a.is_loss);
        assert_eq!(submit_gate(&a), SubmitGate::Clear);
    }

    #[test]
    fn loss_making_order_is_blocked() {
        let a = assess(100.0, 90.0, 0.0, 0.0);
        assert!(close(a.tax_amount, 16.67));
        assert!(close(a.net_profit, -6.67));
        assert!(a.is_loss);
        assert_eq!(submit_gate(&a), SubmitGate::BlockedLoss);
    }

    #[test]
    fn heavy_commissions_still_leave_margin() {
        let a = assess(1000.0, 200.0, 20.0, 20.0);
        assert!(close(a.commissions, 333.33));
        assert!(close(a.net_profit, 300.0));
        assert!(close(a.profit_margin_percent, 30.0));
        assert_eq!(submit_gate(&a), SubmitGate::Clear);
    }

    #[test]
    fn thin_margin_needs_override() {
        // Net profit ≈ 23.33 on 1000 → 2.3% margin, positive but thin.
        let a = assess(1000.0, 810.0, 0.0, 0.0);
        assert!(!a.is_loss);
        assert!(a.profit_margin_percent < LOW_MARGIN_THRESHOLD_PERCENT);
        assert_eq!(submit_gate(&a), SubmitGate::BlockedLowMargin);
        assert!(submit_gate(&a).requires_override());
    }

    #[test]
    fn zero_total_reports_zero_margin_and_passes() {
        let a = assess(0.0, 0.0, 10.0, 10.0);
        assert_eq!(a.profit_margin_percent, 0.0);
        assert!(!a.is_loss);
        assert_eq!(submit_gate(&a), SubmitGate::Clear);
    }

    #[test]
    fn zero_total_with_cost_blocks_via_loss_branch_only() {
        let a = assess(0.0, 50.0, 0.0, 0.0);
        assert_eq!(a.profit_margin_percent, 0.0);
        assert!(a.is_loss);
        assert_eq!(submit_gate(&a), SubmitGate::BlockedLoss);
    }

    #[test]
    fn commissions_are_non_negative_for_valid_rates() {
        for &(total, cost, ar, gr) in &[
            (0.0, 0.0, 0.0, 0.0),
            (10.0, 5.0, 100.0, 0.0),
            (2500.0, 100.0, 12.0, 8.0),
        ] {
            let a = assess(total, cost, ar, gr);
            assert!(a.commissions >= 0.0);
        }
    }

    #[test]
    fn assessment_is_idempotent() {
        let first = assess(1234.56, 789.0, 7.5, 2.5);
        let second = assess(1234.56, 789.0, 7.5, 2.5);
        assert_eq!(first, second);
    }

    #[test]
    fn assess_draft_matches_assess_on_totals() {
        use crate::domain::entities::{LineItem, OrderDraft};

        let draft = OrderDraft {
            line_items: vec![LineItem {
                name: "City tour".to_string(),
                quantity: 4,
                unit_price_usd: 250.0,
                unit_cost_usd: 125.0,
            }],
            ..OrderDraft::default()
        };
        assert_eq!(assess_draft(&draft, 10.0, 5.0), assess(1000.0, 500.0, 10.0, 5.0));
    }
}
