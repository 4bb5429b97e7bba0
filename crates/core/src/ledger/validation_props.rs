//! Property tests for normalization, posting rules, and reversal.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::events::BusinessEvent;
use super::reversal::{reversal_lines, ItemSnapshot};
use super::types::{RuleLine, Side};
use super::validation::{normalize_lines, totals};

/// Strategy for positive amounts with up to 4 decimal places.
fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|n| Decimal::new(n, 4))
}

/// Strategy for a balanced line set: each generated amount appears once as
/// a debit and once as a credit, already quantized so normalization cannot
/// skew the two sides differently.
fn balanced_lines_strategy() -> impl Strategy<Value = Vec<RuleLine>> {
    prop::collection::vec((1i64..10_000_000i64).prop_map(|n| Decimal::new(n, 2)), 1..8).prop_map(
        |amounts| {
            let mut lines = Vec::with_capacity(amounts.len() * 2);
            for (i, amount) in amounts.iter().enumerate() {
                lines.push(RuleLine::debit(&format!("1{i:03}"), *amount));
                lines.push(RuleLine::credit(&format!("2{i:03}"), *amount));
            }
            lines
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Every successfully normalized line set has equal debit and credit
    /// totals, quantized to 2 decimal places.
    #[test]
    fn normalized_sets_are_balanced(lines in balanced_lines_strategy()) {
        let normalized = normalize_lines(&lines).unwrap();
        let (debit, credit) = totals(&normalized);
        prop_assert_eq!(debit, credit);
        for line in &normalized {
            prop_assert_eq!(line.debit, line.debit.round_dp(2));
            prop_assert_eq!(line.credit, line.credit.round_dp(2));
        }
    }

    /// Exactly one of debit/credit is nonzero on every normalized line.
    #[test]
    fn normalized_lines_hold_xor_invariant(lines in balanced_lines_strategy()) {
        for line in normalize_lines(&lines).unwrap() {
            prop_assert!(line.debit.is_zero() != line.credit.is_zero());
            prop_assert!(line.debit >= Decimal::ZERO);
            prop_assert!(line.credit >= Decimal::ZERO);
        }
    }

    /// A reversal cancels the original movement on every account.
    #[test]
    fn reversal_cancels_original(lines in balanced_lines_strategy()) {
        let normalized = normalize_lines(&lines).unwrap();
        let items: Vec<ItemSnapshot> = normalized
            .iter()
            .map(|l| ItemSnapshot {
                account: l.account.clone(),
                debit: l.debit,
                credit: l.credit,
                cost_center: None,
                labels: vec![],
            })
            .collect();
        let mirrored = reversal_lines(&items);

        let mut net = std::collections::BTreeMap::<String, Decimal>::new();
        for l in normalized.iter().chain(&mirrored) {
            *net.entry(l.account.clone()).or_default() += l.debit - l.credit;
        }
        for (account, movement) in net {
            prop_assert_eq!(movement, Decimal::ZERO, "account {} did not cancel", account);
        }
    }

    /// Profit-share lines always balance exactly, for any base, including
    /// bases with sub-cent precision: the quantized shares plus the
    /// rounding-difference line close to the quantized base.
    #[test]
    fn profit_share_always_closes(base in amount_strategy()) {
        let lines = BusinessEvent::ProfitShare { base }.lines();
        let debit: Decimal = lines.iter().filter(|l| l.side == Side::Debit).map(|l| l.amount).sum();
        let credit: Decimal = lines.iter().filter(|l| l.side == Side::Credit).map(|l| l.amount).sum();
        prop_assert_eq!(debit, credit);
        let normalized = normalize_lines(&lines).unwrap();
        let (d, c) = totals(&normalized);
        prop_assert_eq!(d, c);
    }

    /// Rules are pure: the same event payload always yields the same lines.
    #[test]
    fn rules_are_deterministic(net in amount_strategy(), vat in amount_strategy()) {
        let event = BusinessEvent::SaleInvoicePosted { net, vat };
        prop_assert_eq!(event.lines(), event.lines());
    }
}
