//! Reversal line construction.
//!
//! A reversal mirrors every item of a posted entry (debit becomes credit
//! and vice versa) while preserving cost-center and label metadata, so the
//! net movement of original plus reversal is zero on every account.

use rust_decimal::Decimal;

use super::types::NormalizedLine;

/// The parts of a persisted journal item a reversal needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSnapshot {
    /// Account number the item was posted against.
    pub account: String,
    /// Debit amount (zero for credit items).
    pub debit: Decimal,
    /// Credit amount (zero for debit items).
    pub credit: Decimal,
    /// Cost center carried over unchanged.
    pub cost_center: Option<String>,
    /// Labels carried over unchanged.
    pub labels: Vec<String>,
}

/// Builds mirror lines for a reversal entry.
///
/// Each original debit becomes a credit of the same amount and vice
/// versa; metadata is preserved.
#[must_use]
pub fn reversal_lines(items: &[ItemSnapshot]) -> Vec<NormalizedLine> {
    items
        .iter()
        .map(|item| NormalizedLine {
            account: item.account.clone(),
            debit: item.credit,
            credit: item.debit,
            cost_center: item.cost_center.clone(),
            labels: item.labels.clone(),
        })
        .collect()
}

/// Description for a reversal entry.
#[must_use]
pub fn reversal_description(original_description: &str) -> String {
    format!("Reversal of: {original_description}")
}
