//! Line normalization and balance validation.
//!
//! Everything here runs before any write: a rejected post never touches
//! storage.

use rust_decimal::Decimal;

use folio_shared::types::quantize;

use super::error::LedgerError;
use super::types::{NormalizedLine, RuleLine, Side};

/// Normalizes raw rule lines into persistable journal lines.
///
/// - quantizes every amount half-up to 2 decimal places
/// - rejects negative amounts with [`LedgerError::InvalidAmount`]
/// - drops lines that quantize to zero
/// - rejects the whole set with [`LedgerError::EmptyPost`] when nothing
///   nonzero remains
/// - rejects with [`LedgerError::Unbalanced`] when debit and credit
///   totals differ
///
/// # Errors
///
/// Returns an error if any invariant above is violated.
pub fn normalize_lines(lines: &[RuleLine]) -> Result<Vec<NormalizedLine>, LedgerError> {
    if lines.is_empty() {
        return Err(LedgerError::EmptyPost);
    }

    let mut normalized = Vec::with_capacity(lines.len());

    for line in lines {
        let amount = quantize(line.amount);
        if amount < Decimal::ZERO {
            return Err(LedgerError::InvalidAmount(line.amount));
        }
        if amount.is_zero() {
            continue;
        }

        let (debit, credit) = match line.side {
            Side::Debit => (amount, Decimal::ZERO),
            Side::Credit => (Decimal::ZERO, amount),
        };
        normalized.push(NormalizedLine {
            account: line.account.clone(),
            debit,
            credit,
            cost_center: None,
            labels: Vec::new(),
        });
    }

    if normalized.is_empty() {
        return Err(LedgerError::EmptyPost);
    }

    let (debit, credit) = totals(&normalized);
    if debit != credit {
        return Err(LedgerError::Unbalanced { debit, credit });
    }

    Ok(normalized)
}

/// Sums debit and credit totals over normalized lines.
#[must_use]
pub fn totals(lines: &[NormalizedLine]) -> (Decimal, Decimal) {
    let debit = lines.iter().map(|l| l.debit).sum();
    let credit = lines.iter().map(|l| l.credit).sum();
    (debit, credit)
}
