//! Ledger domain types for posting and validation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Side of a journal line: either Debit or Credit.
///
/// In double-entry bookkeeping:
/// - Debits increase asset/expense accounts, decrease liability/income accounts
/// - Credits decrease asset/expense accounts, increase liability/income accounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Debit line.
    Debit,
    /// Credit line.
    Credit,
}

impl Side {
    /// Returns the opposite side.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Debit => Self::Credit,
            Self::Credit => Self::Debit,
        }
    }
}

/// A raw posting line produced by an event rule.
///
/// The amount is not yet quantized; normalization happens in
/// [`crate::ledger::validation::normalize_lines`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleLine {
    /// Account number within the tenant's chart of accounts.
    pub account: String,
    /// Whether this line debits or credits the account.
    pub side: Side,
    /// Positive amount; zero lines are dropped during normalization.
    pub amount: Decimal,
}

impl RuleLine {
    /// Creates a debit line against the given account.
    #[must_use]
    pub fn debit(account: &str, amount: Decimal) -> Self {
        Self {
            account: account.to_string(),
            side: Side::Debit,
            amount,
        }
    }

    /// Creates a credit line against the given account.
    #[must_use]
    pub fn credit(account: &str, amount: Decimal) -> Self {
        Self {
            account: account.to_string(),
            side: Side::Credit,
            amount,
        }
    }
}

/// A validated, quantized journal line ready for persistence.
///
/// Exactly one of `debit` and `credit` is nonzero; both are non-negative
/// and quantized to two decimal places.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedLine {
    /// Account number within the tenant's chart of accounts.
    pub account: String,
    /// Debit amount (zero when this is a credit line).
    pub debit: Decimal,
    /// Credit amount (zero when this is a debit line).
    pub credit: Decimal,
    /// Optional cost center carried onto the journal item.
    pub cost_center: Option<String>,
    /// Free-form labels carried onto the journal item.
    pub labels: Vec<String>,
}

impl NormalizedLine {
    /// Returns the signed movement (debit positive, credit negative).
    #[must_use]
    pub fn signed_amount(&self) -> Decimal {
        self.debit - self.credit
    }
}
