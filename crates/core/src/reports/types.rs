//! Report data types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::AccountType;

/// One journal item row as fetched for reporting.
///
/// This is the raw material every report aggregates; the repository layer
/// is responsible for tenant scoping before rows reach a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRow {
    /// Account number the item was posted against.
    pub account_number: String,
    /// Account name.
    pub account_name: String,
    /// Account kind.
    pub account_type: AccountType,
    /// Date of the owning journal entry.
    pub entry_date: NaiveDate,
    /// Description of the owning journal entry.
    pub description: String,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
}

/// One trial balance row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialBalanceRow {
    /// Account number.
    pub account_number: String,
    /// Account name.
    pub account_name: String,
    /// Account kind.
    pub account_type: AccountType,
    /// Sum of debits over the period.
    pub debit: Decimal,
    /// Sum of credits over the period.
    pub credit: Decimal,
    /// `debit - credit`, regardless of account type; sign interpretation
    /// is the caller's responsibility.
    pub balance: Decimal,
}

/// Open amounts bucketed by age in days.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgingBuckets {
    /// 0-30 days.
    pub d0_30: Decimal,
    /// 31-60 days.
    pub d31_60: Decimal,
    /// 61-90 days.
    pub d61_90: Decimal,
    /// More than 90 days.
    pub over_90: Decimal,
}

impl AgingBuckets {
    /// Adds an amount to the bucket for the given age.
    pub fn add(&mut self, days: i64, amount: Decimal) {
        if days <= 30 {
            self.d0_30 += amount;
        } else if days <= 60 {
            self.d31_60 += amount;
        } else if days <= 90 {
            self.d61_90 += amount;
        } else {
            self.over_90 += amount;
        }
    }

    /// Total over all buckets.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.d0_30 + self.d31_60 + self.d61_90 + self.over_90
    }
}

/// AR/AP aging report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgingReport {
    /// Open accounts-receivable amounts by age.
    pub ar: AgingBuckets,
    /// Open accounts-payable amounts by age.
    pub ap: AgingBuckets,
}

/// Light profit-and-loss summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PnlLight {
    /// Income-account total (credit - debit).
    pub revenue: Decimal,
    /// Expense-account total (debit - credit).
    pub expense: Decimal,
    /// `revenue - expense`.
    pub profit: Decimal,
}

/// Light balance-sheet summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSheetLight {
    /// Asset-account total (debit - credit).
    pub assets: Decimal,
    /// Liability-account total (credit - debit).
    pub liabilities: Decimal,
    /// `assets - liabilities`.
    pub equity: Decimal,
}

/// One line of a per-account ledger, with running balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerLine {
    /// Entry date.
    pub date: NaiveDate,
    /// Entry description.
    pub description: String,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
    /// Balance after this line, in the account's normal sign.
    pub balance: Decimal,
}

/// Per-account ledger with opening and closing balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountLedger {
    /// Account number.
    pub account_number: String,
    /// Account kind.
    pub account_type: AccountType,
    /// Balance as of the day before the requested start (zero when
    /// unbounded).
    pub opening_balance: Decimal,
    /// Dated lines with running balance.
    pub lines: Vec<LedgerLine>,
    /// Balance after the last line.
    pub closing_balance: Decimal,
}
