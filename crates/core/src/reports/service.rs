//! Report aggregation service.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::ledger::AccountType;

use super::types::{
    AccountLedger, AgingReport, BalanceSheetLight, ItemRow, LedgerLine, PnlLight, TrialBalanceRow,
};

/// Account-number prefix identifying accounts receivable.
const AR_PREFIX: &str = "12";
/// Account-number prefix identifying accounts payable.
const AP_PREFIX: &str = "22";

/// Service for aggregating journal item rows into reports.
///
/// All methods are pure; tenant scoping and date bounding of the input
/// rows is the repository's job, though `trial_balance` and
/// `account_ledger` re-apply date bounds so callers can pass a superset.
pub struct ReportService;

impl ReportService {
    /// Per-account debit/credit totals, sorted by account number.
    ///
    /// Accounts whose debits equal their credits are omitted unless
    /// `show_netted` is set, keeping the default view to accounts with an
    /// open balance. `balance` is always `debit - credit`.
    #[must_use]
    pub fn trial_balance(
        rows: &[ItemRow],
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        show_netted: bool,
    ) -> Vec<TrialBalanceRow> {
        let mut by_account: BTreeMap<String, TrialBalanceRow> = BTreeMap::new();

        for row in Self::bounded(rows, start, end) {
            let acc = by_account
                .entry(row.account_number.clone())
                .or_insert_with(|| TrialBalanceRow {
                    account_number: row.account_number.clone(),
                    account_name: row.account_name.clone(),
                    account_type: row.account_type,
                    debit: Decimal::ZERO,
                    credit: Decimal::ZERO,
                    balance: Decimal::ZERO,
                });
            acc.debit += row.debit;
            acc.credit += row.credit;
            acc.balance = acc.debit - acc.credit;
        }

        by_account
            .into_values()
            .filter(|r| show_netted || r.debit != r.credit)
            .collect()
    }

    /// Buckets open AR/AP postings by age relative to `as_of`.
    ///
    /// AR accounts are those numbered `12…`, AP accounts `22…`; only
    /// positive open amounts contribute (AR: debit-credit, AP:
    /// credit-debit).
    #[must_use]
    pub fn ar_ap_aging(rows: &[ItemRow], as_of: NaiveDate) -> AgingReport {
        let mut report = AgingReport::default();

        for row in rows {
            let days = (as_of - row.entry_date).num_days();
            if row.account_number.starts_with(AR_PREFIX) {
                let open = row.debit - row.credit;
                if open > Decimal::ZERO {
                    report.ar.add(days, open);
                }
            } else if row.account_number.starts_with(AP_PREFIX) {
                let open = row.credit - row.debit;
                if open > Decimal::ZERO {
                    report.ap.add(days, open);
                }
            }
        }

        report
    }

    /// Sums income and expense accounts into a light P&L.
    #[must_use]
    pub fn pnl_light(rows: &[ItemRow]) -> PnlLight {
        let mut revenue = Decimal::ZERO;
        let mut expense = Decimal::ZERO;

        for row in rows {
            match row.account_type {
                AccountType::Income => revenue += row.credit - row.debit,
                AccountType::Expense => expense += row.debit - row.credit,
                AccountType::Asset | AccountType::Liability => {}
            }
        }

        PnlLight {
            revenue,
            expense,
            profit: revenue - expense,
        }
    }

    /// Sums asset and liability accounts into a light balance sheet.
    #[must_use]
    pub fn balance_sheet_light(rows: &[ItemRow]) -> BalanceSheetLight {
        let mut assets = Decimal::ZERO;
        let mut liabilities = Decimal::ZERO;

        for row in rows {
            match row.account_type {
                AccountType::Asset => assets += row.debit - row.credit,
                AccountType::Liability => liabilities += row.credit - row.debit,
                AccountType::Income | AccountType::Expense => {}
            }
        }

        BalanceSheetLight {
            assets,
            liabilities,
            equity: assets - liabilities,
        }
    }

    /// Running ledger for a single account.
    ///
    /// Rows dated before `start` form the opening balance; lines carry a
    /// running balance in the account's normal sign (debit-normal grows
    /// with debits, credit-normal with credits).
    #[must_use]
    pub fn account_ledger(
        rows: &[ItemRow],
        account_number: &str,
        account_type: AccountType,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> AccountLedger {
        let mut opening = Decimal::ZERO;
        let mut in_range: Vec<&ItemRow> = Vec::new();

        for row in rows.iter().filter(|r| r.account_number == account_number) {
            if start.is_some_and(|s| row.entry_date < s) {
                opening += account_type.balance_of(row.debit, row.credit);
                continue;
            }
            if end.is_some_and(|e| row.entry_date > e) {
                continue;
            }
            in_range.push(row);
        }
        in_range.sort_by_key(|r| r.entry_date);

        let mut running = opening;
        let lines = in_range
            .into_iter()
            .map(|row| {
                running += account_type.balance_of(row.debit, row.credit);
                LedgerLine {
                    date: row.entry_date,
                    description: row.description.clone(),
                    debit: row.debit,
                    credit: row.credit,
                    balance: running,
                }
            })
            .collect();

        AccountLedger {
            account_number: account_number.to_string(),
            account_type,
            opening_balance: opening,
            lines,
            closing_balance: running,
        }
    }

    fn bounded<'a>(
        rows: &'a [ItemRow],
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> impl Iterator<Item = &'a ItemRow> {
        rows.iter().filter(move |r| {
            start.is_none_or(|s| r.entry_date >= s) && end.is_none_or(|e| r.entry_date <= e)
        })
    }
}
