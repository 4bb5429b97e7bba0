use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::ledger::AccountType;

use super::service::ReportService;
use super::types::ItemRow;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn row(
    number: &str,
    account_type: AccountType,
    entry_date: NaiveDate,
    debit: Decimal,
    credit: Decimal,
) -> ItemRow {
    ItemRow {
        account_number: number.to_string(),
        account_name: number.to_string(),
        account_type,
        entry_date,
        description: "test".to_string(),
        debit,
        credit,
    }
}

/// A posted sale invoice: 125.00 gross, 100.00 net, 25.00 VAT.
fn sale_rows(entry_date: NaiveDate) -> Vec<ItemRow> {
    vec![
        row("1200", AccountType::Asset, entry_date, dec!(125.00), Decimal::ZERO),
        row("7600", AccountType::Income, entry_date, Decimal::ZERO, dec!(100.00)),
        row("4700", AccountType::Liability, entry_date, Decimal::ZERO, dec!(25.00)),
    ]
}

fn reversal_rows(entry_date: NaiveDate) -> Vec<ItemRow> {
    vec![
        row("1200", AccountType::Asset, entry_date, Decimal::ZERO, dec!(125.00)),
        row("7600", AccountType::Income, entry_date, dec!(100.00), Decimal::ZERO),
        row("4700", AccountType::Liability, entry_date, dec!(25.00), Decimal::ZERO),
    ]
}

#[test]
fn trial_balance_groups_and_sorts_by_account_number() {
    let d = date(2026, 3, 10);
    let mut rows = sale_rows(d);
    rows.extend(sale_rows(d));

    let tb = ReportService::trial_balance(&rows, None, None, false);

    assert_eq!(tb.len(), 3);
    assert_eq!(tb[0].account_number, "1200");
    assert_eq!(tb[1].account_number, "4700");
    assert_eq!(tb[2].account_number, "7600");
    assert_eq!(tb[0].debit, dec!(250.00));
    assert_eq!(tb[0].balance, dec!(250.00));
    assert_eq!(tb[2].credit, dec!(200.00));
    assert_eq!(tb[2].balance, dec!(-200.00));
}

#[test]
fn trial_balance_omits_netted_accounts_by_default() {
    let d = date(2026, 3, 10);
    let mut rows = sale_rows(d);
    rows.extend(reversal_rows(d));

    let tb = ReportService::trial_balance(&rows, None, None, false);
    assert!(tb.is_empty());

    let tb_full = ReportService::trial_balance(&rows, None, None, true);
    assert_eq!(tb_full.len(), 3);
    assert!(tb_full.iter().all(|r| r.balance == Decimal::ZERO));
}

#[test]
fn trial_balance_respects_date_bounds() {
    let mut rows = sale_rows(date(2026, 2, 28));
    rows.extend(sale_rows(date(2026, 3, 10)));

    let tb = ReportService::trial_balance(
        &rows,
        Some(date(2026, 3, 1)),
        Some(date(2026, 3, 31)),
        false,
    );

    assert_eq!(tb[0].debit, dec!(125.00));
}

#[test]
fn aging_buckets_open_receivables_by_days_outstanding() {
    let as_of = date(2026, 6, 30);
    let rows = vec![
        // 10 days old, fully open
        row("1200", AccountType::Asset, date(2026, 6, 20), dec!(100.00), Decimal::ZERO),
        // 45 days old
        row("1200", AccountType::Asset, date(2026, 5, 16), dec!(50.00), Decimal::ZERO),
        // 100 days old
        row("1200", AccountType::Asset, date(2026, 3, 22), dec!(25.00), Decimal::ZERO),
        // settled receivable does not contribute
        row("1200", AccountType::Asset, date(2026, 6, 20), Decimal::ZERO, dec!(100.00)),
        // payable, 70 days old
        row("2200", AccountType::Liability, date(2026, 4, 21), Decimal::ZERO, dec!(40.00)),
    ];

    let report = ReportService::ar_ap_aging(&rows, as_of);

    assert_eq!(report.ar.d0_30, dec!(100.00));
    assert_eq!(report.ar.d31_60, dec!(50.00));
    assert_eq!(report.ar.over_90, dec!(25.00));
    assert_eq!(report.ar.total(), dec!(175.00));
    assert_eq!(report.ap.d61_90, dec!(40.00));
    assert_eq!(report.ap.total(), dec!(40.00));
}

#[test]
fn aging_ignores_non_ar_ap_accounts() {
    let as_of = date(2026, 6, 30);
    let rows = vec![row(
        "1000",
        AccountType::Asset,
        date(2026, 6, 1),
        dec!(500.00),
        Decimal::ZERO,
    )];

    let report = ReportService::ar_ap_aging(&rows, as_of);
    assert_eq!(report.ar.total(), Decimal::ZERO);
    assert_eq!(report.ap.total(), Decimal::ZERO);
}

#[test]
fn pnl_light_sums_income_and_expense_only() {
    let d = date(2026, 3, 10);
    let mut rows = sale_rows(d);
    rows.push(row("4000", AccountType::Expense, d, dec!(30.00), Decimal::ZERO));

    let pnl = ReportService::pnl_light(&rows);

    assert_eq!(pnl.revenue, dec!(100.00));
    assert_eq!(pnl.expense, dec!(30.00));
    assert_eq!(pnl.profit, dec!(70.00));
}

#[test]
fn balance_sheet_light_sums_assets_and_liabilities() {
    let d = date(2026, 3, 10);
    let rows = sale_rows(d);

    let bs = ReportService::balance_sheet_light(&rows);

    assert_eq!(bs.assets, dec!(125.00));
    assert_eq!(bs.liabilities, dec!(25.00));
    assert_eq!(bs.equity, dec!(100.00));
}

#[test]
fn account_ledger_tracks_running_balance_in_normal_sign() {
    let rows = vec![
        row("1200", AccountType::Asset, date(2026, 3, 5), dec!(125.00), Decimal::ZERO),
        row("1200", AccountType::Asset, date(2026, 3, 20), Decimal::ZERO, dec!(100.00)),
        row("7600", AccountType::Income, date(2026, 3, 5), Decimal::ZERO, dec!(100.00)),
    ];

    let ledger =
        ReportService::account_ledger(&rows, "1200", AccountType::Asset, None, None);

    assert_eq!(ledger.opening_balance, Decimal::ZERO);
    assert_eq!(ledger.lines.len(), 2);
    assert_eq!(ledger.lines[0].balance, dec!(125.00));
    assert_eq!(ledger.lines[1].balance, dec!(25.00));
    assert_eq!(ledger.closing_balance, dec!(25.00));
}

#[test]
fn account_ledger_folds_prior_rows_into_opening_balance() {
    let rows = vec![
        row("1200", AccountType::Asset, date(2026, 2, 15), dec!(200.00), Decimal::ZERO),
        row("1200", AccountType::Asset, date(2026, 3, 5), Decimal::ZERO, dec!(50.00)),
        row("1200", AccountType::Asset, date(2026, 4, 1), dec!(10.00), Decimal::ZERO),
    ];

    let ledger = ReportService::account_ledger(
        &rows,
        "1200",
        AccountType::Asset,
        Some(date(2026, 3, 1)),
        Some(date(2026, 3, 31)),
    );

    assert_eq!(ledger.opening_balance, dec!(200.00));
    assert_eq!(ledger.lines.len(), 1);
    assert_eq!(ledger.closing_balance, dec!(150.00));
}

#[test]
fn account_ledger_credit_normal_grows_with_credits() {
    let rows = vec![
        row("7600", AccountType::Income, date(2026, 3, 5), Decimal::ZERO, dec!(100.00)),
        row("7600", AccountType::Income, date(2026, 3, 6), Decimal::ZERO, dec!(40.00)),
    ];

    let ledger =
        ReportService::account_ledger(&rows, "7600", AccountType::Income, None, None);

    assert_eq!(ledger.closing_balance, dec!(140.00));
}
