//! Financial report aggregation.
//!
//! Pure aggregation over journal item rows fetched by the repository
//! layer:
//! - Trial balance
//! - AR/AP aging
//! - Light P&L and balance sheet
//! - Per-account ledger with running balance

pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use service::ReportService;
pub use types::{
    AccountLedger, AgingBuckets, AgingReport, BalanceSheetLight, ItemRow, LedgerLine, PnlLight,
    TrialBalanceRow,
};
