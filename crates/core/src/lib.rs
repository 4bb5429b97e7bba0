//! Core business logic for the Folio ledger engine.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, posting rules, validation, and report aggregation live here.
//!
//! # Modules
//!
//! - `ledger` - Double-entry bookkeeping: accounts, events, posting rules, validation, reversal
//! - `fiscal` - Accounting period keys and lock semantics
//! - `reports` - Trial balance, aging, P&L and balance sheet aggregation

pub mod fiscal;
pub mod ledger;
pub mod reports;
