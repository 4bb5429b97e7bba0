//! Double-entry bookkeeping logic.
//!
//! This module implements the core ledger functionality:
//! - Account types and the balance sign convention
//! - Business events and their posting rules (the event rule registry)
//! - Line normalization and balance validation
//! - Reversal line construction
//! - Error types for ledger operations

pub mod account;
pub mod error;
pub mod events;
pub mod reversal;
pub mod types;
pub mod validation;

#[cfg(test)]
mod validation_props;

pub use account::{Account, AccountType};
pub use error::LedgerError;
pub use events::BusinessEvent;
pub use reversal::{reversal_description, reversal_lines, ItemSnapshot};
pub use types::{NormalizedLine, RuleLine, Side};
pub use validation::{normalize_lines, totals};
