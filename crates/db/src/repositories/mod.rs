//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod account;
pub mod journal;
pub mod period;
pub mod report;

pub use account::{AccountRepository, CreateAccountInput};
pub use journal::{JournalRepository, PostInput, PostedEntry};
pub use period::PeriodRepository;
pub use report::ReportRepository;

use folio_core::ledger::LedgerError;
use sea_orm::DbErr;

/// Maps a driver error into the ledger error taxonomy.
pub(crate) fn map_db(err: DbErr) -> LedgerError {
    LedgerError::Database(err.to_string())
}
