//! Ledger error types for validation and state errors.

use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during ledger operations.
///
/// All validation errors are raised before any write; a rejected post
/// leaves zero rows behind. The only silently handled condition is the
/// idempotency-index race, which is reconciled by re-reading the winning
/// entry and never surfaces as an error.
#[derive(Debug, Error)]
pub enum LedgerError {
    // ========== Validation Errors ==========
    /// Entry is not balanced (debits != credits after normalization).
    #[error("Entry is not balanced. Debit: {debit}, Credit: {credit}")]
    Unbalanced {
        /// Total debit amount.
        debit: Decimal,
        /// Total credit amount.
        credit: Decimal,
    },

    /// Posting produced no nonzero lines.
    #[error("Posting produced no nonzero lines")]
    EmptyPost,

    /// Line amount is negative or malformed.
    #[error("Invalid line amount: {0}")]
    InvalidAmount(Decimal),

    // ========== Account Errors ==========
    /// Referenced account does not exist for the tenant.
    #[error("Unknown account {number} for tenant")]
    UnknownAccount {
        /// The unresolved account number.
        number: String,
    },

    // ========== Period Errors ==========
    /// Target date falls inside a closed period.
    #[error("Period {year:04}-{month:02} is closed. Use reversal.")]
    PeriodLocked {
        /// Calendar year of the locked period.
        year: i32,
        /// Calendar month (1-12) of the locked period.
        month: u32,
    },

    /// Period is already locked.
    #[error("Period {year:04}-{month:02} is already locked")]
    AlreadyLocked {
        /// Calendar year.
        year: i32,
        /// Calendar month (1-12).
        month: u32,
    },

    /// Period is not locked.
    #[error("Period {year:04}-{month:02} is not locked")]
    NotLocked {
        /// Calendar year.
        year: i32,
        /// Calendar month (1-12).
        month: u32,
    },

    /// Month outside 1..=12.
    #[error("Invalid month: {0}")]
    InvalidPeriod(u32),

    // ========== State Errors ==========
    /// Reversal attempted across the tenant boundary.
    #[error("Entry belongs to a different tenant")]
    TenantMismatch,

    /// Journal entry not found.
    #[error("Journal entry not found: {0}")]
    EntryNotFound(Uuid),

    /// Attempt to mutate a locked entry or an existing item.
    #[error("Posted entries are immutable")]
    ImmutableWrite,

    // ========== Database Errors ==========
    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Unbalanced { .. } => "UNBALANCED_ENTRY",
            Self::EmptyPost => "EMPTY_POST",
            Self::InvalidAmount(_) => "INVALID_AMOUNT",
            Self::UnknownAccount { .. } => "UNKNOWN_ACCOUNT",
            Self::PeriodLocked { .. } => "PERIOD_LOCKED",
            Self::AlreadyLocked { .. } => "ALREADY_LOCKED",
            Self::NotLocked { .. } => "NOT_LOCKED",
            Self::InvalidPeriod(_) => "INVALID_PERIOD",
            Self::TenantMismatch => "TENANT_MISMATCH",
            Self::EntryNotFound(_) => "ENTRY_NOT_FOUND",
            Self::ImmutableWrite => "IMMUTABLE_WRITE",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - validation errors
            Self::Unbalanced { .. }
            | Self::EmptyPost
            | Self::InvalidAmount(_)
            | Self::InvalidPeriod(_) => 400,

            // 403 Forbidden - guard violations
            Self::TenantMismatch => 403,

            // 404 Not Found
            Self::UnknownAccount { .. } | Self::EntryNotFound(_) => 404,

            // 409 Conflict - state conflicts
            Self::PeriodLocked { .. }
            | Self::AlreadyLocked { .. }
            | Self::NotLocked { .. }
            | Self::ImmutableWrite => 409,

            // 500 Internal Server Error
            Self::Database(_) => 500,
        }
    }
}

impl From<LedgerError> for folio_shared::AppError {
    fn from(err: LedgerError) -> Self {
        let message = err.to_string();
        match err {
            LedgerError::Unbalanced { .. }
            | LedgerError::EmptyPost
            | LedgerError::InvalidAmount(_)
            | LedgerError::InvalidPeriod(_) => Self::Validation(message),

            LedgerError::UnknownAccount { .. } | LedgerError::EntryNotFound(_) => {
                Self::NotFound(message)
            }

            LedgerError::PeriodLocked { .. }
            | LedgerError::AlreadyLocked { .. }
            | LedgerError::NotLocked { .. } => Self::Conflict(message),

            LedgerError::TenantMismatch | LedgerError::ImmutableWrite => {
                Self::BusinessRule(message)
            }

            LedgerError::Database(_) => Self::Database(message),
        }
    }
}
