//! Period keys and period locks.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use folio_shared::types::TenantId;

use crate::ledger::LedgerError;

/// A calendar month within a tenant's books, the unit of period locking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PeriodKey {
    /// Calendar year.
    pub year: i32,
    /// Calendar month (1-12).
    pub month: u32,
}

impl PeriodKey {
    /// Creates a period key, validating the month.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidPeriod`] for months outside 1..=12.
    pub fn new(year: i32, month: u32) -> Result<Self, LedgerError> {
        if !(1..=12).contains(&month) {
            return Err(LedgerError::InvalidPeriod(month));
        }
        Ok(Self { year, month })
    }

    /// The period a date falls into.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Returns true if the given date falls inside this period.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl std::fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// An administrative lock on a tenant's accounting month.
///
/// Its presence means no new entry may be dated inside the period.
/// Created by an explicit close, removed by an explicit reopen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodLock {
    /// Tenant whose books are locked.
    pub tenant_id: TenantId,
    /// The locked period.
    pub period: PeriodKey,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_months() {
        assert!(matches!(
            PeriodKey::new(2025, 0),
            Err(LedgerError::InvalidPeriod(0))
        ));
        assert!(matches!(
            PeriodKey::new(2025, 13),
            Err(LedgerError::InvalidPeriod(13))
        ));
        assert!(PeriodKey::new(2025, 12).is_ok());
    }

    #[test]
    fn from_date_and_contains() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let period = PeriodKey::from_date(date);
        assert_eq!(period, PeriodKey { year: 2025, month: 1 });
        assert!(period.contains(date));
        assert!(!period.contains(NaiveDate::from_ymd_opt(2025, 2, 1).unwrap()));
    }

    #[test]
    fn displays_as_year_month() {
        assert_eq!(PeriodKey { year: 2025, month: 3 }.to_string(), "2025-03");
    }
}
