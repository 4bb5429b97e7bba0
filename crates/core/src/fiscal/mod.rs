//! Accounting period keys and lock semantics.

pub mod period;

pub use period::{PeriodKey, PeriodLock};
