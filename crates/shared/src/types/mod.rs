//! Common value types shared across crates.

pub mod id;
pub mod money;

pub use id::{AccountId, JournalEntryId, JournalItemId, TenantId};
pub use money::{quantize, MONEY_SCALE};
