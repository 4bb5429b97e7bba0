//! `SeaORM` entity definitions for the ledger schema.

pub mod accounts;
pub mod journal_entries;
pub mod journal_items;
pub mod period_locks;
pub mod posted_references;
pub mod sea_orm_active_enums;
