//! Database-mapped enums.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Account classification, stored as the `account_type` Postgres enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "account_type")]
pub enum AccountType {
    /// Debit-normal balance account.
    #[sea_orm(string_value = "asset")]
    Asset,
    /// Credit-normal balance account.
    #[sea_orm(string_value = "liability")]
    Liability,
    /// Credit-normal result account.
    #[sea_orm(string_value = "income")]
    Income,
    /// Debit-normal result account.
    #[sea_orm(string_value = "expense")]
    Expense,
}

impl From<AccountType> for folio_core::ledger::AccountType {
    fn from(value: AccountType) -> Self {
        match value {
            AccountType::Asset => Self::Asset,
            AccountType::Liability => Self::Liability,
            AccountType::Income => Self::Income,
            AccountType::Expense => Self::Expense,
        }
    }
}

impl From<folio_core::ledger::AccountType> for AccountType {
    fn from(value: folio_core::ledger::AccountType) -> Self {
        match value {
            folio_core::ledger::AccountType::Asset => Self::Asset,
            folio_core::ledger::AccountType::Liability => Self::Liability,
            folio_core::ledger::AccountType::Income => Self::Income,
            folio_core::ledger::AccountType::Expense => Self::Expense,
        }
    }
}
