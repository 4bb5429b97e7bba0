//! Account domain types and the balance sign convention.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use folio_shared::types::{AccountId, TenantId};

/// High-level account kind (determines normal balance side).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Asset account (debit-normal).
    Asset,
    /// Liability account (credit-normal).
    Liability,
    /// Income account (credit-normal).
    Income,
    /// Expense account (debit-normal).
    Expense,
}

impl AccountType {
    /// Returns true if the account balance increases on debit.
    #[must_use]
    pub const fn is_debit_normal(self) -> bool {
        matches!(self, Self::Asset | Self::Expense)
    }

    /// Calculates the signed balance contribution of a debit/credit pair.
    ///
    /// Asset/expense accounts grow with debits; liability/income accounts
    /// grow with credits.
    #[must_use]
    pub fn balance_of(self, debit: Decimal, credit: Decimal) -> Decimal {
        if self.is_debit_normal() {
            debit - credit
        } else {
            credit - debit
        }
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Asset => "asset",
            Self::Liability => "liability",
            Self::Income => "income",
            Self::Expense => "expense",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for AccountType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asset" => Ok(Self::Asset),
            "liability" => Ok(Self::Liability),
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(format!("Unknown account type: {s}")),
        }
    }
}

/// A chart-of-accounts entry.
///
/// Accounts are created by chart loaders and are immutable once referenced
/// by posted journal items; renumbering is not supported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier.
    pub id: AccountId,
    /// Tenant this account belongs to.
    pub tenant_id: TenantId,
    /// Account number, unique within the tenant (e.g. "1200").
    pub number: String,
    /// Human-readable name (e.g. "Accounts receivable").
    pub name: String,
    /// Account kind.
    pub account_type: AccountType,
    /// Optional parent account for hierarchy (no cycles).
    pub parent_id: Option<AccountId>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;
    use std::str::FromStr;

    #[rstest]
    #[case(AccountType::Asset, true)]
    #[case(AccountType::Expense, true)]
    #[case(AccountType::Liability, false)]
    #[case(AccountType::Income, false)]
    fn normal_side_by_type(#[case] account_type: AccountType, #[case] debit_normal: bool) {
        assert_eq!(account_type.is_debit_normal(), debit_normal);
    }

    #[test]
    fn balance_sign_convention() {
        // Asset grows with debit
        assert_eq!(
            AccountType::Asset.balance_of(dec!(100), dec!(30)),
            dec!(70)
        );
        // Income grows with credit
        assert_eq!(
            AccountType::Income.balance_of(dec!(30), dec!(100)),
            dec!(70)
        );
        // Liability shrinks with debit
        assert_eq!(
            AccountType::Liability.balance_of(dec!(100), dec!(0)),
            dec!(-100)
        );
    }

    #[test]
    fn account_type_round_trips_through_string() {
        for t in [
            AccountType::Asset,
            AccountType::Liability,
            AccountType::Income,
            AccountType::Expense,
        ] {
            assert_eq!(AccountType::from_str(&t.to_string()).unwrap(), t);
        }
        assert!(AccountType::from_str("equity-ish").is_err());
    }
}
