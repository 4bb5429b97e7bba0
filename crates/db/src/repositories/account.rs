//! Account repository for chart-of-accounts database operations.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use folio_core::ledger::{events, Account, AccountType, LedgerError};
use folio_shared::types::{AccountId, TenantId};

use crate::entities::accounts;

use super::map_db;

/// Input for creating an account.
#[derive(Debug, Clone)]
pub struct CreateAccountInput {
    /// Owning tenant.
    pub tenant_id: TenantId,
    /// Account number within the tenant's chart.
    pub number: String,
    /// Display name.
    pub name: String,
    /// Account classification.
    pub account_type: AccountType,
    /// Optional parent account.
    pub parent_id: Option<Uuid>,
}

/// Minimal chart of accounts used by the built-in posting rules.
const DEFAULT_CHART: &[(&str, &str, AccountType)] = &[
    (events::ACCT_BANK, "Bank", AccountType::Asset),
    (events::ACCT_AR, "Accounts receivable", AccountType::Asset),
    (events::ACCT_VAT_RECEIVABLE, "VAT receivable", AccountType::Asset),
    (events::ACCT_AP, "Accounts payable / advances", AccountType::Liability),
    (events::ACCT_PROFIT_COMPANY, "Profit share - company", AccountType::Liability),
    (events::ACCT_PROFIT_WORKERS, "Profit share - workers", AccountType::Liability),
    (events::ACCT_IC_GOODS, "Intracommunity goods", AccountType::Asset),
    (events::ACCT_EXPENSE, "Materials and services", AccountType::Expense),
    (events::ACCT_VAT_PAYABLE, "VAT payable", AccountType::Liability),
    (events::ACCT_ROUNDING, "Rounding differences", AccountType::Expense),
    (events::ACCT_PROFIT_BASE, "Profit distribution base", AccountType::Expense),
    (events::ACCT_REVENUE, "Sales revenue", AccountType::Income),
    (events::ACCT_PROFIT_OWNER, "Profit share - owner", AccountType::Liability),
];

/// Repository for chart-of-accounts operations.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    db: DatabaseConnection,
}

impl AccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an account in the tenant's chart.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails, including when the
    /// `(tenant_id, number)` pair already exists.
    pub async fn create(&self, input: CreateAccountInput) -> Result<Account, LedgerError> {
        let now = Utc::now().into();

        let account = accounts::ActiveModel {
            id: Set(AccountId::new().into_inner()),
            tenant_id: Set(input.tenant_id.into_inner()),
            number: Set(input.number),
            name: Set(input.name),
            account_type: Set(input.account_type.into()),
            parent_id: Set(input.parent_id),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = account.insert(&self.db).await.map_err(map_db)?;
        Ok(model.into())
    }

    /// Finds an account by number within a tenant's chart.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::UnknownAccount`] if no such account exists.
    pub async fn find_by_number(
        &self,
        tenant_id: TenantId,
        number: &str,
    ) -> Result<Account, LedgerError> {
        let model = accounts::Entity::find()
            .filter(accounts::Column::TenantId.eq(tenant_id.into_inner()))
            .filter(accounts::Column::Number.eq(number))
            .one(&self.db)
            .await
            .map_err(map_db)?
            .ok_or_else(|| LedgerError::UnknownAccount {
                number: number.to_string(),
            })?;
        Ok(model.into())
    }

    /// Lists a tenant's chart ordered by account number.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list(&self, tenant_id: TenantId) -> Result<Vec<Account>, LedgerError> {
        let models = accounts::Entity::find()
            .filter(accounts::Column::TenantId.eq(tenant_id.into_inner()))
            .order_by_asc(accounts::Column::Number)
            .all(&self.db)
            .await
            .map_err(map_db)?;
        Ok(models.into_iter().map(Account::from).collect())
    }

    /// Seeds the minimal chart the built-in posting rules target.
    ///
    /// Existing accounts are left untouched; only missing numbers are
    /// created. Returns the number of accounts created.
    ///
    /// # Errors
    ///
    /// Returns an error if a lookup or insert fails.
    pub async fn seed_default_chart(&self, tenant_id: TenantId) -> Result<usize, LedgerError> {
        let mut created = 0;

        for &(number, name, account_type) in DEFAULT_CHART {
            let existing = accounts::Entity::find()
                .filter(accounts::Column::TenantId.eq(tenant_id.into_inner()))
                .filter(accounts::Column::Number.eq(number))
                .one(&self.db)
                .await
                .map_err(map_db)?;

            if existing.is_none() {
                self.create(CreateAccountInput {
                    tenant_id,
                    number: number.to_string(),
                    name: name.to_string(),
                    account_type,
                    parent_id: None,
                })
                .await?;
                created += 1;
            }
        }

        tracing::info!(tenant = %tenant_id, created, "seeded default chart of accounts");
        Ok(created)
    }
}
