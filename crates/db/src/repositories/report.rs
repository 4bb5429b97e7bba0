//! Report repository: joins journal rows and feeds the aggregation service.
//!
//! Queries return flat [`ItemRow`] sets scoped to one tenant; all report
//! arithmetic happens in [`ReportService`], which keeps it testable
//! without a database.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait,
};

use folio_core::ledger::LedgerError;
use folio_core::reports::{
    AccountLedger, AgingReport, BalanceSheetLight, ItemRow, PnlLight, ReportService,
    TrialBalanceRow,
};
use folio_shared::types::TenantId;

use crate::entities::{accounts, journal_entries, journal_items, sea_orm_active_enums};

use super::map_db;

#[derive(Debug, FromQueryResult)]
struct RawItemRow {
    account_number: String,
    account_name: String,
    account_type: sea_orm_active_enums::AccountType,
    entry_date: NaiveDate,
    description: String,
    debit: Decimal,
    credit: Decimal,
}

impl From<RawItemRow> for ItemRow {
    fn from(raw: RawItemRow) -> Self {
        Self {
            account_number: raw.account_number,
            account_name: raw.account_name,
            account_type: raw.account_type.into(),
            entry_date: raw.entry_date,
            description: raw.description,
            debit: raw.debit,
            credit: raw.credit,
        }
    }
}

/// Repository for ledger report queries.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    db: DatabaseConnection,
}

impl ReportRepository {
    /// Creates a new report repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Fetches the tenant's journal item rows, optionally date-bounded.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn fetch_item_rows(
        &self,
        tenant_id: TenantId,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<ItemRow>, LedgerError> {
        let mut query = journal_items::Entity::find()
            .join(
                JoinType::InnerJoin,
                journal_items::Relation::JournalEntries.def(),
            )
            .join(JoinType::InnerJoin, journal_items::Relation::Accounts.def())
            .select_only()
            .column_as(accounts::Column::Number, "account_number")
            .column_as(accounts::Column::Name, "account_name")
            .column_as(accounts::Column::AccountType, "account_type")
            .column_as(journal_entries::Column::EntryDate, "entry_date")
            .column_as(journal_entries::Column::Description, "description")
            .column(journal_items::Column::Debit)
            .column(journal_items::Column::Credit)
            .filter(journal_items::Column::TenantId.eq(tenant_id.into_inner()));

        if let Some(start) = start {
            query = query.filter(journal_entries::Column::EntryDate.gte(start));
        }
        if let Some(end) = end {
            query = query.filter(journal_entries::Column::EntryDate.lte(end));
        }

        let rows = query
            .order_by_asc(journal_entries::Column::EntryDate)
            .into_model::<RawItemRow>()
            .all(&self.db)
            .await
            .map_err(map_db)?;

        Ok(rows.into_iter().map(ItemRow::from).collect())
    }

    /// Trial balance: per-account totals over the given date range.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn trial_balance(
        &self,
        tenant_id: TenantId,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        show_netted: bool,
    ) -> Result<Vec<TrialBalanceRow>, LedgerError> {
        let rows = self.fetch_item_rows(tenant_id, start, end).await?;
        Ok(ReportService::trial_balance(&rows, None, None, show_netted))
    }

    /// AR/AP aging buckets as of the given date.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn ar_ap_aging(
        &self,
        tenant_id: TenantId,
        as_of: NaiveDate,
    ) -> Result<AgingReport, LedgerError> {
        let rows = self.fetch_item_rows(tenant_id, None, Some(as_of)).await?;
        Ok(ReportService::ar_ap_aging(&rows, as_of))
    }

    /// Light profit and loss over the given date range.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn pnl_light(
        &self,
        tenant_id: TenantId,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<PnlLight, LedgerError> {
        let rows = self.fetch_item_rows(tenant_id, start, end).await?;
        Ok(ReportService::pnl_light(&rows))
    }

    /// Light balance sheet as of the given date.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn balance_sheet_light(
        &self,
        tenant_id: TenantId,
        as_of: Option<NaiveDate>,
    ) -> Result<BalanceSheetLight, LedgerError> {
        let rows = self.fetch_item_rows(tenant_id, None, as_of).await?;
        Ok(ReportService::balance_sheet_light(&rows))
    }

    /// Running ledger for one account, with opening and closing balances.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::UnknownAccount`] if the account does not
    /// exist in the tenant's chart, or a database error.
    pub async fn account_ledger(
        &self,
        tenant_id: TenantId,
        account_number: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<AccountLedger, LedgerError> {
        let account = accounts::Entity::find()
            .filter(accounts::Column::TenantId.eq(tenant_id.into_inner()))
            .filter(accounts::Column::Number.eq(account_number))
            .one(&self.db)
            .await
            .map_err(map_db)?
            .ok_or_else(|| LedgerError::UnknownAccount {
                number: account_number.to_string(),
            })?;

        // Unbounded fetch: rows before `start` feed the opening balance.
        let rows = self.fetch_item_rows(tenant_id, None, None).await?;
        Ok(ReportService::account_ledger(
            &rows,
            account_number,
            account.account_type.into(),
            start,
            end,
        ))
    }
}
