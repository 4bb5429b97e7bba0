//! Period lock repository.
//!
//! A locked `(tenant, year, month)` rejects new postings dated inside it;
//! reversals remain allowed. The unique index on the triple makes
//! concurrent closes race-safe: the loser gets `AlreadyLocked`.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    SqlErr,
};
use uuid::Uuid;

use folio_core::fiscal::{PeriodKey, PeriodLock};
use folio_core::ledger::LedgerError;
use folio_shared::types::TenantId;

use crate::entities::period_locks;

use super::map_db;

/// Repository for closing and reopening accounting periods.
#[derive(Debug, Clone)]
pub struct PeriodRepository {
    db: DatabaseConnection,
}

impl PeriodRepository {
    /// Creates a new period repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Closes a period for the tenant.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::AlreadyLocked`] if the period is already
    /// closed, or a database error.
    pub async fn close(
        &self,
        tenant_id: TenantId,
        period: PeriodKey,
    ) -> Result<PeriodLock, LedgerError> {
        let lock = period_locks::ActiveModel {
            id: Set(Uuid::now_v7()),
            tenant_id: Set(tenant_id.into_inner()),
            year: Set(period.year),
            month: Set(month_column(period)),
            closed_at: Set(Utc::now().into()),
        };

        match lock.insert(&self.db).await {
            Ok(model) => {
                tracing::info!(tenant = %tenant_id, period = %period, "closed period");
                Ok(model.into())
            }
            Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Err(LedgerError::AlreadyLocked {
                    year: period.year,
                    month: period.month,
                })
            }
            Err(err) => Err(map_db(err)),
        }
    }

    /// Reopens a closed period for the tenant.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::NotLocked`] if the period is not closed,
    /// or a database error.
    pub async fn reopen(&self, tenant_id: TenantId, period: PeriodKey) -> Result<(), LedgerError> {
        let deleted = period_locks::Entity::delete_many()
            .filter(period_locks::Column::TenantId.eq(tenant_id.into_inner()))
            .filter(period_locks::Column::Year.eq(period.year))
            .filter(period_locks::Column::Month.eq(month_column(period)))
            .exec(&self.db)
            .await
            .map_err(map_db)?;

        if deleted.rows_affected == 0 {
            return Err(LedgerError::NotLocked {
                year: period.year,
                month: period.month,
            });
        }

        tracing::info!(tenant = %tenant_id, period = %period, "reopened period");
        Ok(())
    }

    /// Whether the period is currently locked.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn is_locked(
        &self,
        tenant_id: TenantId,
        period: PeriodKey,
    ) -> Result<bool, LedgerError> {
        let lock = period_locks::Entity::find()
            .filter(period_locks::Column::TenantId.eq(tenant_id.into_inner()))
            .filter(period_locks::Column::Year.eq(period.year))
            .filter(period_locks::Column::Month.eq(month_column(period)))
            .one(&self.db)
            .await
            .map_err(map_db)?;

        Ok(lock.is_some())
    }

    /// Lists the tenant's locked periods, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list(&self, tenant_id: TenantId) -> Result<Vec<PeriodLock>, LedgerError> {
        let locks = period_locks::Entity::find()
            .filter(period_locks::Column::TenantId.eq(tenant_id.into_inner()))
            .order_by_desc(period_locks::Column::Year)
            .order_by_desc(period_locks::Column::Month)
            .all(&self.db)
            .await
            .map_err(map_db)?;

        Ok(locks.into_iter().map(PeriodLock::from).collect())
    }
}

/// Month as stored in the integer column. Valid keys are 1..=12.
fn month_column(period: PeriodKey) -> i32 {
    i32::try_from(period.month).unwrap_or(0)
}
