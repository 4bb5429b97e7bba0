//! `SeaORM` Entity for period locks.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "period_locks")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub year: i32,
    pub month: i32,
    pub closed_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for folio_core::fiscal::PeriodLock {
    fn from(model: Model) -> Self {
        Self {
            tenant_id: folio_shared::types::TenantId::from_uuid(model.tenant_id),
            period: folio_core::fiscal::PeriodKey {
                year: model.year,
                month: u32::try_from(model.month).unwrap_or(0),
            },
        }
    }
}
