//! `SeaORM` Entity for journal entry headers.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "journal_entries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub entry_date: Date,
    pub description: String,
    /// Posting kind, e.g. `generic`, `invoice`, `reversal`.
    pub kind: String,
    /// Entry this one reverses, when the entry is a reversal.
    pub reversal_of: Option<Uuid>,
    pub locked: bool,
    pub posted_at: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::journal_items::Entity")]
    JournalItems,
    #[sea_orm(has_many = "super::posted_references::Entity")]
    PostedReferences,
}

impl Related<super::journal_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JournalItems.def()
    }
}

impl Related<super::posted_references::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PostedReferences.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
