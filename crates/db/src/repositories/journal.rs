//! Journal repository: idempotent posting and reversals.
//!
//! `post` turns a [`BusinessEvent`] into a balanced, locked journal entry
//! inside a single database transaction. Idempotency rides on the unique
//! `(tenant_id, reference, kind)` index of `posted_references`: the losing
//! side of a concurrent duplicate never surfaces an error, it re-reads the
//! winning entry instead.

use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    QueryFilter, Set, SqlErr, TransactionTrait,
};
use uuid::Uuid;

use folio_core::fiscal::PeriodKey;
use folio_core::ledger::{
    normalize_lines, reversal_description, reversal_lines, BusinessEvent, ItemSnapshot,
    LedgerError, NormalizedLine,
};
use folio_shared::types::{JournalEntryId, JournalItemId, TenantId};

use crate::entities::{accounts, journal_entries, journal_items, period_locks, posted_references};

use super::map_db;

/// Posting kind used when the caller does not specify one.
pub const KIND_GENERIC: &str = "generic";

/// Posting kind reserved for reversal entries.
pub const KIND_REVERSAL: &str = "reversal";

/// Input for posting a business event.
#[derive(Debug, Clone)]
pub struct PostInput {
    /// Owning tenant.
    pub tenant_id: TenantId,
    /// The business event to post.
    pub event: BusinessEvent,
    /// Idempotency reference. When set, re-posting the same
    /// `(reference, kind)` replays the original entry.
    pub reference: Option<String>,
    /// Posting kind, `generic` by default.
    pub kind: String,
    /// Posting date; today when absent.
    pub date: Option<NaiveDate>,
    /// Entry description; derived from the event when absent.
    pub description: Option<String>,
    /// Cost center stamped onto every line.
    pub cost_center: Option<String>,
    /// Labels stamped onto every line.
    pub labels: Vec<String>,
}

impl PostInput {
    /// Creates a minimal posting input for the given tenant and event.
    #[must_use]
    pub fn new(tenant_id: TenantId, event: BusinessEvent) -> Self {
        Self {
            tenant_id,
            event,
            reference: None,
            kind: KIND_GENERIC.to_string(),
            date: None,
            description: None,
            cost_center: None,
            labels: Vec::new(),
        }
    }
}

/// A posted journal entry with its lines.
#[derive(Debug, Clone)]
pub struct PostedEntry {
    /// Entry header.
    pub entry: journal_entries::Model,
    /// Entry lines.
    pub items: Vec<journal_items::Model>,
    /// True when an existing entry was replayed instead of written.
    pub replayed: bool,
}

/// Everything needed to write one locked entry atomically.
struct NewEntry<'a> {
    tenant_id: Uuid,
    date: NaiveDate,
    description: &'a str,
    kind: &'a str,
    reversal_of: Option<Uuid>,
    reference: Option<&'a str>,
    lines: &'a [NormalizedLine],
    account_ids: &'a HashMap<String, Uuid>,
}

/// Repository for journal posting and reversal.
#[derive(Debug, Clone)]
pub struct JournalRepository {
    db: DatabaseConnection,
}

impl JournalRepository {
    /// Creates a new journal repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Posts a business event as a balanced, locked journal entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the event normalizes to an invalid line set,
    /// an account is missing from the tenant's chart, the posting date
    /// falls into a locked period, or the database fails.
    pub async fn post(&self, input: PostInput) -> Result<PostedEntry, LedgerError> {
        if let Some(reference) = input.reference.as_deref() {
            if let Some(existing) = self
                .find_posted(input.tenant_id, reference, &input.kind)
                .await?
            {
                tracing::debug!(
                    tenant = %input.tenant_id,
                    reference,
                    kind = %input.kind,
                    entry_id = %existing.entry.id,
                    "replaying idempotent post"
                );
                return Ok(existing);
            }
        }

        let mut lines = normalize_lines(&input.event.lines())?;
        for line in &mut lines {
            line.cost_center.clone_from(&input.cost_center);
            line.labels.clone_from(&input.labels);
        }

        let date = input.date.unwrap_or_else(|| Utc::now().date_naive());
        self.ensure_period_open(input.tenant_id, date).await?;

        let account_ids = self.resolve_accounts(input.tenant_id, &lines).await?;
        let description = input
            .description
            .clone()
            .unwrap_or_else(|| input.event.default_description());

        let new_entry = NewEntry {
            tenant_id: input.tenant_id.into_inner(),
            date,
            description: &description,
            kind: &input.kind,
            reversal_of: None,
            reference: input.reference.as_deref(),
            lines: &lines,
            account_ids: &account_ids,
        };

        match self.insert_locked_entry(&new_entry).await {
            Ok(posted) => {
                tracing::info!(
                    tenant = %input.tenant_id,
                    event = input.event.name(),
                    entry_id = %posted.entry.id,
                    "posted journal entry"
                );
                Ok(posted)
            }
            Err(err) => {
                self.reconcile_race(input.tenant_id, input.reference.as_deref(), &input.kind, err)
                    .await
            }
        }
    }

    /// Creates a full reversal of a posted entry.
    ///
    /// Reversals are exempt from the period lock; they are the sanctioned
    /// way to correct a closed period. The reversal carries the original
    /// entry date so both sides land in the same period.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry does not exist, belongs to another
    /// tenant, or the database fails.
    pub async fn reverse(
        &self,
        tenant_id: TenantId,
        entry_id: Uuid,
        reference: Option<String>,
    ) -> Result<PostedEntry, LedgerError> {
        if let Some(reference) = reference.as_deref() {
            if let Some(existing) = self.find_posted(tenant_id, reference, KIND_REVERSAL).await? {
                tracing::debug!(
                    tenant = %tenant_id,
                    reference,
                    entry_id = %existing.entry.id,
                    "replaying idempotent reversal"
                );
                return Ok(existing);
            }
        }

        let original = self.load_entry(tenant_id, entry_id).await?;
        let items = journal_items::Entity::find()
            .filter(journal_items::Column::EntryId.eq(entry_id))
            .all(&self.db)
            .await
            .map_err(map_db)?;

        let numbers = self.account_numbers(&items).await?;
        let snapshots: Vec<ItemSnapshot> = items
            .iter()
            .map(|item| ItemSnapshot {
                account: numbers[&item.account_id].clone(),
                debit: item.debit,
                credit: item.credit,
                cost_center: item.cost_center.clone(),
                labels: labels_from_json(&item.labels),
            })
            .collect();

        let lines = reversal_lines(&snapshots);
        let account_ids: HashMap<String, Uuid> = numbers
            .into_iter()
            .map(|(id, number)| (number, id))
            .collect();
        let description = reversal_description(&original.description);

        let new_entry = NewEntry {
            tenant_id: tenant_id.into_inner(),
            date: original.entry_date,
            description: &description,
            kind: KIND_REVERSAL,
            reversal_of: Some(original.id),
            reference: reference.as_deref(),
            lines: &lines,
            account_ids: &account_ids,
        };

        match self.insert_locked_entry(&new_entry).await {
            Ok(posted) => {
                tracing::info!(
                    tenant = %tenant_id,
                    original = %original.id,
                    reversal = %posted.entry.id,
                    "reversed journal entry"
                );
                Ok(posted)
            }
            Err(err) => {
                self.reconcile_race(tenant_id, reference.as_deref(), KIND_REVERSAL, err)
                    .await
            }
        }
    }

    /// Fetches a posted entry with its lines.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry does not exist, belongs to another
    /// tenant, or the database fails.
    pub async fn get(&self, tenant_id: TenantId, entry_id: Uuid) -> Result<PostedEntry, LedgerError> {
        let entry = self.load_entry(tenant_id, entry_id).await?;
        let items = journal_items::Entity::find()
            .filter(journal_items::Column::EntryId.eq(entry_id))
            .all(&self.db)
            .await
            .map_err(map_db)?;

        Ok(PostedEntry {
            entry,
            items,
            replayed: false,
        })
    }

    /// Rewrites an entry's description.
    ///
    /// Posted entries are locked and therefore immutable; corrections go
    /// through [`Self::reverse`] followed by a fresh post.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::ImmutableWrite`] for locked entries, or the
    /// usual lookup errors.
    pub async fn update_description(
        &self,
        tenant_id: TenantId,
        entry_id: Uuid,
        description: &str,
    ) -> Result<journal_entries::Model, LedgerError> {
        let entry = self.load_entry(tenant_id, entry_id).await?;
        if entry.locked {
            return Err(LedgerError::ImmutableWrite);
        }

        let mut active: journal_entries::ActiveModel = entry.into();
        active.description = Set(description.to_string());
        active.update(&self.db).await.map_err(map_db)
    }

    /// Rejects posts whose date falls inside a locked period.
    async fn ensure_period_open(
        &self,
        tenant_id: TenantId,
        date: NaiveDate,
    ) -> Result<(), LedgerError> {
        let period = PeriodKey::from_date(date);
        let locked = period_locks::Entity::find()
            .filter(period_locks::Column::TenantId.eq(tenant_id.into_inner()))
            .filter(period_locks::Column::Year.eq(period.year))
            .filter(period_locks::Column::Month.eq(i32::try_from(period.month).unwrap_or(0)))
            .one(&self.db)
            .await
            .map_err(map_db)?;

        if locked.is_some() {
            return Err(LedgerError::PeriodLocked {
                year: period.year,
                month: period.month,
            });
        }
        Ok(())
    }

    /// Resolves line account numbers against the tenant's chart.
    async fn resolve_accounts(
        &self,
        tenant_id: TenantId,
        lines: &[NormalizedLine],
    ) -> Result<HashMap<String, Uuid>, LedgerError> {
        let mut resolved = HashMap::new();

        for line in lines {
            if resolved.contains_key(&line.account) {
                continue;
            }
            let account = accounts::Entity::find()
                .filter(accounts::Column::TenantId.eq(tenant_id.into_inner()))
                .filter(accounts::Column::Number.eq(line.account.as_str()))
                .one(&self.db)
                .await
                .map_err(map_db)?
                .ok_or_else(|| LedgerError::UnknownAccount {
                    number: line.account.clone(),
                })?;
            resolved.insert(line.account.clone(), account.id);
        }

        Ok(resolved)
    }

    /// Maps item account ids back to their chart numbers.
    async fn account_numbers(
        &self,
        items: &[journal_items::Model],
    ) -> Result<HashMap<Uuid, String>, LedgerError> {
        let ids: Vec<Uuid> = items.iter().map(|item| item.account_id).collect();
        let rows = accounts::Entity::find()
            .filter(accounts::Column::Id.is_in(ids))
            .all(&self.db)
            .await
            .map_err(map_db)?;

        Ok(rows.into_iter().map(|a| (a.id, a.number)).collect())
    }

    /// Writes the entry header, lines and reference row in one transaction.
    ///
    /// The entry is born locked; there is no draft state.
    async fn insert_locked_entry(&self, new_entry: &NewEntry<'_>) -> Result<PostedEntry, DbErr> {
        let txn = self.db.begin().await?;
        let now = Utc::now();
        let entry_id = JournalEntryId::new().into_inner();

        let entry = journal_entries::ActiveModel {
            id: Set(entry_id),
            tenant_id: Set(new_entry.tenant_id),
            entry_date: Set(new_entry.date),
            description: Set(new_entry.description.to_string()),
            kind: Set(new_entry.kind.to_string()),
            reversal_of: Set(new_entry.reversal_of),
            locked: Set(true),
            posted_at: Set(Some(now.into())),
            created_at: Set(now.into()),
        }
        .insert(&txn)
        .await?;

        let items = self.insert_items(&txn, entry_id, new_entry).await?;

        if let Some(reference) = new_entry.reference {
            posted_references::ActiveModel {
                id: Set(Uuid::now_v7()),
                tenant_id: Set(new_entry.tenant_id),
                reference: Set(reference.to_string()),
                kind: Set(new_entry.kind.to_string()),
                entry_id: Set(entry_id),
                created_at: Set(now.into()),
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;

        Ok(PostedEntry {
            entry,
            items,
            replayed: false,
        })
    }

    async fn insert_items(
        &self,
        txn: &DatabaseTransaction,
        entry_id: Uuid,
        new_entry: &NewEntry<'_>,
    ) -> Result<Vec<journal_items::Model>, DbErr> {
        let now = Utc::now().into();
        let mut inserted = Vec::with_capacity(new_entry.lines.len());

        for line in new_entry.lines {
            let item = journal_items::ActiveModel {
                id: Set(JournalItemId::new().into_inner()),
                tenant_id: Set(new_entry.tenant_id),
                entry_id: Set(entry_id),
                account_id: Set(new_entry.account_ids[&line.account]),
                debit: Set(line.debit),
                credit: Set(line.credit),
                cost_center: Set(line.cost_center.clone()),
                labels: Set(serde_json::Value::from(line.labels.clone())),
                created_at: Set(now),
            }
            .insert(txn)
            .await?;
            inserted.push(item);
        }

        Ok(inserted)
    }

    /// Resolves a lost idempotency race by re-reading the winning entry.
    async fn reconcile_race(
        &self,
        tenant_id: TenantId,
        reference: Option<&str>,
        kind: &str,
        err: DbErr,
    ) -> Result<PostedEntry, LedgerError> {
        if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
            if let Some(reference) = reference {
                if let Some(winner) = self.find_posted(tenant_id, reference, kind).await? {
                    tracing::debug!(
                        tenant = %tenant_id,
                        reference,
                        kind,
                        entry_id = %winner.entry.id,
                        "lost idempotency race, returning winning entry"
                    );
                    return Ok(winner);
                }
            }
        }
        Err(map_db(err))
    }

    /// Looks up a previously posted `(reference, kind)` for the tenant.
    async fn find_posted(
        &self,
        tenant_id: TenantId,
        reference: &str,
        kind: &str,
    ) -> Result<Option<PostedEntry>, LedgerError> {
        let record = posted_references::Entity::find()
            .filter(posted_references::Column::TenantId.eq(tenant_id.into_inner()))
            .filter(posted_references::Column::Reference.eq(reference))
            .filter(posted_references::Column::Kind.eq(kind))
            .one(&self.db)
            .await
            .map_err(map_db)?;

        let Some(record) = record else {
            return Ok(None);
        };

        let mut posted = self.get(tenant_id, record.entry_id).await?;
        posted.replayed = true;
        Ok(Some(posted))
    }

    async fn load_entry(
        &self,
        tenant_id: TenantId,
        entry_id: Uuid,
    ) -> Result<journal_entries::Model, LedgerError> {
        let entry = journal_entries::Entity::find_by_id(entry_id)
            .one(&self.db)
            .await
            .map_err(map_db)?
            .ok_or(LedgerError::EntryNotFound(entry_id))?;

        if entry.tenant_id != tenant_id.into_inner() {
            return Err(LedgerError::TenantMismatch);
        }
        Ok(entry)
    }
}

/// Decodes the JSONB labels column back into strings.
fn labels_from_json(value: &serde_json::Value) -> Vec<String> {
    value
        .as_array()
        .map(|array| {
            array
                .iter()
                .filter_map(|v| v.as_str().map(ToString::to_string))
                .collect()
        })
        .unwrap_or_default()
}
