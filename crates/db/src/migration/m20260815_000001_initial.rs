//! Initial database migration.
//!
//! Creates the ledger schema: chart of accounts, journal entries and items,
//! posted references (idempotency) and period locks.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(ENUMS_SQL).await?;
        db.execute_unprepared(ACCOUNTS_SQL).await?;
        db.execute_unprepared(JOURNAL_ENTRIES_SQL).await?;
        db.execute_unprepared(JOURNAL_ITEMS_SQL).await?;
        db.execute_unprepared(POSTED_REFERENCES_SQL).await?;
        db.execute_unprepared(PERIOD_LOCKS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

const ENUMS_SQL: &str = r"
CREATE TYPE account_type AS ENUM (
    'asset',
    'liability',
    'income',
    'expense'
);
";

const ACCOUNTS_SQL: &str = r"
CREATE TABLE accounts (
    id UUID PRIMARY KEY,
    tenant_id UUID NOT NULL,
    number VARCHAR(20) NOT NULL,
    name VARCHAR(255) NOT NULL,
    account_type account_type NOT NULL,
    parent_id UUID REFERENCES accounts(id),
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT uq_accounts_tenant_number UNIQUE (tenant_id, number)
);

CREATE INDEX idx_accounts_tenant ON accounts(tenant_id);
";

const JOURNAL_ENTRIES_SQL: &str = r"
CREATE TABLE journal_entries (
    id UUID PRIMARY KEY,
    tenant_id UUID NOT NULL,
    entry_date DATE NOT NULL,
    description TEXT NOT NULL,
    kind VARCHAR(50) NOT NULL DEFAULT 'generic',
    reversal_of UUID REFERENCES journal_entries(id),
    locked BOOLEAN NOT NULL DEFAULT FALSE,
    posted_at TIMESTAMPTZ,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_journal_entries_tenant_date ON journal_entries(tenant_id, entry_date);
CREATE INDEX idx_journal_entries_reversal_of ON journal_entries(reversal_of)
    WHERE reversal_of IS NOT NULL;
";

const JOURNAL_ITEMS_SQL: &str = r"
CREATE TABLE journal_items (
    id UUID PRIMARY KEY,
    tenant_id UUID NOT NULL,
    entry_id UUID NOT NULL REFERENCES journal_entries(id) ON DELETE CASCADE,
    account_id UUID NOT NULL REFERENCES accounts(id),
    debit NUMERIC(18, 2) NOT NULL DEFAULT 0,
    credit NUMERIC(18, 2) NOT NULL DEFAULT 0,
    cost_center VARCHAR(100),
    labels JSONB NOT NULL DEFAULT '[]',
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT ck_journal_items_non_negative CHECK (debit >= 0 AND credit >= 0),
    CONSTRAINT ck_journal_items_single_side CHECK ((debit = 0) <> (credit = 0))
);

CREATE INDEX idx_journal_items_entry ON journal_items(entry_id);
CREATE INDEX idx_journal_items_tenant_account ON journal_items(tenant_id, account_id);
";

const POSTED_REFERENCES_SQL: &str = r"
CREATE TABLE posted_references (
    id UUID PRIMARY KEY,
    tenant_id UUID NOT NULL,
    reference VARCHAR(255) NOT NULL,
    kind VARCHAR(50) NOT NULL DEFAULT 'generic',
    entry_id UUID NOT NULL REFERENCES journal_entries(id) ON DELETE CASCADE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT uq_posted_references_tenant_ref_kind UNIQUE (tenant_id, reference, kind)
);
";

const PERIOD_LOCKS_SQL: &str = r"
CREATE TABLE period_locks (
    id UUID PRIMARY KEY,
    tenant_id UUID NOT NULL,
    year INTEGER NOT NULL,
    month INTEGER NOT NULL CHECK (month BETWEEN 1 AND 12),
    closed_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT uq_period_locks_tenant_period UNIQUE (tenant_id, year, month)
);
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS period_locks;
DROP TABLE IF EXISTS posted_references;
DROP TABLE IF EXISTS journal_items;
DROP TABLE IF EXISTS journal_entries;
DROP TABLE IF EXISTS accounts;
DROP TYPE IF EXISTS account_type;
";
