// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Waitlist Gate Contributors

//! Embedded registration database backed by redb (pure Rust, ACID).
//!
//! ## Table Layout
//!
//! - `registrations`: wallet_address → serialized Registration (JSON bytes)
//! - `email_index`: lowercased email → wallet_address
//!
//! Both tables are written inside a single write transaction so a
//! concurrent registration for the same wallet or email serializes at the
//! store and the loser observes a duplicate.

use std::path::Path;

use redb::{Database, ReadableDatabase, ReadableTable, ReadOnlyTable, TableDefinition};

use crate::models::Registration;

/// Primary table: wallet_address → serialized Registration (JSON bytes).
const REGISTRATIONS: TableDefinition<&str, &[u8]> = TableDefinition::new("registrations");

/// Unique index: lowercased email → wallet_address.
const EMAIL_INDEX: TableDefinition<&str, &str> = TableDefinition::new("email_index");

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("redb error: {0}")]
    Redb(#[from] redb::Error),

    #[error("redb database error: {0}")]
    RedbDatabase(#[from] redb::DatabaseError),

    #[error("redb transaction error: {0}")]
    RedbTransaction(#[from] redb::TransactionError),

    #[error("redb table error: {0}")]
    RedbTable(#[from] redb::TableError),

    #[error("redb storage error: {0}")]
    RedbStorage(#[from] redb::StorageError),

    #[error("redb commit error: {0}")]
    RedbCommit(#[from] redb::CommitError),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("wallet address already registered")]
    WalletExists,

    #[error("email already registered")]
    EmailExists,
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Embedded ACID registration database.
pub struct WaitlistDb {
    db: Database,
}

impl WaitlistDb {
    /// Open (or create) the database at the given path.
    pub fn open(path: &Path) -> StoreResult<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).ok();
        }
        let db = Database::create(path)?;

        // Pre-create all tables so later read transactions don't fail
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(REGISTRATIONS)?;
            let _ = write_txn.open_table(EMAIL_INDEX)?;
        }
        write_txn.commit()?;

        Ok(Self { db })
    }

    /// Insert a new registration, enforcing wallet and email uniqueness.
    ///
    /// The duplicate checks run inside the write transaction, so two
    /// concurrent inserts for the same wallet or email serialize here and
    /// exactly one succeeds. Dropping the transaction without commit
    /// aborts it.
    pub fn insert(&self, registration: &Registration) -> StoreResult<()> {
        let json = serde_json::to_vec(registration)?;

        let write_txn = self.db.begin_write()?;
        {
            let mut regs = write_txn.open_table(REGISTRATIONS)?;
            if regs.get(registration.wallet_address.as_str())?.is_some() {
                return Err(StoreError::WalletExists);
            }

            let mut emails = write_txn.open_table(EMAIL_INDEX)?;
            if emails.get(registration.email.as_str())?.is_some() {
                return Err(StoreError::EmailExists);
            }

            regs.insert(registration.wallet_address.as_str(), json.as_slice())?;
            emails.insert(
                registration.email.as_str(),
                registration.wallet_address.as_str(),
            )?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Look up a registration by wallet address.
    pub fn get_by_wallet(&self, wallet_address: &str) -> StoreResult<Option<Registration>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(REGISTRATIONS)?;
        match table.get(wallet_address)? {
            Some(value) => {
                let registration: Registration = serde_json::from_slice(value.value())?;
                Ok(Some(registration))
            }
            None => Ok(None),
        }
    }

    /// Advisory existence check by wallet address.
    pub fn wallet_exists(&self, wallet_address: &str) -> StoreResult<bool> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(REGISTRATIONS)?;
        Ok(table.get(wallet_address)?.is_some())
    }

    /// Advisory existence check by (lowercased) email.
    pub fn email_exists(&self, email: &str) -> StoreResult<bool> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(EMAIL_INDEX)?;
        Ok(table.get(email)?.is_some())
    }

    /// Number of registrations.
    ///
    /// Scans the registration table; if that scan fails partway the email
    /// index is counted instead. Both tables are written in the same
    /// transaction, so their cardinalities match.
    pub fn count(&self) -> StoreResult<u64> {
        let read_txn = self.db.begin_read()?;
        let primary = read_txn
            .open_table(REGISTRATIONS)
            .map_err(StoreError::from)
            .and_then(|table| scan_count(&table));
        match primary {
            Ok(n) => Ok(n),
            Err(err) => {
                tracing::warn!(error = %err, "registration count scan failed, using email index");
                let index = read_txn.open_table(EMAIL_INDEX)?;
                scan_count(&index)
            }
        }
    }
}

fn scan_count<K, V>(table: &ReadOnlyTable<K, V>) -> StoreResult<u64>
where
    K: redb::Key + 'static,
    V: redb::Value + 'static,
{
    let mut n: u64 = 0;
    for entry in table.iter()? {
        entry?;
        n += 1;
    }
    Ok(n)
}
