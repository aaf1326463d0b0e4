//! redb-backed key-value storage.

use super::Backing;
use super::error::BackingError;
use crate::types::Config;
use redb::{ReadableDatabase, ReadableTable, TableDefinition};

/// Single table: key → JSON string.
const KV_TABLE: TableDefinition<&str, &str> = TableDefinition::new("kv");

pub struct RedbBacking {
    db: redb::Database,
}

impl RedbBacking {
    /// Creates or opens the database at `config.db_path()`.
    pub fn open(config: &Config) -> Result<Self, BackingError> {
        std::fs::create_dir_all(&config.base_path)?;

        let db = redb::Database::create(config.db_path())?;

        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(KV_TABLE)?;
        }
        write_txn.commit()?;

        tracing::debug!("[Storage] Opened {}", config.db_path().display());
        Ok(Self { db })
    }
}

impl Backing for RedbBacking {
    fn get(&self, key: &str) -> Result<Option<String>, BackingError> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(KV_TABLE)?;

        Ok(table.get(key)?.map(|guard| guard.value().to_string()))
    }

    fn set_many(&self, entries: &[(&str, &str)]) -> Result<(), BackingError> {
        let write_txn = self.db.begin_write()?;

        {
            let mut table = write_txn.open_table(KV_TABLE)?;
            for (key, value) in entries {
                table.insert(*key, *value)?;
            }
        }

        write_txn.commit()?;
        Ok(())
    }
}
