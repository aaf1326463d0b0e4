//! Persistent key-value backing.
//!
//! Values are JSON strings keyed by `&str`. The store and the theme resolver
//! only need get/set with defaults; `set_many` must commit all entries or none.

use error::BackingError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;

pub(crate) mod db;
pub(crate) mod memory;

pub use db::RedbBacking;
pub use memory::MemoryBacking;

pub mod error {
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum BackingError {
        #[error("Database error: {0}")]
        Redb(#[from] redb::DatabaseError),

        #[error("Table error: {0}")]
        TableError(#[from] redb::TableError),

        #[error("Storage error: {0}")]
        StorageError(#[from] redb::StorageError),

        #[error("Transaction error: {0}")]
        TransactionError(#[from] redb::TransactionError),

        #[error("Commit error: {0}")]
        CommitError(#[from] redb::CommitError),

        #[error("IO error: {0}")]
        Io(#[from] std::io::Error),

        #[error("Corrupt value for {key}: {source}")]
        Corrupt {
            key: String,
            #[source]
            source: serde_json::Error,
        },

        #[error("Encode error: {0}")]
        Encode(#[source] serde_json::Error),

        #[error("Backing unavailable: {0}")]
        Unavailable(String),
    }
}

/// Durable string-keyed storage.
pub trait Backing {
    /// Returns the raw value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, BackingError>;

    /// Writes every entry in one transaction. On error nothing is written.
    fn set_many(&self, entries: &[(&str, &str)]) -> Result<(), BackingError>;

    fn set(&self, key: &str, value: &str) -> Result<(), BackingError> {
        self.set_many(&[(key, value)])
    }
}

impl<T: Backing + ?Sized> Backing for &T {
    fn get(&self, key: &str) -> Result<Option<String>, BackingError> {
        (**self).get(key)
    }

    fn set_many(&self, entries: &[(&str, &str)]) -> Result<(), BackingError> {
        (**self).set_many(entries)
    }
}

impl<T: Backing + ?Sized> Backing for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, BackingError> {
        (**self).get(key)
    }

    fn set_many(&self, entries: &[(&str, &str)]) -> Result<(), BackingError> {
        (**self).set_many(entries)
    }
}

impl<T: Backing + ?Sized> Backing for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, BackingError> {
        (**self).get(key)
    }

    fn set_many(&self, entries: &[(&str, &str)]) -> Result<(), BackingError> {
        (**self).set_many(entries)
    }
}

/// Decodes the JSON value under `key`, or `default` if the key is absent.
///
/// A value that is present but undecodable is reported as `Corrupt`.
pub fn load_json_or<T, B>(backing: &B, key: &str, default: T) -> Result<T, BackingError>
where
    T: DeserializeOwned,
    B: Backing + ?Sized,
{
    match backing.get(key)? {
        None => Ok(default),
        Some(raw) => serde_json::from_str(&raw).map_err(|source| BackingError::Corrupt {
            key: key.to_string(),
            source,
        }),
    }
}

pub fn encode_json<T: Serialize + ?Sized>(value: &T) -> Result<String, BackingError> {
    serde_json::to_string(value).map_err(BackingError::Encode)
}
