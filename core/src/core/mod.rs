//! Address bookmark store.
//!
//! Owns the persisted collection of [`AddressRecord`]s and the last-selected
//! url scalar. The store holds no cache: every operation reads the backing,
//! and every mutation is a single all-or-nothing write.

use crate::types::{Address, AddressRecord, RecordId, epoch_millis};
use backing::{Backing, encode_json, load_json_or};
use error::StoreError;
use std::collections::HashSet;
use std::time::SystemTime;

pub mod backing;

/// Backing key for the record collection.
pub const ADDRESSES_KEY: &str = "addresses";

/// Backing key for the last selected url.
pub const LAST_USED_ADDRESS_KEY: &str = "lastUsedAddress";

pub mod error {
    use super::backing::error::BackingError;
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum StoreError {
        #[error("Invalid address: {0}")]
        InvalidAddress(String),

        #[error("Duplicate address: {0}")]
        DuplicateAddress(String),

        #[error("Persistence error: {0}")]
        Persistence(#[from] BackingError),
    }
}

pub struct AddressStore<B> {
    backing: B,
}

impl<B: Backing> AddressStore<B> {
    pub fn new(backing: B) -> Self {
        Self { backing }
    }

    pub fn backing(&self) -> &B {
        &self.backing
    }
}

/// Read operations.
impl<B: Backing> AddressStore<B> {
    /// Returns every record. Order is unspecified; see [`crate::views`].
    pub fn list(&self) -> Result<Vec<AddressRecord>, StoreError> {
        Ok(load_json_or(&self.backing, ADDRESSES_KEY, Vec::new())?)
    }

    /// Returns the last selected url, or an empty string.
    pub fn last_selected(&self) -> Result<String, StoreError> {
        Ok(load_json_or(&self.backing, LAST_USED_ADDRESS_KEY, String::new())?)
    }
}

/// Write operations.
impl<B: Backing> AddressStore<B> {
    /// Creates or updates the record for `input` and marks it selected.
    ///
    /// An existing record keeps its id; its name is only replaced by a
    /// non-empty `name`. `last_used` never moves backwards.
    pub fn upsert(
        &mut self,
        input: &str,
        name: Option<&str>,
        now: SystemTime,
    ) -> Result<AddressRecord, StoreError> {
        let url = Address::try_new(input.to_string())
            .map_err(|_| StoreError::InvalidAddress(input.trim().to_string()))?;
        let name = name.map(str::trim).filter(|n| !n.is_empty());
        let now_ms = epoch_millis(now);

        let mut records = self.list()?;

        let record = match records.iter_mut().find(|r| r.url == url) {
            Some(existing) => {
                if let Some(name) = name {
                    existing.name = name.to_string();
                }
                existing.last_used = Some(existing.recency().max(now_ms));
                existing.clone()
            }
            None => {
                let created = AddressRecord {
                    id: RecordId::generate(),
                    name: name.map_or_else(|| url.default_name(), str::to_string),
                    url,
                    last_used: Some(now_ms),
                };
                records.push(created.clone());
                created
            }
        };

        let addresses = encode_json(&records)?;
        let selected = encode_json(record.url.as_str())?;
        self.backing.set_many(&[
            (ADDRESSES_KEY, &addresses),
            (LAST_USED_ADDRESS_KEY, &selected),
        ])?;

        tracing::debug!("[Store] Upserted {} ({})", record.url, record.id);
        Ok(record)
    }

    /// Removes the record with `id`. Returns `false` (and writes nothing) if absent.
    ///
    /// The last selected url is left untouched even if it pointed at the record.
    pub fn remove(&mut self, id: &RecordId) -> Result<bool, StoreError> {
        let mut records = self.list()?;
        let before = records.len();
        records.retain(|r| &r.id != id);

        if records.len() == before {
            return Ok(false);
        }

        self.backing.set(ADDRESSES_KEY, &encode_json(&records)?)?;
        tracing::debug!("[Store] Removed {}", id);
        Ok(true)
    }

    /// Replaces the whole collection.
    ///
    /// Returns `Err(DuplicateAddress)` without writing if two records share a url.
    pub fn replace_all(&mut self, records: &[AddressRecord]) -> Result<(), StoreError> {
        let mut seen = HashSet::new();
        if let Some(dup) = records.iter().find(|r| !seen.insert(&r.url)) {
            return Err(StoreError::DuplicateAddress(dup.url.to_string()));
        }

        self.backing.set(ADDRESSES_KEY, &encode_json(records)?)?;
        tracing::debug!("[Store] Replaced collection ({} records)", records.len());
        Ok(())
    }

    /// Sets the last selected url. An empty string clears the selection;
    /// anything else is normalized like [`Self::upsert`] input.
    pub fn set_last_selected(&mut self, url: &str) -> Result<String, StoreError> {
        let normalized = if url.trim().is_empty() {
            String::new()
        } else {
            Address::try_new(url.to_string())
                .map_err(|_| StoreError::InvalidAddress(url.trim().to_string()))?
                .into_inner()
        };

        self.backing
            .set(LAST_USED_ADDRESS_KEY, &encode_json(&normalized)?)?;
        Ok(normalized)
    }
}
