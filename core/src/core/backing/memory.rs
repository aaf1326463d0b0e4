use super::Backing;
use super::error::BackingError;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

/// In-memory backing for tests and ephemeral hosts.
///
/// Reads and writes can be made to fail on demand to exercise persistence
/// error paths.
#[derive(Debug, Default)]
pub struct MemoryBacking {
    entries: Mutex<HashMap<String, String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryBacking {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let entries = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            entries: Mutex::new(entries),
            ..Self::default()
        }
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, BackingError> {
        self.entries
            .lock()
            .map_err(|_| BackingError::Unavailable("memory backing lock poisoned".to_string()))
    }
}

impl Backing for MemoryBacking {
    fn get(&self, key: &str) -> Result<Option<String>, BackingError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(BackingError::Unavailable(format!("read of {key} refused")));
        }
        Ok(self.lock()?.get(key).cloned())
    }

    fn set_many(&self, entries: &[(&str, &str)]) -> Result<(), BackingError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(BackingError::Unavailable("write refused".to_string()));
        }
        let mut map = self.lock()?;
        for (key, value) in entries {
            map.insert((*key).to_string(), (*value).to_string());
        }
        Ok(())
    }
}
