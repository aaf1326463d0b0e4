//! Async contract exposed to the presentation layer.

use crate::error::{ApiError, NavigationError};
use std::future::{self, Future};
use std::sync::{Arc, Mutex};
use std::time::SystemTime;
use waymark_core::core::AddressStore;
use waymark_core::core::backing::Backing;
use waymark_core::core::error::StoreError;
use waymark_core::theme::{AppearanceSource, ThemeResolver};
use waymark_core::types::{AddressRecord, RecordId, ThemeMode, ThemeState};

/// One round trip per call. Implementations never retry.
pub trait AddressApi {
    fn get_addresses(&self) -> impl Future<Output = Result<Vec<AddressRecord>, ApiError>> + Send;

    /// Replaces the whole collection.
    fn save_addresses(
        &self,
        records: Vec<AddressRecord>,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    fn get_last_used_address(&self) -> impl Future<Output = Result<String, ApiError>> + Send;

    /// Returns the normalized url actually stored.
    fn set_last_used_address(
        &self,
        url: String,
    ) -> impl Future<Output = Result<String, ApiError>> + Send;

    fn upsert_address(
        &self,
        url: String,
        name: Option<String>,
    ) -> impl Future<Output = Result<AddressRecord, ApiError>> + Send;

    /// `Ok(false)` when no record had `id`.
    fn remove_address(&self, id: RecordId) -> impl Future<Output = Result<bool, ApiError>> + Send;
}

impl<T: AddressApi + Send + Sync> AddressApi for Arc<T> {
    fn get_addresses(&self) -> impl Future<Output = Result<Vec<AddressRecord>, ApiError>> + Send {
        (**self).get_addresses()
    }

    fn save_addresses(
        &self,
        records: Vec<AddressRecord>,
    ) -> impl Future<Output = Result<(), ApiError>> + Send {
        (**self).save_addresses(records)
    }

    fn get_last_used_address(&self) -> impl Future<Output = Result<String, ApiError>> + Send {
        (**self).get_last_used_address()
    }

    fn set_last_used_address(
        &self,
        url: String,
    ) -> impl Future<Output = Result<String, ApiError>> + Send {
        (**self).set_last_used_address(url)
    }

    fn upsert_address(
        &self,
        url: String,
        name: Option<String>,
    ) -> impl Future<Output = Result<AddressRecord, ApiError>> + Send {
        (**self).upsert_address(url, name)
    }

    fn remove_address(&self, id: RecordId) -> impl Future<Output = Result<bool, ApiError>> + Send {
        (**self).remove_address(id)
    }
}

/// Renders a page. Out of scope for the store; supplied by the host.
pub trait Navigator {
    fn navigate_to_address(
        &self,
        url: &str,
    ) -> impl Future<Output = Result<(), NavigationError>> + Send;
}

/// [`AddressApi`] over a store owned by the caller's thread.
pub struct InProcessApi<B> {
    store: Mutex<AddressStore<B>>,
}

impl<B: Backing> InProcessApi<B> {
    pub fn new(store: AddressStore<B>) -> Self {
        Self {
            store: Mutex::new(store),
        }
    }

    pub fn into_inner(self) -> Result<AddressStore<B>, ApiError> {
        self.store.into_inner().map_err(|_| poisoned())
    }

    fn with_store<T>(
        &self,
        f: impl FnOnce(&mut AddressStore<B>) -> Result<T, StoreError>,
    ) -> Result<T, ApiError> {
        let mut store = self.store.lock().map_err(|_| poisoned())?;
        Ok(f(&mut store)?)
    }
}

fn poisoned() -> ApiError {
    ApiError::Persistence("store lock poisoned".to_string())
}

impl<B: Backing + Send> AddressApi for InProcessApi<B> {
    fn get_addresses(&self) -> impl Future<Output = Result<Vec<AddressRecord>, ApiError>> + Send {
        future::ready(self.with_store(|store| store.list()))
    }

    fn save_addresses(
        &self,
        records: Vec<AddressRecord>,
    ) -> impl Future<Output = Result<(), ApiError>> + Send {
        future::ready(self.with_store(|store| store.replace_all(&records)))
    }

    fn get_last_used_address(&self) -> impl Future<Output = Result<String, ApiError>> + Send {
        future::ready(self.with_store(|store| store.last_selected()))
    }

    fn set_last_used_address(
        &self,
        url: String,
    ) -> impl Future<Output = Result<String, ApiError>> + Send {
        future::ready(self.with_store(|store| store.set_last_selected(&url)))
    }

    fn upsert_address(
        &self,
        url: String,
        name: Option<String>,
    ) -> impl Future<Output = Result<AddressRecord, ApiError>> + Send {
        future::ready(
            self.with_store(|store| store.upsert(&url, name.as_deref(), SystemTime::now())),
        )
    }

    fn remove_address(&self, id: RecordId) -> impl Future<Output = Result<bool, ApiError>> + Send {
        future::ready(self.with_store(|store| store.remove(&id)))
    }
}

/// Theme resolution as seen by the presentation layer.
pub trait ThemeControl {
    fn theme_state(&self) -> Result<ThemeState, ApiError>;

    fn set_theme_mode(&self, mode: ThemeMode) -> Result<ThemeState, ApiError>;

    /// OS appearance notification. Returns the new state only if the
    /// effective theme changed.
    fn system_appearance_changed(&self) -> Result<Option<ThemeState>, ApiError>;
}

impl<B: Backing, S: AppearanceSource> ThemeControl for Mutex<ThemeResolver<B, S>> {
    fn theme_state(&self) -> Result<ThemeState, ApiError> {
        Ok(self.lock().map_err(|_| theme_poisoned())?.state())
    }

    fn set_theme_mode(&self, mode: ThemeMode) -> Result<ThemeState, ApiError> {
        let mut resolver = self.lock().map_err(|_| theme_poisoned())?;
        Ok(resolver.set_mode(mode)?)
    }

    fn system_appearance_changed(&self) -> Result<Option<ThemeState>, ApiError> {
        let mut resolver = self.lock().map_err(|_| theme_poisoned())?;
        Ok(resolver.on_system_appearance_changed())
    }
}

fn theme_poisoned() -> ApiError {
    ApiError::Persistence("theme lock poisoned".to_string())
}
