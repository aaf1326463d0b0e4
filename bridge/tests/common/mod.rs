#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use waymark_bridge::{InProcessApi, NavigationError, Navigator};
use waymark_core::core::AddressStore;
use waymark_core::core::backing::MemoryBacking;

/// Navigator that records every requested url.
#[derive(Clone, Default)]
pub struct RecordingNavigator {
    visits: Arc<Mutex<Vec<String>>>,
    fail: bool,
}

impl RecordingNavigator {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn visits(&self) -> Vec<String> {
        self.visits.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    async fn navigate_to_address(&self, url: &str) -> Result<(), NavigationError> {
        self.visits.lock().unwrap().push(url.to_string());
        if self.fail {
            Err(NavigationError("render failed".to_string()))
        } else {
            Ok(())
        }
    }
}

pub fn at(millis: u64) -> SystemTime {
    UNIX_EPOCH + Duration::from_millis(millis)
}

/// An in-process api over a shared memory backing the test can still reach.
pub fn api_with(backing: Arc<MemoryBacking>) -> InProcessApi<Arc<MemoryBacking>> {
    InProcessApi::new(AddressStore::new(backing))
}

/// Seeds `backing` through a throwaway store.
pub fn seed(backing: &Arc<MemoryBacking>, entries: &[(&str, u64)], selected: Option<&str>) {
    let mut store = AddressStore::new(backing.clone());
    for (url, millis) in entries {
        store.upsert(url, None, at(*millis)).unwrap();
    }
    if let Some(selected) = selected {
        store.set_last_selected(selected).unwrap();
    }
}
