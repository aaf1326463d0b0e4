//! Theme resolution.
//!
//! Persists the [`ThemeMode`] and derives the effective light/dark flag. While
//! the mode is `System` the resolver holds a [`WatchToken`] from its
//! [`AppearanceSource`]; leaving `System` releases it, and OS notifications
//! arriving without a token are ignored.

use crate::core::backing::{Backing, encode_json};
use crate::types::{ThemeMode, ThemeState};
use error::ThemeError;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Backing key for the persisted mode.
pub const THEME_MODE_KEY: &str = "themeMode";

pub mod error {
    use crate::core::backing::error::BackingError;
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum ThemeError {
        #[error("Persistence error: {0}")]
        Persistence(#[from] BackingError),
    }
}

/// Handle for an attached OS appearance listener.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct WatchToken(u64);

impl WatchToken {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

/// OS appearance signal.
pub trait AppearanceSource {
    /// Current OS preference, queried at call time.
    fn prefers_dark(&self) -> bool;

    /// Attaches the OS change listener.
    fn watch(&self) -> WatchToken;

    /// Detaches the listener identified by `token`.
    fn unwatch(&self, token: WatchToken);
}

impl<T: AppearanceSource + ?Sized> AppearanceSource for &T {
    fn prefers_dark(&self) -> bool {
        (**self).prefers_dark()
    }

    fn watch(&self) -> WatchToken {
        (**self).watch()
    }

    fn unwatch(&self, token: WatchToken) {
        (**self).unwatch(token)
    }
}

impl<T: AppearanceSource + ?Sized> AppearanceSource for Arc<T> {
    fn prefers_dark(&self) -> bool {
        (**self).prefers_dark()
    }

    fn watch(&self) -> WatchToken {
        (**self).watch()
    }

    fn unwatch(&self, token: WatchToken) {
        (**self).unwatch(token)
    }
}

/// Appearance source driven by the host: the OS preference is set by hand
/// and attached listeners are tracked so leaks are observable.
#[derive(Debug, Default)]
pub struct ManualAppearance {
    prefers_dark: AtomicBool,
    next_token: AtomicU64,
    watching: Mutex<Vec<u64>>,
}

impl ManualAppearance {
    pub fn new(prefers_dark: bool) -> Self {
        Self {
            prefers_dark: AtomicBool::new(prefers_dark),
            ..Self::default()
        }
    }

    pub fn set_prefers_dark(&self, prefers_dark: bool) {
        self.prefers_dark.store(prefers_dark, Ordering::SeqCst);
    }

    /// Number of listeners currently attached.
    pub fn active_watches(&self) -> usize {
        self.watching.lock().map(|w| w.len()).unwrap_or(0)
    }
}

impl AppearanceSource for ManualAppearance {
    fn prefers_dark(&self) -> bool {
        self.prefers_dark.load(Ordering::SeqCst)
    }

    fn watch(&self) -> WatchToken {
        let id = self.next_token.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut watching) = self.watching.lock() {
            watching.push(id);
        }
        WatchToken::new(id)
    }

    fn unwatch(&self, token: WatchToken) {
        if let Ok(mut watching) = self.watching.lock() {
            watching.retain(|id| *id != token.id());
        }
    }
}

pub struct ThemeResolver<B: Backing, A: AppearanceSource> {
    backing: B,
    source: A,
    mode: ThemeMode,
    is_dark: bool,
    watch: Option<WatchToken>,
}

impl<B: Backing, A: AppearanceSource> ThemeResolver<B, A> {
    /// Reads the persisted mode (default `System`) and computes the initial state.
    ///
    /// An unrecognized stored mode falls back to `System`.
    pub fn load(backing: B, source: A) -> Result<Self, ThemeError> {
        let mode = match backing.get(THEME_MODE_KEY)? {
            None => ThemeMode::default(),
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|_| {
                tracing::warn!("[Theme] Unrecognized stored mode {raw}, using system");
                ThemeMode::System
            }),
        };

        let mut resolver = Self {
            backing,
            source,
            mode,
            is_dark: false,
            watch: None,
        };
        resolver.sync_watch();
        resolver.is_dark = resolver.resolve();

        tracing::debug!("[Theme] Loaded mode {} (dark: {})", mode, resolver.is_dark);
        Ok(resolver)
    }

    pub fn state(&self) -> ThemeState {
        ThemeState {
            mode: self.mode,
            is_dark: self.is_dark,
        }
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn is_dark(&self) -> bool {
        self.is_dark
    }

    /// Whether an OS listener is currently attached.
    pub fn is_watching(&self) -> bool {
        self.watch.is_some()
    }

    /// Persists `mode` and recomputes the effective theme.
    ///
    /// On a persistence failure the mode and listener are left as they were.
    pub fn set_mode(&mut self, mode: ThemeMode) -> Result<ThemeState, ThemeError> {
        self.backing.set(THEME_MODE_KEY, &encode_json(&mode)?)?;

        self.mode = mode;
        self.sync_watch();
        self.is_dark = self.resolve();

        tracing::debug!("[Theme] Mode set to {} (dark: {})", mode, self.is_dark);
        Ok(self.state())
    }

    /// OS appearance notification entry point.
    ///
    /// Returns the new state if the effective theme changed, `None` if it did
    /// not or if no listener is attached.
    pub fn on_system_appearance_changed(&mut self) -> Option<ThemeState> {
        self.watch.as_ref()?;

        let is_dark = self.source.prefers_dark();
        if is_dark == self.is_dark {
            return None;
        }

        self.is_dark = is_dark;
        Some(self.state())
    }

    fn resolve(&self) -> bool {
        self.mode
            .fixed_is_dark()
            .unwrap_or_else(|| self.source.prefers_dark())
    }

    fn sync_watch(&mut self) {
        match (self.mode, self.watch.take()) {
            (ThemeMode::System, Some(token)) => self.watch = Some(token),
            (ThemeMode::System, None) => self.watch = Some(self.source.watch()),
            (_, Some(token)) => self.source.unwatch(token),
            (_, None) => {}
        }
    }
}

impl<B: Backing, A: AppearanceSource> Drop for ThemeResolver<B, A> {
    fn drop(&mut self) {
        if let Some(token) = self.watch.take() {
            self.source.unwatch(token);
        }
    }
}
