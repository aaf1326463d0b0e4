//! Navigation orchestrator.
//!
//! Drives the top-level view mode from startup, submit, select and delete
//! actions. State changes are computed by [`machine::transition`]; this
//! module performs the store calls and executes the resulting effects.

use crate::api::{AddressApi, Navigator};
use crate::error::ApiError;
use crate::events::Notification;
use waymark_core::types::{AddressRecord, RecordId};
use waymark_core::views;

pub mod machine;

pub use machine::{Effect, Event, Mode, State, transition};

/// What the presentation layer should do after an action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The page for this url was requested.
    Navigated(String),
    /// The target was already selected; no page load was issued.
    AlreadyCurrent,
    /// Nothing to render; show the current mode.
    Idle,
}

pub struct Orchestrator<A, N> {
    api: A,
    navigator: N,
    state: State,
    /// Last known collection, updated after every successful mutation.
    addresses: Vec<AddressRecord>,
    recent_limit: usize,
}

impl<A: AddressApi, N: Navigator> Orchestrator<A, N> {
    pub fn new(api: A, navigator: N) -> Self {
        Self {
            api,
            navigator,
            state: State::default(),
            addresses: Vec::new(),
            recent_limit: views::RECENT_LIMIT,
        }
    }

    pub fn with_recent_limit(mut self, limit: usize) -> Self {
        self.recent_limit = limit;
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    pub fn current(&self) -> &str {
        &self.state.current
    }

    pub fn addresses(&self) -> &[AddressRecord] {
        &self.addresses
    }

    pub fn recent(&self) -> Vec<AddressRecord> {
        views::recent(&self.addresses, self.recent_limit)
    }

    pub fn manage(&self, filter: Option<&str>) -> Vec<AddressRecord> {
        views::manage(&self.addresses, &self.state.current, filter)
    }

    /// Navigates to the last selected address if it still exists, otherwise
    /// shows the input view.
    ///
    /// A failed read or a failed navigation also shows the input view, and the
    /// error is returned.
    pub async fn startup(&mut self) -> Result<Outcome, ApiError> {
        let (addresses, last_selected) = match self.load().await {
            Ok(loaded) => loaded,
            Err(e) => {
                tracing::warn!("[Orchestrator] Startup read failed: {e}");
                self.apply(Event::StartupFailed);
                return Err(e);
            }
        };

        let known = addresses.iter().any(|r| r.url.as_str() == last_selected);
        self.addresses = addresses;

        let effects = self.apply(Event::Started {
            last_selected,
            known,
        });
        match self.run(effects).await {
            Err(e @ ApiError::Navigation(_)) => {
                self.apply(Event::StartupFailed);
                Err(e)
            }
            other => other,
        }
    }

    /// Reloads the collection and the last selection without navigating or
    /// changing mode.
    pub async fn refresh(&mut self) -> Result<(), ApiError> {
        let (addresses, last_selected) = self.load().await?;
        self.addresses = addresses;
        self.state.current = last_selected;
        Ok(())
    }

    /// Saves `input` and navigates to its normalized form.
    ///
    /// Invalid input returns [`ApiError::InvalidAddress`] with mode and store
    /// unchanged. A navigation failure does not undo the save.
    pub async fn submit(&mut self, input: &str, name: Option<&str>) -> Result<Outcome, ApiError> {
        let result = self
            .api
            .upsert_address(input.to_string(), name.map(str::to_string))
            .await;

        let event = match result {
            Ok(record) => {
                let url = record.url.to_string();
                self.remember(record);
                Event::Submitted { url }
            }
            Err(ApiError::InvalidAddress(message)) => Event::Rejected { message },
            Err(e) => return Err(e),
        };

        let effects = self.apply(event);
        self.run(effects).await
    }

    /// Activates an existing record. Selecting the current address is a
    /// successful no-op reported as [`Outcome::AlreadyCurrent`].
    pub async fn select(&mut self, record: &AddressRecord) -> Result<Outcome, ApiError> {
        let (next, effects) = transition(
            &self.state,
            Event::Selected {
                url: record.url.to_string(),
            },
        );

        if effects.contains(&Effect::AlreadyCurrent) {
            return self.run(effects).await;
        }

        let updated = self
            .api
            .upsert_address(record.url.to_string(), Some(record.name.clone()))
            .await?;
        self.remember(updated);
        self.state = next;

        self.run(effects).await
    }

    /// Removes the record with `id` from the collection.
    ///
    /// Deleting the current selection leaves it stale; nothing is reselected.
    pub async fn delete(&mut self, id: &RecordId) -> Result<bool, ApiError> {
        let mut records = self.api.get_addresses().await?;
        let before = records.len();
        records.retain(|r| &r.id != id);

        if records.len() != before {
            self.api.save_addresses(records.clone()).await?;
        }

        let removed = records.len() != before;
        self.addresses = records;
        Ok(removed)
    }

    pub fn show_input(&mut self) {
        self.apply(Event::ShowInput);
    }

    pub fn show_manager(&mut self) {
        self.apply(Event::ShowManager);
    }

    pub fn handle_notification(&mut self, notification: &Notification) {
        match notification {
            Notification::ShowAddressInput => self.show_input(),
            Notification::ShowAddressManager => self.show_manager(),
            Notification::ThemeChanged { .. } => {}
        }
    }

    async fn load(&self) -> Result<(Vec<AddressRecord>, String), ApiError> {
        let last_selected = self.api.get_last_used_address().await?;
        let addresses = self.api.get_addresses().await?;
        Ok((addresses, last_selected))
    }

    fn remember(&mut self, record: AddressRecord) {
        match self.addresses.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => *existing = record,
            None => self.addresses.push(record),
        }
    }

    fn apply(&mut self, event: Event) -> Vec<Effect> {
        let (next, effects) = transition(&self.state, event);
        self.state = next;
        effects
    }

    async fn run(&self, effects: Vec<Effect>) -> Result<Outcome, ApiError> {
        let mut outcome = Outcome::Idle;

        for effect in effects {
            match effect {
                Effect::Navigate(url) => {
                    if let Err(e) = self.navigator.navigate_to_address(&url).await {
                        tracing::warn!("[Orchestrator] Navigation to {url} failed: {e}");
                        return Err(e.into());
                    }
                    outcome = Outcome::Navigated(url);
                }
                Effect::AlreadyCurrent => outcome = Outcome::AlreadyCurrent,
                Effect::ReportInvalid(message) => return Err(ApiError::InvalidAddress(message)),
            }
        }

        Ok(outcome)
    }
}
