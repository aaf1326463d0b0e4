//! JSON message envelope for a webview-style host.
//!
//! Every incoming request carries a `requestId` and is answered by exactly one
//! `response` or `error` envelope with the same id. `showAddressInput`,
//! `showAddressManager` and `systemAppearanceChanged` carry no id; they are
//! turned into notifications.

use crate::api::{AddressApi, ThemeControl};
use crate::error::ApiError;
use crate::events::{EventBus, Notification};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use waymark_core::types::{AddressRecord, RecordId, ThemeMode};

/// Messages from the presentation layer.
#[derive(Debug, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum IncomingMessage {
    GetAddresses {
        request_id: u64,
    },
    SaveAddresses {
        request_id: u64,
        addresses: Vec<AddressRecord>,
    },
    GetLastUsedAddress {
        request_id: u64,
    },
    SetLastUsedAddress {
        request_id: u64,
        url: String,
    },
    UpsertAddress {
        request_id: u64,
        url: String,
        #[serde(default)]
        name: Option<String>,
    },
    RemoveAddress {
        request_id: u64,
        id: RecordId,
    },
    GetTheme {
        request_id: u64,
    },
    SetTheme {
        request_id: u64,
        mode: ThemeMode,
    },
    ShowAddressInput,
    ShowAddressManager,
    /// The OS appearance preference changed.
    SystemAppearanceChanged,
}

/// Messages to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(
    tag = "type",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum OutgoingMessage {
    Response {
        request_id: u64,
        payload: Value,
    },
    Error {
        /// Absent only when the request could not be parsed far enough to find it.
        #[serde(skip_serializing_if = "Option::is_none")]
        request_id: Option<u64>,
        kind: String,
        message: String,
    },
    Notification {
        #[serde(flatten)]
        notification: Notification,
    },
}

impl OutgoingMessage {
    pub fn error(request_id: Option<u64>, err: &ApiError) -> Self {
        OutgoingMessage::Error {
            request_id,
            kind: err.kind().to_string(),
            message: err.to_string(),
        }
    }

    fn reply<T: Serialize>(request_id: u64, result: Result<T, ApiError>) -> Self {
        let payload = result.and_then(|value| {
            serde_json::to_value(value).map_err(|e| ApiError::Protocol(e.to_string()))
        });
        match payload {
            Ok(payload) => OutgoingMessage::Response {
                request_id,
                payload,
            },
            Err(e) => OutgoingMessage::error(Some(request_id), &e),
        }
    }
}

impl From<Notification> for OutgoingMessage {
    fn from(notification: Notification) -> Self {
        OutgoingMessage::Notification { notification }
    }
}

/// Dispatches incoming messages to an [`AddressApi`] and a [`ThemeControl`].
pub struct Bridge<A, T> {
    api: A,
    theme: T,
    events: EventBus,
}

impl<A: AddressApi, T: ThemeControl> Bridge<A, T> {
    pub fn new(api: A, theme: T, events: EventBus) -> Self {
        Self { api, theme, events }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn theme(&self) -> &T {
        &self.theme
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Returns the reply for `message`, or `None` for notifications that
    /// succeeded.
    pub async fn handle(&self, message: IncomingMessage) -> Option<OutgoingMessage> {
        let reply = match message {
            IncomingMessage::GetAddresses { request_id } => {
                OutgoingMessage::reply(request_id, self.api.get_addresses().await)
            }
            IncomingMessage::SaveAddresses {
                request_id,
                addresses,
            } => OutgoingMessage::reply(request_id, self.api.save_addresses(addresses).await),
            IncomingMessage::GetLastUsedAddress { request_id } => {
                OutgoingMessage::reply(request_id, self.api.get_last_used_address().await)
            }
            IncomingMessage::SetLastUsedAddress { request_id, url } => {
                OutgoingMessage::reply(request_id, self.api.set_last_used_address(url).await)
            }
            IncomingMessage::UpsertAddress {
                request_id,
                url,
                name,
            } => OutgoingMessage::reply(request_id, self.api.upsert_address(url, name).await),
            IncomingMessage::RemoveAddress { request_id, id } => {
                OutgoingMessage::reply(request_id, self.api.remove_address(id).await)
            }
            IncomingMessage::GetTheme { request_id } => {
                OutgoingMessage::reply(request_id, self.theme.theme_state())
            }
            IncomingMessage::SetTheme { request_id, mode } => {
                let result = self.theme.set_theme_mode(mode);
                if let Ok(state) = &result {
                    self.events.emit(Notification::from(*state));
                }
                OutgoingMessage::reply(request_id, result)
            }
            IncomingMessage::SystemAppearanceChanged => {
                match self.theme.system_appearance_changed() {
                    Ok(Some(state)) => {
                        self.events.emit(Notification::from(state));
                    }
                    Ok(None) => {}
                    Err(e) => return Some(OutgoingMessage::error(None, &e)),
                }
                return None;
            }
            IncomingMessage::ShowAddressInput => {
                self.events.emit(Notification::ShowAddressInput);
                return None;
            }
            IncomingMessage::ShowAddressManager => {
                self.events.emit(Notification::ShowAddressManager);
                return None;
            }
        };
        Some(reply)
    }

    /// Parses `raw`, dispatches it and encodes the reply.
    ///
    /// Unparseable input still gets an `error` envelope, carrying the
    /// `requestId` if one can be found.
    pub async fn handle_json(&self, raw: &str) -> Result<Option<String>, serde_json::Error> {
        let reply = match serde_json::from_str::<IncomingMessage>(raw) {
            Ok(message) => self.handle(message).await,
            Err(e) => {
                tracing::warn!("[Bridge] Failed to parse: {raw}");
                let request_id = serde_json::from_str::<Value>(raw)
                    .ok()
                    .and_then(|v| v.get("requestId").and_then(Value::as_u64));
                Some(OutgoingMessage::error(
                    request_id,
                    &ApiError::Protocol(e.to_string()),
                ))
            }
        };

        reply.map(|r| serde_json::to_string(&r)).transpose()
    }
}
