//! Request/response boundary between the presentation layer and the store.
//!
//! The store lives on a worker thread ([`worker`]) reached through
//! [`client::AddressClient`]; [`api::InProcessApi`] offers the same
//! [`api::AddressApi`] contract without the thread. [`messages::Bridge`] maps
//! JSON envelopes onto that contract and [`orchestrator`] drives the
//! top-level view mode.

pub mod api;
pub mod client;
pub mod error;
pub mod events;
pub mod messages;
pub mod orchestrator;
pub mod worker;

pub use api::{AddressApi, InProcessApi, Navigator, ThemeControl};
pub use client::AddressClient;
pub use error::{ApiError, NavigationError};
pub use events::{EventBus, Notification};
