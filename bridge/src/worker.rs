//! Background worker thread owning the [`AddressStore`].
//!
//! Requests arrive on a bounded channel and are answered strictly in arrival
//! order, each through its own oneshot responder.

use crate::error::ApiError;
use std::thread::{self, JoinHandle};
use std::time::SystemTime;
use tokio::sync::{mpsc, oneshot};
use waymark_core::core::AddressStore;
use waymark_core::core::backing::Backing;
use waymark_core::types::{AddressRecord, RecordId};

pub type Responder<T> = oneshot::Sender<Result<T, ApiError>>;

pub enum Request {
    GetAddresses {
        respond: Responder<Vec<AddressRecord>>,
    },
    SaveAddresses {
        records: Vec<AddressRecord>,
        respond: Responder<()>,
    },
    GetLastUsedAddress {
        respond: Responder<String>,
    },
    SetLastUsedAddress {
        url: String,
        respond: Responder<String>,
    },
    UpsertAddress {
        url: String,
        name: Option<String>,
        respond: Responder<AddressRecord>,
    },
    RemoveAddress {
        id: RecordId,
        respond: Responder<bool>,
    },
    /// Stops the loop once every earlier request has been answered.
    Shutdown,
}

/// Starts the worker thread.
///
/// The worker owns `store` until it receives [`Request::Shutdown`] or every
/// sender is dropped.
pub fn start<B>(store: AddressStore<B>, capacity: usize) -> (mpsc::Sender<Request>, JoinHandle<()>)
where
    B: Backing + Send + 'static,
{
    let (request_tx, request_rx) = mpsc::channel::<Request>(capacity.max(1));

    let handle = thread::spawn(move || {
        tracing::debug!("[Worker] Started");
        worker_loop(store, request_rx);
        tracing::debug!("[Worker] Stopped");
    });

    (request_tx, handle)
}

fn worker_loop<B: Backing>(mut store: AddressStore<B>, mut requests: mpsc::Receiver<Request>) {
    while let Some(request) = requests.blocking_recv() {
        match request {
            Request::GetAddresses { respond } => {
                reply(respond, store.list());
            }
            Request::SaveAddresses { records, respond } => {
                reply(respond, store.replace_all(&records));
            }
            Request::GetLastUsedAddress { respond } => {
                reply(respond, store.last_selected());
            }
            Request::SetLastUsedAddress { url, respond } => {
                reply(respond, store.set_last_selected(&url));
            }
            Request::UpsertAddress { url, name, respond } => {
                reply(respond, store.upsert(&url, name.as_deref(), SystemTime::now()));
            }
            Request::RemoveAddress { id, respond } => {
                reply(respond, store.remove(&id));
            }
            Request::Shutdown => break,
        }
    }
}

fn reply<T, E: Into<ApiError>>(respond: Responder<T>, result: Result<T, E>) {
    let result = result.map_err(Into::into);
    if let Err(e) = &result {
        tracing::warn!("[Worker] Request failed: {e}");
    }
    // The caller may have timed out and dropped its receiver.
    let _ = respond.send(result);
}

#[cfg(test)]
mod tests;
