use crate::api::AddressApi;
use crate::error::ApiError;
use crate::worker::{Request, Responder};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use waymark_core::types::{AddressRecord, RecordId};

/// [`AddressApi`] backed by the store worker thread.
///
/// Every round trip is bounded by `timeout`; a worker that has stopped
/// surfaces as [`ApiError::Disconnected`].
#[derive(Clone)]
pub struct AddressClient {
    requests: mpsc::Sender<Request>,
    timeout: Duration,
}

impl AddressClient {
    pub fn new(requests: mpsc::Sender<Request>, timeout: Duration) -> Self {
        Self { requests, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Asks the worker to stop after answering everything queued before this call.
    pub async fn shutdown(&self) -> Result<(), ApiError> {
        self.requests
            .send(Request::Shutdown)
            .await
            .map_err(|_| ApiError::Disconnected)
    }

    async fn call<T: Send>(
        &self,
        make: impl FnOnce(Responder<T>) -> Request + Send,
    ) -> Result<T, ApiError> {
        let (respond, response) = oneshot::channel();
        let request = make(respond);

        let round_trip = async {
            self.requests
                .send(request)
                .await
                .map_err(|_| ApiError::Disconnected)?;
            response.await.map_err(|_| ApiError::Disconnected)?
        };

        match tokio::time::timeout(self.timeout, round_trip).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!("[Client] No response within {:?}", self.timeout);
                Err(ApiError::Timeout(self.timeout))
            }
        }
    }
}

impl AddressApi for AddressClient {
    async fn get_addresses(&self) -> Result<Vec<AddressRecord>, ApiError> {
        self.call(|respond| Request::GetAddresses { respond }).await
    }

    async fn save_addresses(&self, records: Vec<AddressRecord>) -> Result<(), ApiError> {
        self.call(|respond| Request::SaveAddresses { records, respond })
            .await
    }

    async fn get_last_used_address(&self) -> Result<String, ApiError> {
        self.call(|respond| Request::GetLastUsedAddress { respond })
            .await
    }

    async fn set_last_used_address(&self, url: String) -> Result<String, ApiError> {
        self.call(|respond| Request::SetLastUsedAddress { url, respond })
            .await
    }

    async fn upsert_address(
        &self,
        url: String,
        name: Option<String>,
    ) -> Result<AddressRecord, ApiError> {
        self.call(|respond| Request::UpsertAddress { url, name, respond })
            .await
    }

    async fn remove_address(&self, id: RecordId) -> Result<bool, ApiError> {
        self.call(|respond| Request::RemoveAddress { id, respond })
            .await
    }
}
