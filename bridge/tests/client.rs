mod common;

use std::sync::Mutex;
use std::sync::mpsc as std_mpsc;
use std::time::Duration;
use tempfile::TempDir;
use waymark_bridge::messages::Bridge;
use waymark_bridge::{AddressApi, AddressClient, ApiError, EventBus, worker};
use waymark_core::core::AddressStore;
use waymark_core::core::backing::error::BackingError;
use waymark_core::core::backing::{Backing, MemoryBacking, RedbBacking};
use waymark_core::theme::{ManualAppearance, ThemeResolver};
use waymark_core::types::Config;

const TIMEOUT: Duration = Duration::from_secs(5);

fn spawn_client<B: Backing + Send + 'static>(backing: B, timeout: Duration) -> AddressClient {
    let (requests, _handle) = worker::start(AddressStore::new(backing), 8);
    AddressClient::new(requests, timeout)
}

/// Backing whose reads block until the test releases them.
struct StallingBacking {
    gate: Mutex<std_mpsc::Receiver<()>>,
}

impl Backing for StallingBacking {
    fn get(&self, _key: &str) -> Result<Option<String>, BackingError> {
        if let Ok(gate) = self.gate.lock() {
            let _ = gate.recv();
        }
        Ok(None)
    }

    fn set_many(&self, _entries: &[(&str, &str)]) -> Result<(), BackingError> {
        Ok(())
    }
}

/// Verify the client reaches the store through the worker thread.
#[tokio::test]
async fn test_round_trip_through_worker() {
    let temp = TempDir::new().unwrap();
    let backing = RedbBacking::open(&Config {
        base_path: temp.path().to_path_buf(),
    })
    .unwrap();
    let client = spawn_client(backing, TIMEOUT);

    let record = client
        .upsert_address("example.com".to_string(), Some("Example".to_string()))
        .await
        .unwrap();

    assert_eq!(client.get_addresses().await.unwrap(), vec![record.clone()]);
    assert_eq!(
        client.get_last_used_address().await.unwrap(),
        "https://example.com"
    );

    assert!(client.remove_address(record.id).await.unwrap());
    assert!(client.get_addresses().await.unwrap().is_empty());
}

/// Verify a bulk replace with duplicate urls is rejected.
#[tokio::test]
async fn test_save_addresses_rejects_duplicates() {
    let client = spawn_client(MemoryBacking::new(), TIMEOUT);
    let record = client
        .upsert_address("a.com".to_string(), None)
        .await
        .unwrap();

    let err = client
        .save_addresses(vec![record.clone(), record])
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::DuplicateAddress(_)));
    assert_eq!(client.get_addresses().await.unwrap().len(), 1);
}

/// Verify setting the last used address normalizes it and empty clears it.
#[tokio::test]
async fn test_set_last_used_address() {
    let client = spawn_client(MemoryBacking::new(), TIMEOUT);

    let stored = client
        .set_last_used_address("b.com".to_string())
        .await
        .unwrap();
    assert_eq!(stored, "https://b.com");

    client.set_last_used_address(String::new()).await.unwrap();
    assert_eq!(client.get_last_used_address().await.unwrap(), "");
}

/// Verify an unanswered request resolves to a timeout.
#[tokio::test]
async fn test_stalled_worker_times_out() {
    let (release, gate) = std_mpsc::channel();
    let backing = StallingBacking {
        gate: Mutex::new(gate),
    };
    let client = spawn_client(backing, Duration::from_millis(50));

    let err = client.get_addresses().await.unwrap_err();
    assert_eq!(err, ApiError::Timeout(Duration::from_millis(50)));

    drop(release);
}

/// Verify calls after shutdown report a disconnected worker.
#[tokio::test]
async fn test_shutdown_disconnects() {
    let (requests, handle) = worker::start(AddressStore::new(MemoryBacking::new()), 8);
    let client = AddressClient::new(requests, TIMEOUT);

    client.shutdown().await.unwrap();
    tokio::task::spawn_blocking(move || handle.join())
        .await
        .unwrap()
        .unwrap();

    let err = client.get_addresses().await.unwrap_err();
    assert_eq!(err, ApiError::Disconnected);
}

/// Verify every wire request gets exactly one reply with its id.
#[tokio::test]
async fn test_bridge_over_worker_replies_once_per_request() {
    let client = spawn_client(MemoryBacking::new(), TIMEOUT);
    let theme = ThemeResolver::load(MemoryBacking::new(), ManualAppearance::new(false)).unwrap();
    let bridge = Bridge::new(client, Mutex::new(theme), EventBus::new(4));

    let requests = [
        r#"{"type":"upsertAddress","requestId":1,"url":"a.com"}"#,
        r#"{"type":"getAddresses","requestId":2}"#,
        r#"{"type":"setLastUsedAddress","requestId":3,"url":"ftp://x"}"#,
        r#"{"type":"getLastUsedAddress","requestId":4}"#,
        r#"{"type":"setTheme","requestId":5,"mode":"dark"}"#,
    ];

    for (i, raw) in requests.iter().enumerate() {
        let reply = bridge.handle_json(raw).await.unwrap().unwrap();
        let reply: serde_json::Value = serde_json::from_str(&reply).unwrap();
        assert_eq!(reply["requestId"], (i + 1) as u64);
    }
}
