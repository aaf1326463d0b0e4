use super::*;
use waymark_core::core::backing::MemoryBacking;

fn spawn() -> (mpsc::Sender<Request>, JoinHandle<()>) {
    start(AddressStore::new(MemoryBacking::new()), 4)
}

#[tokio::test]
async fn answers_in_arrival_order() {
    let (requests, handle) = spawn();

    let (first_tx, first_rx) = oneshot::channel();
    let (second_tx, second_rx) = oneshot::channel();
    requests
        .send(Request::UpsertAddress {
            url: "a.com".to_string(),
            name: None,
            respond: first_tx,
        })
        .await
        .unwrap();
    requests
        .send(Request::GetAddresses { respond: second_tx })
        .await
        .unwrap();

    let created = first_rx.await.unwrap().unwrap();
    let listed = second_rx.await.unwrap().unwrap();
    assert_eq!(listed, vec![created]);

    requests.send(Request::Shutdown).await.unwrap();
    handle.join().unwrap();
}

#[tokio::test]
async fn store_errors_are_returned_to_caller() {
    let (requests, _handle) = spawn();

    let (tx, rx) = oneshot::channel();
    requests
        .send(Request::UpsertAddress {
            url: "mailto:someone".to_string(),
            name: None,
            respond: tx,
        })
        .await
        .unwrap();

    let err = rx.await.unwrap().unwrap_err();
    assert!(matches!(err, ApiError::InvalidAddress(_)));
}

#[tokio::test]
async fn stops_when_senders_dropped() {
    let (requests, handle) = spawn();
    drop(requests);
    handle.join().unwrap();
}
