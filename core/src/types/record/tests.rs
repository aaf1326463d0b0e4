use super::*;
use std::time::Duration;

fn record(name: &str, url: &str, last_used: Option<u64>) -> AddressRecord {
    AddressRecord {
        id: RecordId::generate(),
        url: Address::try_from(url).unwrap(),
        name: name.to_string(),
        last_used,
    }
}

#[test]
fn record_serializes_camel_case() {
    let rec = AddressRecord {
        id: RecordId::from("1700000000000"),
        url: Address::try_from("https://memo.example.com").unwrap(),
        name: "Memos".to_string(),
        last_used: Some(1_700_000_000_123),
    };

    let json = serde_json::to_value(&rec).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "id": "1700000000000",
            "url": "https://memo.example.com",
            "name": "Memos",
            "lastUsed": 1_700_000_000_123u64,
        })
    );
}

#[test]
fn record_without_last_used_omits_field() {
    let rec = record("a", "a.example", None);
    let json = serde_json::to_value(&rec).unwrap();
    assert!(json.get("lastUsed").is_none());

    let back: AddressRecord = serde_json::from_value(json).unwrap();
    assert_eq!(back.last_used, None);
}

#[test]
fn recency_treats_missing_as_zero() {
    assert_eq!(record("a", "a.example", None).recency(), 0);
    assert_eq!(record("a", "a.example", Some(42)).recency(), 42);
}

#[test]
fn matches_is_case_insensitive_over_name_and_url() {
    let rec = record("Team Wiki", "https://wiki.Example.com", None);
    assert!(rec.matches("wiki"));
    assert!(rec.matches("TEAM"));
    assert!(rec.matches("example.COM"));
    assert!(!rec.matches("memos"));
}

#[test]
fn generated_ids_are_unique() {
    assert_ne!(RecordId::generate(), RecordId::generate());
}

#[test]
fn epoch_millis_converts_and_clamps() {
    assert_eq!(epoch_millis(UNIX_EPOCH + Duration::from_millis(1234)), 1234);
    assert_eq!(epoch_millis(UNIX_EPOCH - Duration::from_secs(1)), 0);
}
