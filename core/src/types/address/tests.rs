use super::*;

#[test]
fn address_keeps_explicit_https() {
    let address = Address::try_from("https://example.com").unwrap();
    assert_eq!(address.as_str(), "https://example.com");
}

#[test]
fn address_keeps_explicit_http() {
    let address = Address::try_from("http://example.com/path?q=1").unwrap();
    assert_eq!(address.as_str(), "http://example.com/path?q=1");
}

#[test]
fn address_prefixes_missing_scheme() {
    let address = Address::try_from("memo.example.org").unwrap();
    assert_eq!(address.as_str(), "https://memo.example.org");
}

#[test]
fn address_trims_whitespace() {
    let address = Address::try_from("  example.com/notes  ").unwrap();
    assert_eq!(address.as_str(), "https://example.com/notes");
}

#[test]
fn address_scheme_detection_ignores_case() {
    let address = Address::try_from("HTTP://Example.com").unwrap();
    assert_eq!(address.as_str(), "HTTP://Example.com");
}

#[test]
fn address_prefixes_when_url_appears_later() {
    let address = Address::try_from("example.com/login?next=https://example.com/home").unwrap();
    assert_eq!(
        address.as_str(),
        "https://example.com/login?next=https://example.com/home"
    );

    let path = Address::try_from("example.com/redirect/http://other.org").unwrap();
    assert_eq!(path.as_str(), "https://example.com/redirect/http://other.org");
}

#[test]
fn explicit_scheme_must_lead() {
    assert!(has_explicit_scheme("https://x.com"));
    assert!(has_explicit_scheme("svn+ssh://x.com"));
    assert!(!has_explicit_scheme("x.com/?u=https://y.com"));
    assert!(!has_explicit_scheme("://x.com"));
    assert!(!has_explicit_scheme("1http://x.com"));
}

#[test]
fn address_rejects_empty_string() {
    Address::try_from("").unwrap_err();
    Address::try_from("   ").unwrap_err();
}

#[test]
fn address_rejects_other_schemes() {
    Address::try_from("ftp://example.com").unwrap_err();
    Address::try_from("file:///etc/hosts").unwrap_err();
}

#[test]
fn address_rejects_malformed_host() {
    Address::try_from("exa mple.com").unwrap_err();
    Address::try_from("https://").unwrap_err();
}

#[test]
fn default_name_uses_host() {
    let address = Address::try_from("https://notes.example.com:8443/a/b").unwrap();
    assert_eq!(address.default_name(), "notes.example.com");
}

#[test]
fn default_name_for_ip_hosts() {
    let v4 = Address::try_from("192.168.1.20:5230").unwrap();
    assert_eq!(v4.default_name(), "192.168.1.20");

    let v6 = Address::try_from("http://[::1]:8080").unwrap();
    assert_eq!(v6.default_name(), "[::1]");
}

#[test]
fn address_serializes_as_plain_string() {
    let address = Address::try_from("example.com").unwrap();
    let json = serde_json::to_string(&address).unwrap();
    assert_eq!(json, "\"https://example.com\"");

    let back: Address = serde_json::from_str(&json).unwrap();
    assert_eq!(back, address);
}

#[test]
fn address_deserialize_rejects_invalid() {
    serde_json::from_str::<Address>("\"ftp://nope\"").unwrap_err();
}
