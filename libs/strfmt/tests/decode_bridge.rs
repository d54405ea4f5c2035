//! Populating typed structures from untyped JSON documents.

use serde::Deserialize;
use serde_json::{json, Value};
use strfmt::{
    Base64, CreditCard, Date, DateTime, Decoded, Duration, Email, HexColor, Hostname, Ipv4, Ipv6,
    Isbn, Isbn10, Isbn13, Mac, Password, Registry, RgbColor, Ssn, Uri, Uuid, Uuid3, Uuid4, Uuid5,
};

fn fixture() -> Value {
    json!({
        "d": "2014-12-15",
        "dt": "2012-03-02T15:06:05.999999999Z",
        "dur": "5s",
        "uri": "http://www.dummy.com",
        "eml": "dummy@dummy.com",
        "uuid": "a8098c1a-f86e-11da-bd1a-00112444be1e",
        "uuid3": "bcd02e22-68f0-3046-a512-327cca9def8f",
        "uuid4": "025b0d74-00a2-4048-bf57-227c5111bb34",
        "uuid5": "886313e1-3b8a-5372-9b90-0c9aee199e5d",
        "hn": "somewhere.com",
        "ipv4": "192.168.254.1",
        "ipv6": "::1",
        "mac": "01:02:03:04:05:06",
        "isbn": "0321751043",
        "isbn10": "0321751043",
        "isbn13": "978-0321751041",
        "hexcolor": "#FFFFFF",
        "rgbcolor": "rgb(255,255,255)",
        "pw": "super secret stuff here",
        "ssn": "111-11-1111",
        "creditcard": "4111-1111-1111-1111",
        "b64": "ZWxpemFiZXRocG9zZXk=",
    })
}

const FIELDS: &[(&str, &str, &str)] = &[
    ("d", "date", "2014-12-15"),
    ("dt", "date-time", "2012-03-02T15:06:05.999Z"),
    ("dur", "duration", "5s"),
    ("uri", "uri", "http://www.dummy.com"),
    ("eml", "email", "dummy@dummy.com"),
    ("uuid", "uuid", "a8098c1a-f86e-11da-bd1a-00112444be1e"),
    ("uuid3", "uuid3", "bcd02e22-68f0-3046-a512-327cca9def8f"),
    ("uuid4", "uuid4", "025b0d74-00a2-4048-bf57-227c5111bb34"),
    ("uuid5", "uuid5", "886313e1-3b8a-5372-9b90-0c9aee199e5d"),
    ("hn", "hostname", "somewhere.com"),
    ("ipv4", "ipv4", "192.168.254.1"),
    ("ipv6", "ipv6", "::1"),
    ("mac", "mac", "01:02:03:04:05:06"),
    ("isbn", "isbn", "0321751043"),
    ("isbn10", "isbn10", "0321751043"),
    ("isbn13", "isbn13", "978-0321751041"),
    ("hexcolor", "hexcolor", "#FFFFFF"),
    ("rgbcolor", "rgbcolor", "rgb(255,255,255)"),
    ("pw", "password", "super secret stuff here"),
    ("ssn", "ssn", "111-11-1111"),
    ("creditcard", "creditcard", "4111-1111-1111-1111"),
    ("b64", "byte", "ZWxpemFiZXRocG9zZXk="),
];

#[test]
fn test_decode_hook_over_every_field() {
    let registry = Registry::new();
    let Value::Object(document) = fixture() else {
        panic!("fixture is an object");
    };

    for (field, format, canonical) in FIELDS {
        let source = document[*field].clone();
        let decoded = registry
            .decode_hook(format, source)
            .unwrap_or_else(|e| panic!("{field}: {e}"));
        let value = decoded
            .into_format()
            .unwrap_or_else(|| panic!("{field} should decode"));
        assert_eq!(value.to_text(), *canonical, "field {field}");
    }
}

#[test]
fn test_decode_hook_leaves_other_kinds_alone() {
    let registry = Registry::new();
    let decoded = registry.decode_hook("date", json!(20141215)).unwrap();
    assert!(matches!(decoded, Decoded::Passthrough(v) if v == json!(20141215)));
}

#[derive(Debug, Deserialize)]
struct Everything {
    d: Date,
    dt: DateTime,
    dur: Duration,
    uri: Uri,
    eml: Email,
    uuid: Uuid,
    uuid3: Uuid3,
    uuid4: Uuid4,
    uuid5: Uuid5,
    hn: Hostname,
    ipv4: Ipv4,
    ipv6: Ipv6,
    mac: Mac,
    isbn: Isbn,
    isbn10: Isbn10,
    isbn13: Isbn13,
    hexcolor: HexColor,
    rgbcolor: RgbColor,
    pw: Password,
    ssn: Ssn,
    creditcard: CreditCard,
    b64: Base64,
}

#[test]
fn test_typed_structure_from_document() {
    let everything: Everything = serde_json::from_value(fixture()).unwrap();

    assert_eq!(everything.d.to_string(), "2014-12-15");
    assert_eq!(everything.dt.timestamp_millis(), 1_330_700_765_999);
    assert_eq!(everything.dur, Duration::from_nanos(5_000_000_000));
    assert_eq!(everything.uri.as_str(), "http://www.dummy.com");
    assert_eq!(everything.eml.as_str(), "dummy@dummy.com");
    assert_eq!(
        everything.uuid.to_string(),
        "a8098c1a-f86e-11da-bd1a-00112444be1e"
    );
    assert!(!everything.uuid3.is_nil());
    assert!(!everything.uuid4.is_nil());
    assert!(!everything.uuid5.is_nil());
    assert_eq!(everything.hn.as_str(), "somewhere.com");
    assert_eq!(everything.ipv4.as_str(), "192.168.254.1");
    assert_eq!(everything.ipv6.as_str(), "::1");
    assert_eq!(everything.mac.as_str(), "01:02:03:04:05:06");
    assert_eq!(everything.isbn, everything.isbn10.as_str().parse::<Isbn>().unwrap());
    assert_eq!(everything.isbn13.as_str(), "978-0321751041");
    assert_eq!(everything.hexcolor.as_str(), "#FFFFFF");
    assert_eq!(everything.rgbcolor.as_str(), "rgb(255,255,255)");
    assert_eq!(everything.pw.as_str(), "super secret stuff here");
    assert_eq!(everything.ssn.as_str(), "111-11-1111");
    assert_eq!(everything.creditcard.as_str(), "4111-1111-1111-1111");
    assert_eq!(everything.b64.as_bytes(), b"elizabethposey");
}

#[test]
fn test_typed_structure_rejects_bad_field() {
    let mut document = fixture();
    document["uuid4"] = json!("bcd02e22-68f0-3046-a512-327cca9def8f");
    let err = serde_json::from_value::<Everything>(document).unwrap_err();
    assert!(err.to_string().contains("uuid4"), "{err}");
}
