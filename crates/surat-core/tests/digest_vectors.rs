//! # Pinned Digest Vectors
//!
//! Proofs printed on paper outlive the software that issued them. These
//! vectors pin the exact canonical bytes and SHA-256 digests for known
//! inputs; if any of them changes, every previously issued letter would
//! stop verifying.

use surat_core::{sha256_digest, CanonicalBytes, CalendarDate, ContentDigest, EpochMillis};

fn hex_of(data: &impl serde::Serialize) -> String {
    let cb = CanonicalBytes::new(data).expect("canonicalization should succeed");
    sha256_digest(&cb).to_hex()
}

#[test]
fn simple_dict_vector() {
    let data = serde_json::json!({"b": 2, "a": 1, "c": "hello"});
    let cb = CanonicalBytes::new(&data).unwrap();
    assert_eq!(cb.as_str(), r#"{"a":1,"b":2,"c":"hello"}"#);
    assert_eq!(
        hex_of(&data),
        "264be526dd59f5bed5c756e96e5a6a08f285ca424658f70b981f2554b4709121"
    );
}

#[test]
fn letter_payload_vector() {
    #[derive(serde::Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Resident {
        name: &'static str,
        national_id: &'static str,
        date_of_birth: CalendarDate,
    }

    #[derive(serde::Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Payload {
        request_id: u64,
        letter_number: &'static str,
        resident: Resident,
        issued_at_epoch_millis: EpochMillis,
    }

    let payload = Payload {
        request_id: 42,
        letter_number: "001/DS/2024",
        resident: Resident {
            name: "Sri",
            national_id: "3201010101000001",
            date_of_birth: CalendarDate::from_ymd(2000, 5, 1).unwrap(),
        },
        issued_at_epoch_millis: EpochMillis::from_millis(1_714_521_600_000),
    };

    let cb = CanonicalBytes::new(&payload).unwrap();
    assert_eq!(
        cb.as_str(),
        r#"{"issuedAtEpochMillis":1714521600000,"letterNumber":"001/DS/2024","requestId":42,"resident":{"dateOfBirth":"2000-05-01","name":"Sri","nationalId":"3201010101000001"}}"#
    );
    assert_eq!(
        hex_of(&payload),
        "43100002fc355978ca3206191bc4053bf539d473838e523573788d29fd386eb9"
    );
}

#[test]
fn digest_parses_back_from_vector() {
    let hex = "43100002fc355978ca3206191bc4053bf539d473838e523573788d29fd386eb9";
    let digest: ContentDigest = hex.parse().unwrap();
    assert_eq!(digest.to_string(), hex);
}
