//! Property tests over arbitrary letter requests.

use proptest::prelude::*;
use surat_core::{CalendarDate, EpochMillis, IssuerId, RequestId};
use surat_proof::{
    DataUriEncoder, LetterRequest, ProofIssuer, ProofVerifier, RejectionReason, Resident,
};
use surat_store::MemoryRecordStore;

fn arb_request() -> impl Strategy<Value = LetterRequest> {
    (
        any::<u64>(),
        "[0-9]{3}/[A-Z]{2}/20[0-9]{2}",
        "[A-Za-z]{1,12}( [A-Za-z]{1,12}){0,2}",
        "[0-9]{16}",
        (1920i32..2024, 1u32..=12, 1u32..=28),
    )
        .prop_map(|(id, number, name, nik, (y, m, d))| LetterRequest {
            id: RequestId::new(id),
            letter_number: number,
            resident: Some(Resident {
                name,
                national_id: nik,
                date_of_birth: CalendarDate::from_ymd(y, m, d).ok(),
            }),
        })
}

fn issue(req: &LetterRequest, issuer: u64, ts: i64) -> (MemoryRecordStore, String) {
    let store = MemoryRecordStore::new();
    let proof = ProofIssuer::new(store.clone(), DataUriEncoder)
        .issue_proof_at(req, IssuerId::new(issuer), EpochMillis::from_millis(ts))
        .unwrap()
        .proof_string;
    (store, proof)
}

proptest! {
    #[test]
    fn issued_proofs_verify(req in arb_request(), issuer in any::<u64>(), ts in 0i64..4_102_444_800_000) {
        let (store, proof) = issue(&req, issuer, ts);
        let result = ProofVerifier::new(store).verify(&proof);
        prop_assert!(result.is_valid);
        let data = result.data.unwrap();
        prop_assert_eq!(data.request_id, req.id);
        prop_assert_eq!(&data.letter_number, &req.letter_number);
        prop_assert_eq!(data.issued_at_epoch_millis.as_millis(), ts);
    }

    #[test]
    fn issuance_is_deterministic(req in arb_request(), ts in 0i64..4_102_444_800_000) {
        let (_, a) = issue(&req, 7, ts);
        let (_, b) = issue(&req, 7, ts);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn shifted_timestamp_is_rejected(req in arb_request(), ts in 1i64..4_102_444_800_000) {
        let (store, proof) = issue(&req, 7, ts);
        let needle = format!("\"issuedAtEpochMillis\":{ts}");
        let tampered = proof.replace(&needle, &format!("\"issuedAtEpochMillis\":{}", ts - 1));
        prop_assert_ne!(&tampered, &proof);
        let verifier = ProofVerifier::new(store);
        prop_assert_eq!(
            verifier.inspect(&tampered).rejection(),
            Some(RejectionReason::DigestMismatch)
        );
    }

    #[test]
    fn arbitrary_text_is_never_valid(input in ".{0,256}") {
        let (store, _) = issue(
            &LetterRequest {
                id: RequestId::new(1),
                letter_number: "001/DS/2024".into(),
                resident: Some(Resident {
                    name: "Sri".into(),
                    national_id: "3201010101000001".into(),
                    date_of_birth: CalendarDate::from_ymd(2000, 5, 1).ok(),
                }),
            },
            7,
            0,
        );
        prop_assert!(!ProofVerifier::new(store).verify(&input).is_valid);
    }
}
