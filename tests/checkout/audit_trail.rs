use labcheckout::checkout::CheckoutRequest;

use super::{CABLE, MOUSE, R1, R2, SCOPE, seeded_service};

#[test]
fn given_success_when_checkout_then_only_completion_is_recorded() {
    let (mut service, audit) = seeded_service();
    let request = CheckoutRequest::new(R1, CABLE, 2).expect("request should build");
    service.checkout(&request).expect("checkout should succeed");

    assert_eq!(
        audit.records(),
        vec!["attempt finished for requester=KRG20281, asset=LAB-101"]
    );
}

#[test]
fn given_failure_when_checkout_then_failure_precedes_completion() {
    let (mut service, audit) = seeded_service();
    let request = CheckoutRequest::new(R2, SCOPE, 2).expect("request should build");
    let _ = service.checkout(&request);

    assert_eq!(
        audit.records(),
        vec![
            "policy_error: outstanding fine",
            "attempt finished for requester=ABC12345, asset=LAB-202",
        ]
    );
}

#[test]
fn every_attempt_is_recorded_even_when_input_is_malformed() {
    let (mut service, audit) = seeded_service();
    let malformed = CheckoutRequest::new("bad id", "BAD-1", 2).expect("request should build");
    let conflicting = CheckoutRequest::new(R1, MOUSE, 2).expect("request should build");
    let _ = service.checkout(&malformed);
    let _ = service.checkout(&conflicting);

    let records = audit.records();
    assert_eq!(records.len(), 4);
    assert!(records[0].starts_with("format_error: "));
    assert_eq!(records[1], "attempt finished for requester=bad id, asset=BAD-1");
    assert!(records[2].starts_with("conflict_error: "));
    assert_eq!(records[3], "attempt finished for requester=KRG20281, asset=LAB-303");
}
