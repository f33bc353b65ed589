use std::sync::Arc;

use labcheckout::{
    checkout::{CheckoutErrorKind, CheckoutPolicy, CheckoutService, MemoryAuditSink},
    driver::{RawCheckoutRequest, run_batch, summarize},
};

use super::{CABLE, METER, R1, R2, SCOPE, STUDENT, borrows_of, seed_assets, seed_requesters};

fn batch_service() -> (CheckoutService, Arc<MemoryAuditSink>) {
    let audit = Arc::new(MemoryAuditSink::new());
    let service = CheckoutService::new(
        seed_requesters(),
        seed_assets(),
        CheckoutPolicy::default(),
        audit.clone(),
    );
    (service, audit)
}

#[test]
fn demo_batch_reports_each_outcome_in_order() {
    let (mut service, _) = batch_service();
    let requests = vec![
        RawCheckoutRequest::new(R1, CABLE, 5),
        RawCheckoutRequest::new(R1, "BAD-1", 2),
        RawCheckoutRequest::new(R2, SCOPE, 2),
    ];

    let outcomes = run_batch(&mut service, &requests);
    assert_eq!(outcomes.len(), 3);

    let receipt = outcomes[0].result.as_ref().expect("first request succeeds");
    assert_eq!(receipt.effective_hours, 3);
    assert_eq!(
        outcomes[1].result.as_ref().expect_err("malformed asset").kind,
        CheckoutErrorKind::Format
    );
    assert_eq!(
        outcomes[2].result.as_ref().expect_err("fined requester").kind,
        CheckoutErrorKind::Policy
    );

    let summary = summarize(&outcomes);
    assert_eq!(summary.succeeded, 1);
    assert_eq!(summary.failed_total(), 2);
    assert_eq!(summary.failed.get(&CheckoutErrorKind::Format), Some(&1));
    assert_eq!(summary.failed.get(&CheckoutErrorKind::Policy), Some(&1));
}

#[test]
fn construction_failures_do_not_stop_the_batch() {
    let (mut service, audit) = batch_service();
    let requests = vec![
        RawCheckoutRequest::new(STUDENT, CABLE, 0),
        RawCheckoutRequest::new(STUDENT, CABLE, -3),
        RawCheckoutRequest::new(STUDENT, CABLE, 7),
        RawCheckoutRequest::new(STUDENT, METER, 2),
    ];

    let outcomes = run_batch(&mut service, &requests);
    for outcome in &outcomes[..3] {
        assert_eq!(
            outcome.result.as_ref().expect_err("hours out of range").kind,
            CheckoutErrorKind::Format
        );
    }
    assert!(outcomes[3].result.is_ok());
    assert_eq!(borrows_of(&service, STUDENT), 1);

    let records = audit.records();
    assert_eq!(records.len(), 7);
    assert!(records[0].starts_with("format_error: "));
    assert_eq!(records[1], "attempt finished for requester=STU55555, asset=LAB-101");
    assert_eq!(records[6], "attempt finished for requester=STU55555, asset=LAB-404");
}

#[test]
fn later_requests_observe_earlier_commits() {
    let (mut service, _) = batch_service();
    let requests = vec![
        RawCheckoutRequest::new(R1, METER, 2),
        RawCheckoutRequest::new(STUDENT, METER, 2),
    ];

    let outcomes = run_batch(&mut service, &requests);
    assert!(outcomes[0].result.is_ok());
    assert_eq!(
        outcomes[1].result.as_ref().expect_err("already lent").kind,
        CheckoutErrorKind::Conflict
    );
}
