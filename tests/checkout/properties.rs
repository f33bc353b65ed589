use labcheckout::checkout::{
    Asset, AssetDirectory, CheckoutErrorKind, CheckoutRequest, CheckoutService, Requester,
    RequesterDirectory,
};

use super::{CABLE, METER, MOUSE, R1, R2, SCOPE, borrows_of, is_available, seeded_service};

#[test]
fn fined_requester_is_always_rejected_by_policy() {
    for asset_id in [CABLE, SCOPE, MOUSE, METER, "LAB-999"] {
        for hours in 1..=6 {
            let (mut service, _) = seeded_service();
            let request = CheckoutRequest::new(R2, asset_id, hours).expect("request should build");
            let err = service.checkout(&request).expect_err("fined requester");
            assert_eq!(
                err.kind,
                CheckoutErrorKind::Policy,
                "asset={asset_id} hours={hours}"
            );
        }
    }
}

#[test]
fn any_fine_amount_blocks_checkout() {
    for fine in [1, 50, u64::MAX] {
        let mut service = CheckoutService::with_defaults(
            RequesterDirectory::from_requesters([
                Requester::new("KRG00001", "Fined").with_fine_balance(fine),
            ]),
            AssetDirectory::from_assets([Asset::new(CABLE, "HDMI Cable", true, 1)]),
        );
        let request = CheckoutRequest::new("KRG00001", CABLE, 1).expect("request should build");
        let err = service.checkout(&request).expect_err("fine must block");
        assert_eq!(err.message, "outstanding fine");
    }
}

#[test]
fn requesters_at_or_over_limit_are_rejected_by_policy() {
    for active_borrows in [2, 3, 10, u32::MAX] {
        let mut service = CheckoutService::with_defaults(
            RequesterDirectory::from_requesters([
                Requester::new("KRG00002", "Busy").with_active_borrows(active_borrows),
            ]),
            AssetDirectory::from_assets([Asset::new(CABLE, "HDMI Cable", true, 1)]),
        );
        let request = CheckoutRequest::new("KRG00002", CABLE, 2).expect("request should build");
        let err = service.checkout(&request).expect_err("limit reached");
        assert_eq!(err.kind, CheckoutErrorKind::Policy);
        assert_eq!(err.message, "borrow limit reached");
        assert!(
            service.assets().find(CABLE).expect("seeded").available,
            "asset must stay available"
        );
    }
}

#[test]
fn restricted_tier_rejects_every_unprivileged_identifier() {
    let unprivileged = ["ABC12345", "XKRG1234", "krg12345", "KR-G1234", "STU55555"];
    let mut requesters = RequesterDirectory::new();
    for id in unprivileged {
        requesters.add(Requester::new(id, "Student"));
    }
    let mut service = CheckoutService::with_defaults(
        requesters,
        AssetDirectory::from_assets([Asset::new(SCOPE, "Oscilloscope", true, 3)]),
    );

    for id in unprivileged {
        let request = CheckoutRequest::new(id, SCOPE, 2).expect("request should build");
        let err = service.checkout(&request).expect_err("restricted asset");
        assert_eq!(err.kind, CheckoutErrorKind::Security, "requester={id}");
    }
    assert!(service.assets().find(SCOPE).expect("seeded").available);
}

#[test]
fn levels_below_restricted_tier_are_open_to_everyone() {
    for level in [1, 2] {
        let mut service = CheckoutService::with_defaults(
            RequesterDirectory::from_requesters([Requester::new("ABC00000", "Student")]),
            AssetDirectory::from_assets([Asset::new("LAB-500", "Soldering Iron", true, level)]),
        );
        let request = CheckoutRequest::new("ABC00000", "LAB-500", 2).expect("request should build");
        service
            .checkout(&request)
            .unwrap_or_else(|err| panic!("level {level} should be open: {err}"));
    }
}

#[test]
fn repeated_checkout_of_unavailable_asset_conflicts_without_side_effects() {
    let (mut service, _) = seeded_service();
    let request = CheckoutRequest::new(R1, MOUSE, 2).expect("request should build");

    for _ in 0..2 {
        let err = service.checkout(&request).expect_err("asset unavailable");
        assert_eq!(err.kind, CheckoutErrorKind::Conflict);
        assert_eq!(borrows_of(&service, R1), 1);
    }
}

#[test]
fn cable_cap_applies_to_every_duration_above_three() {
    for hours in 1..=6 {
        let (mut service, _) = seeded_service();
        let request = CheckoutRequest::new(R1, CABLE, hours).expect("request should build");
        let receipt = service.checkout(&request).expect("checkout should succeed");
        assert_eq!(receipt.effective_hours, hours.min(3), "hours={hours}");
        assert_eq!(receipt.requested_hours, hours);
    }
}

#[test]
fn borrow_count_only_grows_on_success() {
    let (mut service, _) = seeded_service();
    let before = borrows_of(&service, R1);

    let failing = CheckoutRequest::new(R1, MOUSE, 1).expect("request should build");
    let _ = service.checkout(&failing);
    assert_eq!(borrows_of(&service, R1), before);

    let succeeding = CheckoutRequest::new(R1, METER, 1).expect("request should build");
    service.checkout(&succeeding).expect("checkout should succeed");
    assert_eq!(borrows_of(&service, R1), before + 1);
    assert!(!is_available(&service, METER));
}
