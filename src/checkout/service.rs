use std::sync::Arc;

use crate::checkout::{
    assets::AssetDirectory,
    audit::{NoopAuditSink, attempt_finished_record, failure_record},
    error::{CheckoutError, conflict, policy_violation, security_violation},
    policy::{CheckoutPolicy, MAX_HOURS, MIN_HOURS},
    ports::AuditSink,
    requesters::RequesterDirectory,
    types::{CheckoutRequest, PolicyNotice, Receipt},
    validation::{validate_asset_id, validate_hours, validate_requester_id},
};

/// Authorizes checkouts against the directories it owns and commits the
/// resulting state transition.
///
/// Steps run in a fixed order and the first failure aborts the attempt:
/// format, requester lookup, fine, borrow limit, asset lookup, availability,
/// security tier, duration policy, commit, receipt. Nothing is mutated
/// before the commit step.
pub struct CheckoutService {
    requesters: RequesterDirectory,
    assets: AssetDirectory,
    policy: CheckoutPolicy,
    audit: Arc<dyn AuditSink>,
}

impl CheckoutService {
    pub fn new(
        requesters: RequesterDirectory,
        assets: AssetDirectory,
        policy: CheckoutPolicy,
        audit: Arc<dyn AuditSink>,
    ) -> Self {
        Self {
            requesters,
            assets,
            policy,
            audit,
        }
    }

    pub fn with_defaults(requesters: RequesterDirectory, assets: AssetDirectory) -> Self {
        Self::new(
            requesters,
            assets,
            CheckoutPolicy::default(),
            Arc::new(NoopAuditSink),
        )
    }

    pub fn requesters(&self) -> &RequesterDirectory {
        &self.requesters
    }

    pub fn assets(&self) -> &AssetDirectory {
        &self.assets
    }

    pub fn policy(&self) -> &CheckoutPolicy {
        &self.policy
    }

    pub fn checkout(&mut self, request: &CheckoutRequest) -> Result<Receipt, CheckoutError> {
        let result = self.authorize_and_commit(request);
        match &result {
            Ok(receipt) => {
                tracing::info!(
                    target: "checkout",
                    requester_id = %receipt.requester_id,
                    asset_id = %receipt.asset_id,
                    requested_hours = receipt.requested_hours,
                    effective_hours = receipt.effective_hours,
                    token = %receipt.token,
                    "checkout_committed"
                );
            }
            Err(err) => {
                tracing::info!(
                    target: "checkout",
                    requester_id = %request.requester_id,
                    asset_id = %request.asset_id,
                    kind = err.kind.as_str(),
                    error = %err,
                    "checkout_rejected"
                );
            }
        }
        self.audit_attempt(&request.requester_id, &request.asset_id, result.as_ref().err());
        result
    }

    /// Writes the audit trail for one attempt: the failure (if any) first,
    /// then the completion record.
    pub fn audit_attempt(
        &self,
        requester_id: &str,
        asset_id: &str,
        failure: Option<&CheckoutError>,
    ) {
        if let Some(err) = failure {
            self.audit.record(&failure_record(err));
        }
        self.audit
            .record(&attempt_finished_record(requester_id, asset_id));
    }

    fn authorize_and_commit(
        &mut self,
        request: &CheckoutRequest,
    ) -> Result<Receipt, CheckoutError> {
        validate_requester_id(&request.requester_id)?;
        validate_asset_id(&request.asset_id)?;
        validate_hours(request.hours)?;

        let requester = self.requesters.find(&request.requester_id)?;
        if requester.has_outstanding_fine() {
            return Err(policy_violation("outstanding fine"));
        }
        if self.policy.borrow_limit_reached(requester.active_borrows) {
            return Err(policy_violation("borrow limit reached"));
        }

        let asset = self.assets.find(&request.asset_id)?;
        if !asset.available {
            return Err(conflict(format!("asset not available: {}", asset.id)));
        }
        if self.policy.is_restricted(asset.security_level)
            && !self.policy.is_privileged(&request.requester_id)
        {
            return Err(security_violation("restricted asset"));
        }

        let (effective_hours, notices) = self.adjust_duration(&asset.name, request.hours);
        // An injected policy may cap below the legal range.
        if !(MIN_HOURS..=MAX_HOURS).contains(&effective_hours) {
            return Err(policy_violation(format!(
                "effective duration out of range: {effective_hours}"
            )));
        }

        // Availability is checked again inside mark_borrowed.
        self.assets.mark_borrowed(&request.asset_id)?;
        self.requesters.record_borrow(&request.requester_id)?;

        Ok(Receipt {
            token: self
                .policy
                .receipt_token(&request.asset_id, &request.requester_id),
            requester_id: request.requester_id.clone(),
            asset_id: request.asset_id.clone(),
            requested_hours: request.hours,
            effective_hours,
            notices,
        })
    }

    fn adjust_duration(&self, asset_name: &str, hours: u32) -> (u32, Vec<PolicyNotice>) {
        let mut notices = Vec::new();
        let mut effective_hours = hours;

        if hours == MAX_HOURS {
            notices.push(PolicyNotice::MaxDurationSelected { hours });
        }
        if let Some(capped) = self.policy.capped_hours(asset_name, hours) {
            notices.push(PolicyNotice::DurationCapped {
                from: hours,
                to: capped,
            });
            effective_hours = capped;
        }

        for notice in &notices {
            tracing::info!(target: "checkout", notice = %notice.describe(), "policy_notice");
        }
        (effective_hours, notices)
    }
}
