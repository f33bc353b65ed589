//! Batch driver: submits raw request tuples in order and collects every
//! outcome. A failing request never stops the batch.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::checkout::{
    CheckoutError, CheckoutErrorKind, CheckoutRequest, CheckoutService, Receipt,
    error::format_error,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCheckoutRequest {
    pub requester_id: String,
    pub asset_id: String,
    pub hours: i64,
}

impl RawCheckoutRequest {
    pub fn new(requester_id: impl Into<String>, asset_id: impl Into<String>, hours: i64) -> Self {
        Self {
            requester_id: requester_id.into(),
            asset_id: asset_id.into(),
            hours,
        }
    }

    pub fn build(&self) -> Result<CheckoutRequest, CheckoutError> {
        let hours = u32::try_from(self.hours)
            .map_err(|_| format_error(format!("hours out of range: {}", self.hours)))?;
        CheckoutRequest::new(self.requester_id.clone(), self.asset_id.clone(), hours)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    pub requester_id: String,
    pub asset_id: String,
    pub result: Result<Receipt, CheckoutError>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub failed: BTreeMap<CheckoutErrorKind, usize>,
}

impl BatchSummary {
    pub fn failed_total(&self) -> usize {
        self.failed.values().sum()
    }
}

pub fn run_batch(
    service: &mut CheckoutService,
    requests: &[RawCheckoutRequest],
) -> Vec<BatchOutcome> {
    requests.iter().map(|raw| submit(service, raw)).collect()
}

/// Builds and submits one raw request. A construction failure is audited the
/// same way as a rejected checkout.
pub fn submit(service: &mut CheckoutService, raw: &RawCheckoutRequest) -> BatchOutcome {
    let result = match raw.build() {
        Ok(request) => service.checkout(&request),
        Err(err) => {
            tracing::info!(
                target: "checkout",
                requester_id = %raw.requester_id,
                asset_id = %raw.asset_id,
                hours = raw.hours,
                error = %err,
                "request_construction_rejected"
            );
            service.audit_attempt(&raw.requester_id, &raw.asset_id, Some(&err));
            Err(err)
        }
    };
    BatchOutcome {
        requester_id: raw.requester_id.clone(),
        asset_id: raw.asset_id.clone(),
        result,
    }
}

pub fn summarize(outcomes: &[BatchOutcome]) -> BatchSummary {
    let mut summary = BatchSummary::default();
    for outcome in outcomes {
        match &outcome.result {
            Ok(_) => summary.succeeded += 1,
            Err(err) => *summary.failed.entry(err.kind).or_default() += 1,
        }
    }
    summary
}
