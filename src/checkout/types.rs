use serde::{Deserialize, Serialize};

use crate::checkout::{error::CheckoutError, validation::validate_hours};

pub type RequesterId = String;
pub type AssetId = String;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requester {
    pub id: RequesterId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub fine_balance: u64,
    #[serde(default)]
    pub active_borrows: u32,
}

impl Requester {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            fine_balance: 0,
            active_borrows: 0,
        }
    }

    pub fn with_fine_balance(mut self, fine_balance: u64) -> Self {
        self.fine_balance = fine_balance;
        self
    }

    pub fn with_active_borrows(mut self, active_borrows: u32) -> Self {
        self.active_borrows = active_borrows;
        self
    }

    pub fn has_outstanding_fine(&self) -> bool {
        self.fine_balance > 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub id: AssetId,
    pub name: String,
    /// Single source of truth for whether the asset is currently lent out.
    pub available: bool,
    pub security_level: u8,
}

impl Asset {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        available: bool,
        security_level: u8,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            available,
            security_level,
        }
    }
}

/// A checkout attempt as submitted by a caller.
///
/// Construction enforces the hours range only; identifier formats are checked
/// by the authorizer, which also re-checks the hours because the fields stay
/// public after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub requester_id: RequesterId,
    pub asset_id: AssetId,
    pub hours: u32,
}

impl CheckoutRequest {
    pub fn new(
        requester_id: impl Into<String>,
        asset_id: impl Into<String>,
        hours: u32,
    ) -> Result<Self, CheckoutError> {
        validate_hours(hours)?;
        Ok(Self {
            requester_id: requester_id.into(),
            asset_id: asset_id.into(),
            hours,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PolicyNotice {
    /// The maximum duration was requested; the asset must be returned on time.
    MaxDurationSelected { hours: u32 },
    DurationCapped { from: u32, to: u32 },
}

impl PolicyNotice {
    pub fn describe(&self) -> String {
        match self {
            Self::MaxDurationSelected { hours } => {
                format!("maximum duration of {hours} hours selected; return strictly on time")
            }
            Self::DurationCapped { from, to } => {
                format!("policy applied: duration capped from {from} to {to} hours")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub token: String,
    pub requester_id: RequesterId,
    pub asset_id: AssetId,
    pub requested_hours: u32,
    /// Duration actually committed after policy adjustment.
    pub effective_hours: u32,
    #[serde(default)]
    pub notices: Vec<PolicyNotice>,
}
