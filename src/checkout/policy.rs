//! Checkout rule set.
//!
//! The hours range is fixed because request construction enforces it on its
//! own, before any session or policy exists. Everything else is a tunable
//! [`CheckoutPolicy`] whose defaults reproduce the lab's published rules.

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

pub const MIN_HOURS: u32 = 1;
pub const MAX_HOURS: u32 = 6;

pub const REQUESTER_ID_MIN_LEN: usize = 8;
pub const REQUESTER_ID_MAX_LEN: usize = 12;

pub const MIN_SECURITY_LEVEL: u8 = 1;
pub const MAX_SECURITY_LEVEL: u8 = 3;

/// Requesters already holding this many assets cannot borrow another.
pub const DEFAULT_MAX_ACTIVE_BORROWS: u32 = 2;
/// Only assets at exactly this level are gated.
pub const DEFAULT_RESTRICTED_SECURITY_LEVEL: u8 = MAX_SECURITY_LEVEL;
pub const DEFAULT_PRIVILEGED_PREFIX: &str = "KRG";
/// Assets whose display name contains this keyword are capped.
pub const DEFAULT_CAPPED_NAME_KEYWORD: &str = "Cable";
pub const DEFAULT_CAPPED_MAX_HOURS: u32 = 3;
/// Date-of-service marker embedded in every receipt token (YYYYMMDD).
pub const DEFAULT_SERVICE_DATE_MARKER: &str = "20260223";

fn default_max_active_borrows() -> u32 {
    DEFAULT_MAX_ACTIVE_BORROWS
}

fn default_restricted_security_level() -> u8 {
    DEFAULT_RESTRICTED_SECURITY_LEVEL
}

fn default_privileged_prefix() -> String {
    DEFAULT_PRIVILEGED_PREFIX.to_string()
}

fn default_capped_name_keyword() -> String {
    DEFAULT_CAPPED_NAME_KEYWORD.to_string()
}

fn default_capped_max_hours() -> u32 {
    DEFAULT_CAPPED_MAX_HOURS
}

fn default_service_date_marker() -> String {
    DEFAULT_SERVICE_DATE_MARKER.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CheckoutPolicy {
    #[serde(default = "default_max_active_borrows")]
    pub max_active_borrows: u32,
    #[serde(default = "default_restricted_security_level")]
    pub restricted_security_level: u8,
    #[serde(default = "default_privileged_prefix")]
    pub privileged_prefix: String,
    #[serde(default = "default_capped_name_keyword")]
    pub capped_name_keyword: String,
    #[serde(default = "default_capped_max_hours")]
    pub capped_max_hours: u32,
    #[serde(default = "default_service_date_marker")]
    pub service_date_marker: String,
}

impl Default for CheckoutPolicy {
    fn default() -> Self {
        Self {
            max_active_borrows: default_max_active_borrows(),
            restricted_security_level: default_restricted_security_level(),
            privileged_prefix: default_privileged_prefix(),
            capped_name_keyword: default_capped_name_keyword(),
            capped_max_hours: default_capped_max_hours(),
            service_date_marker: default_service_date_marker(),
        }
    }
}

impl CheckoutPolicy {
    pub fn borrow_limit_reached(&self, active_borrows: u32) -> bool {
        active_borrows >= self.max_active_borrows
    }

    pub fn is_restricted(&self, security_level: u8) -> bool {
        security_level == self.restricted_security_level
    }

    pub fn is_privileged(&self, requester_id: &str) -> bool {
        requester_id.starts_with(&self.privileged_prefix)
    }

    /// Returns the capped duration when `asset_name` falls under the keyword
    /// cap and `hours` exceeds it, `None` otherwise.
    pub fn capped_hours(&self, asset_name: &str, hours: u32) -> Option<u32> {
        (asset_name.contains(&self.capped_name_keyword) && hours > self.capped_max_hours)
            .then_some(self.capped_max_hours)
    }

    pub fn receipt_token(&self, asset_id: &str, requester_id: &str) -> String {
        format!(
            "TXN-{}-{}-{}",
            self.service_date_marker, asset_id, requester_id
        )
    }

    pub fn validate(&self) -> Result<()> {
        if !(MIN_SECURITY_LEVEL..=MAX_SECURITY_LEVEL).contains(&self.restricted_security_level) {
            bail!(
                "policy.restricted_security_level must be within {MIN_SECURITY_LEVEL}..={MAX_SECURITY_LEVEL}, got {}",
                self.restricted_security_level
            );
        }
        if !(MIN_HOURS..=MAX_HOURS).contains(&self.capped_max_hours) {
            bail!(
                "policy.capped_max_hours must be within {MIN_HOURS}..={MAX_HOURS}, got {}",
                self.capped_max_hours
            );
        }
        if self.privileged_prefix.trim().is_empty() {
            bail!("policy.privileged_prefix cannot be empty");
        }
        if self.capped_name_keyword.trim().is_empty() {
            bail!("policy.capped_name_keyword cannot be empty");
        }
        if self.service_date_marker.len() != 8
            || !self
                .service_date_marker
                .bytes()
                .all(|byte| byte.is_ascii_digit())
        {
            bail!(
                "policy.service_date_marker must be 8 digits (YYYYMMDD), got '{}'",
                self.service_date_marker
            );
        }
        Ok(())
    }
}
