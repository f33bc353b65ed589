use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutErrorKind {
    /// Malformed identifier or duration. The caller can correct the input.
    Format,
    NotFound,
    /// An eligibility rule (outstanding fine, borrow limit) was violated.
    Policy,
    /// Asset unavailable at check or at commit time.
    Conflict,
    /// Requester lacks the privilege required by a restricted asset.
    Security,
}

impl CheckoutErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Format => "format_error",
            Self::NotFound => "not_found_error",
            Self::Policy => "policy_error",
            Self::Conflict => "conflict_error",
            Self::Security => "security_error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{message}")]
pub struct CheckoutError {
    pub kind: CheckoutErrorKind,
    pub message: String,
}

impl CheckoutError {
    pub fn new(kind: CheckoutErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

pub fn format_error(message: impl Into<String>) -> CheckoutError {
    CheckoutError::new(CheckoutErrorKind::Format, message)
}

pub fn not_found(message: impl Into<String>) -> CheckoutError {
    CheckoutError::new(CheckoutErrorKind::NotFound, message)
}

pub fn policy_violation(message: impl Into<String>) -> CheckoutError {
    CheckoutError::new(CheckoutErrorKind::Policy, message)
}

pub fn conflict(message: impl Into<String>) -> CheckoutError {
    CheckoutError::new(CheckoutErrorKind::Conflict, message)
}

pub fn security_violation(message: impl Into<String>) -> CheckoutError {
    CheckoutError::new(CheckoutErrorKind::Security, message)
}
