use std::sync::LazyLock;

use regex::Regex;

use crate::checkout::{
    error::{CheckoutError, format_error},
    policy::{MAX_HOURS, MIN_HOURS, REQUESTER_ID_MAX_LEN, REQUESTER_ID_MIN_LEN},
};

static ASSET_ID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^LAB-[0-9]+$").expect("asset id pattern is a valid regex")
});

pub fn validate_requester_id(id: &str) -> Result<(), CheckoutError> {
    let len = id.chars().count();
    if id.is_empty()
        || !(REQUESTER_ID_MIN_LEN..=REQUESTER_ID_MAX_LEN).contains(&len)
        || id.chars().any(char::is_whitespace)
    {
        return Err(format_error(format!("invalid requester id format: '{id}'")));
    }
    Ok(())
}

pub fn validate_asset_id(id: &str) -> Result<(), CheckoutError> {
    if !ASSET_ID_PATTERN.is_match(id) {
        return Err(format_error(format!("invalid asset id format: '{id}'")));
    }
    Ok(())
}

pub fn validate_hours(hours: u32) -> Result<(), CheckoutError> {
    if !(MIN_HOURS..=MAX_HOURS).contains(&hours) {
        return Err(format_error(format!(
            "hours must be between {MIN_HOURS} and {MAX_HOURS}, got {hours}"
        )));
    }
    Ok(())
}
