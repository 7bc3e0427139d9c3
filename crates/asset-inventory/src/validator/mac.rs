//! MAC address format check

use super::ValidationResult;
use crate::models::MacAddress;

/// Accept six hex pairs delimited by `:` or `-`, any case
///
/// Independent of department state.
pub fn validate_mac(candidate: &str) -> ValidationResult {
    candidate.parse::<MacAddress>().into()
}
