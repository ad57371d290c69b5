//! Phone number normalization for caller lookups.
//!
//! The lookup API is keyed by national numbers, so dialed and received
//! numbers are stripped of their country calling code before the request.

use crate::config::DEFAULT_REGION;
use crate::redact::number_fingerprint;
use phonenumber::country::Id as CountryId;

/// Resolve a region hint (ISO 3166-1 alpha-2) to a `phonenumber` country id.
///
/// Missing or unrecognised hints fall back to `US`.
pub fn region_or_default(region: Option<&str>) -> CountryId {
    let hint = region
        .map(|r| r.trim().to_ascii_uppercase())
        .filter(|r| !r.is_empty());

    if let Some(ref code) = hint {
        if let Ok(id) = code.parse::<CountryId>() {
            return id;
        }
        tracing::warn!("Unrecognised region hint '{}', using {}", code, DEFAULT_REGION);
    }

    CountryId::US
}

/// Strip the country calling code from `raw`.
///
/// Uses phonenumber library (port of Google's libphonenumber) to:
/// - Parse the number with the given region hint
/// - Check that it is a valid number
/// - Return the national significant number as digits
///
/// Anything that fails to parse or validate is returned unchanged.
pub fn normalize_number(raw: &str, region: Option<&str>) -> String {
    let country = region_or_default(region);

    match phonenumber::parse(Some(country), raw) {
        Ok(number) => {
            if phonenumber::is_valid(&number) {
                let national = number.national().value().to_string();
                tracing::debug!(
                    "✓ Normalized {} to national form {}",
                    number_fingerprint(raw),
                    number_fingerprint(&national)
                );
                national
            } else {
                tracing::debug!(
                    "Number {} is not valid for {:?}, keeping raw input",
                    number_fingerprint(raw),
                    country
                );
                raw.to_string()
            }
        }
        Err(e) => {
            tracing::warn!(
                "Failed to parse number {}: {:?}",
                number_fingerprint(raw),
                e
            );
            raw.to_string()
        }
    }
}

/// USSD codes (`*123#`) are service requests, not phone numbers.
pub fn is_ussd(raw: &str) -> bool {
    raw.starts_with('*') && raw.ends_with('#')
}
