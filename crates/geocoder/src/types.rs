//! Wire and result types for geocoder.

use serde::{Deserialize, Serialize};

/// The fields we read from a BigDataCloud reverse-geocode response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct ReverseGeocodeResponse {
    pub country_code: String,
    pub principal_subdivision: String,
    pub city: String,
    pub locality: String,
    pub postcode: String,
}

/// Address components used to pre-fill location filters.
///
/// Best-effort: any component the service could not resolve is `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocatedAddress {
    /// State or union territory, normalized to the lookup table when known.
    pub state: Option<String>,
    pub district: Option<String>,
    pub locality: Option<String>,
    pub postal_code: Option<String>,
}

pub(crate) fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}
