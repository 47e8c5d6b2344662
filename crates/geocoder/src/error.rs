//! Error types for geocoder.

use marketplace_core::location::Coordinates;
use marketplace_core::DomainError;
use serde::Serialize;
use thiserror::Error;

/// Errors that can occur when resolving a location.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// Coordinates fall outside the service area.
    #[error("Your location appears to be outside India. Agentwaala currently serves India only.")]
    OutsideIndia(Coordinates),

    /// Not a valid latitude/longitude pair.
    #[error(transparent)]
    InvalidCoordinates(#[from] DomainError),

    /// The device could not produce a position.
    #[error("{}", .0.message())]
    Geolocation(GeolocationError),

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("Geocoding service returned status {0}")]
    Status(u16),

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl GeocodeError {
    /// Whether the failure is the caller's input rather than the service.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            GeocodeError::OutsideIndia(_)
                | GeocodeError::InvalidCoordinates(_)
                | GeocodeError::Geolocation(_)
        )
    }
}

/// Browser geolocation failures, by `GeolocationPositionError.code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GeolocationError {
    /// Code 1.
    PermissionDenied,
    /// Code 2.
    PositionUnavailable,
    /// Code 3.
    Timeout,
    /// Anything else.
    Unknown,
}

impl GeolocationError {
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => GeolocationError::PermissionDenied,
            2 => GeolocationError::PositionUnavailable,
            3 => GeolocationError::Timeout,
            _ => GeolocationError::Unknown,
        }
    }

    /// Message shown to the user.
    pub fn message(&self) -> &'static str {
        match self {
            GeolocationError::PermissionDenied => {
                "Location access was denied. Allow location access in your browser settings, or pick your state and city manually."
            }
            GeolocationError::PositionUnavailable => {
                "Your location could not be determined. Check that location services are on, or pick your state and city manually."
            }
            GeolocationError::Timeout => {
                "Finding your location took too long. Please try again."
            }
            GeolocationError::Unknown => {
                "Something went wrong while finding your location. Please pick your state and city manually."
            }
        }
    }
}
