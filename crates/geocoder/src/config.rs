//! Configuration types for geocoder.

use std::env;
use std::time::Duration;

use crate::GeocodeError;

/// Default reverse-geocoding service (no API key required).
pub const DEFAULT_BASE_URL: &str = "https://api.bigdatacloud.net";

/// Configuration for the reverse-geocoding client.
#[derive(Debug, Clone)]
pub struct GeocoderConfig {
    /// Base URL of the geocoding service.
    pub base_url: String,
    /// Whole-request timeout.
    pub timeout: Duration,
    /// Language for place names.
    pub language: String,
}

impl GeocoderConfig {
    /// Create a new configuration with the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(10),
            language: "en".to_string(),
        }
    }

    /// Create configuration from environment variables.
    ///
    /// - `GEOCODER_BASE_URL` - Default: BigDataCloud
    /// - `GEOCODER_TIMEOUT_SECS` - Default: 10
    pub fn from_env() -> Result<Self, GeocodeError> {
        let base_url = env::var("GEOCODER_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let timeout_secs = env::var("GEOCODER_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u64>()
            .map_err(|e| GeocodeError::Config(format!("Invalid GEOCODER_TIMEOUT_SECS: {}", e)))?;

        Ok(Self::new(base_url).with_timeout(Duration::from_secs(timeout_secs)))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Get the reverse-geocode endpoint URL.
    pub fn reverse_url(&self) -> String {
        format!("{}/data/reverse-geocode-client", self.base_url)
    }
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse_url_strips_trailing_slash() {
        let config = GeocoderConfig::new("http://localhost:9000/");
        assert_eq!(
            config.reverse_url(),
            "http://localhost:9000/data/reverse-geocode-client"
        );
    }

    #[test]
    fn test_default_timeout() {
        assert_eq!(GeocoderConfig::default().timeout, Duration::from_secs(10));
    }
}
