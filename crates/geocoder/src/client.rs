//! Reverse-geocoding HTTP client.

use marketplace_core::location::{find_region, Coordinates, INDIA_BOUNDS};
use tracing::{debug, info, instrument, warn};

use crate::config::GeocoderConfig;
use crate::error::GeocodeError;
use crate::types::{non_empty, LocatedAddress, ReverseGeocodeResponse};

const INDIA_COUNTRY_CODE: &str = "IN";

/// Client that turns coordinates inside India into address components.
#[derive(Debug, Clone)]
pub struct ReverseGeocoder {
    client: reqwest::Client,
    config: GeocoderConfig,
}

impl ReverseGeocoder {
    /// Create a new client with the given configuration.
    pub fn new(config: GeocoderConfig) -> Result<Self, GeocodeError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("agentwaala/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, config })
    }

    /// Resolve a coordinate pair.
    ///
    /// Coordinates outside the India bounding box are refused without a
    /// network call.
    #[instrument(skip(self))]
    pub async fn locate(&self, latitude: f64, longitude: f64) -> Result<LocatedAddress, GeocodeError> {
        let point = Coordinates::new(latitude, longitude)?;
        if !INDIA_BOUNDS.contains(&point) {
            info!("Coordinates outside India");
            return Err(GeocodeError::OutsideIndia(point));
        }

        let url = self.config.reverse_url();
        debug!("Reverse geocoding via {}", url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("latitude", point.latitude.to_string()),
                ("longitude", point.longitude.to_string()),
                ("localityLanguage", self.config.language.clone()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            warn!(status = %response.status(), "Geocoding service error");
            return Err(GeocodeError::Status(response.status().as_u16()));
        }

        let body: ReverseGeocodeResponse = response.json().await?;

        // The box also covers parts of neighbouring countries.
        if !body.country_code.is_empty() && !body.country_code.eq_ignore_ascii_case(INDIA_COUNTRY_CODE) {
            info!(country = %body.country_code, "Coordinates resolve outside India");
            return Err(GeocodeError::OutsideIndia(point));
        }

        Ok(normalize(body))
    }
}

fn normalize(body: ReverseGeocodeResponse) -> LocatedAddress {
    let state = non_empty(&body.principal_subdivision).map(|raw| {
        find_region(&raw)
            .map(|region| region.name.to_string())
            .unwrap_or(raw)
    });

    let locality = non_empty(&body.locality);
    let district = non_empty(&body.city).or_else(|| locality.clone());

    LocatedAddress {
        state,
        district,
        locality,
        postal_code: non_empty(&body.postcode),
    }
}
