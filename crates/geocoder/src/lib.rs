//! Reverse geocoding for Agentwaala's "near you" search.
//!
//! Turns a browser-reported coordinate pair into state, district, locality,
//! and postal code, refusing anything outside India.
//!
//! # Example
//!
//! ```no_run
//! use geocoder::{GeocoderConfig, ReverseGeocoder};
//!
//! # async fn example() -> Result<(), geocoder::GeocodeError> {
//! let geocoder = ReverseGeocoder::new(GeocoderConfig::default())?;
//! let address = geocoder.locate(12.97, 77.59).await?;
//! println!("{:?}", address.state);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use client::ReverseGeocoder;
pub use config::GeocoderConfig;
pub use error::{GeocodeError, GeolocationError};
pub use types::LocatedAddress;
