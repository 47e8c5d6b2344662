//! State and city lookup, and "near you" reverse geocoding.

use axum::extract::{Path, State};
use axum::Json;
use geocoder::{GeocodeError, GeolocationError, LocatedAddress};
use marketplace_core::location;
use serde::Deserialize;

use crate::error::{ApiError, Result};
use crate::state::AppState;

/// What the browser reported: a position, or the geolocation error code.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum LocateRequest {
    Position { latitude: f64, longitude: f64 },
    Failed { error_code: u16 },
}

/// States and union territories, alphabetical.
pub async fn states() -> Json<Vec<&'static str>> {
    Json(location::state_names().collect())
}

/// Major cities in one state.
pub async fn cities(Path(state): Path<String>) -> Result<Json<Vec<&'static str>>> {
    let region = location::find_region(&state).ok_or_else(|| ApiError::not_found("State"))?;
    Ok(Json(region.cities.to_vec()))
}

/// Turn a browser position into a postal address inside India.
pub async fn locate(
    State(state): State<AppState>,
    Json(req): Json<LocateRequest>,
) -> Result<Json<LocatedAddress>> {
    match req {
        LocateRequest::Position {
            latitude,
            longitude,
        } => Ok(Json(state.geocoder.locate(latitude, longitude).await?)),
        LocateRequest::Failed { error_code } => Err(GeocodeError::Geolocation(
            GeolocationError::from_code(error_code),
        )
        .into()),
    }
}
