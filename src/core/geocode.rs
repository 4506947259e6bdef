use crate::domain::model::{Coordinate, MunicipalityCode};
use crate::utils::error::{ReportError, Result};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// Response shape of the GSI reverse geocoder. `results` is null when the
/// coordinate falls outside any municipality (open sea, overseas).
#[derive(Debug, Deserialize)]
struct ReverseGeocodeResponse {
    results: Option<GeocodeHit>,
}

#[derive(Debug, Deserialize)]
struct GeocodeHit {
    #[serde(rename = "muniCd")]
    muni_cd: Option<String>,
}

/// Resolves a coordinate to the municipality code the price API keys on.
///
/// A coordinate with no municipality behind it is `NoLocationData`, same as
/// a photo with no GPS tags. Transport failures and unusable responses are
/// fatal and bubble up.
pub async fn resolve_municipality(
    client: &Client,
    endpoint: &str,
    timeout: Duration,
    coordinate: Coordinate,
) -> Result<MunicipalityCode> {
    tracing::debug!("Reverse geocoding {}", coordinate);

    let response = client
        .get(endpoint)
        .header("content-type", "application/json")
        .query(&[
            ("lat", coordinate.lat_deg.to_string()),
            ("lon", coordinate.lon_deg.to_string()),
        ])
        .timeout(timeout)
        .send()
        .await?;

    tracing::debug!("Reverse geocoder response status: {}", response.status());

    if !response.status().is_success() {
        return Err(ReportError::UpstreamDataError {
            service: "reverse-geocoder".to_string(),
            message: format!("unexpected status {}", response.status()),
        });
    }

    let body: ReverseGeocodeResponse = response.json().await?;

    match body.results.and_then(|hit| hit.muni_cd) {
        Some(code) if !code.is_empty() => Ok(MunicipalityCode(code)),
        _ => {
            tracing::debug!("No municipality at {}", coordinate);
            Err(ReportError::NoLocationData)
        }
    }
}
