use crate::domain::model::{MunicipalityCode, PriceRecord, ReportingWindow};
use crate::utils::error::{ReportError, Result};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct TradeSearchResponse {
    data: Option<Vec<PriceRecord>>,
}

/// Fetches real-estate transaction records for one municipality over one
/// reporting window.
///
/// Records come back exactly as the API sent them: same order, same fields,
/// no renaming or filtering. An empty `data` array is a valid answer (no
/// transactions in the window); a response without `data` at all is not.
pub async fn fetch_price_records(
    client: &Client,
    endpoint: &str,
    timeout: Duration,
    window: &ReportingWindow,
    municipality: &MunicipalityCode,
) -> Result<Vec<PriceRecord>> {
    tracing::debug!("Fetching trade records for {} over {}", municipality, window);

    let response = client
        .get(endpoint)
        .query(&[
            ("from", window.from.as_str()),
            ("to", window.to.as_str()),
            ("city", municipality.as_str()),
        ])
        .timeout(timeout)
        .send()
        .await?;

    tracing::debug!("Price API response status: {}", response.status());

    if !response.status().is_success() {
        return Err(ReportError::UpstreamDataError {
            service: "trade-search".to_string(),
            message: format!("unexpected status {}", response.status()),
        });
    }

    let body: TradeSearchResponse = response.json().await?;

    let records = body.data.ok_or_else(|| ReportError::UpstreamDataError {
        service: "trade-search".to_string(),
        message: "response carries no `data` array".to_string(),
    })?;

    tracing::debug!("Price API returned {} records", records.len());
    Ok(records)
}
