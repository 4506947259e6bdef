use crate::utils::error::{ReportError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A capture location in decimal degrees, derived from the photo's EXIF
/// degree/minute/second rationals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat_deg: f64,
    pub lon_deg: f64,
}

impl Coordinate {
    /// Builds a coordinate, rejecting non-finite or out-of-range values.
    ///
    /// A photo whose EXIF decodes to an impossible position cannot anchor a
    /// report, so the failure is the same `NoLocationData` the caller sees
    /// for a photo without GPS tags.
    pub fn new(lat_deg: f64, lon_deg: f64) -> Result<Self> {
        let lat_ok = lat_deg.is_finite() && (-90.0..=90.0).contains(&lat_deg);
        let lon_ok = lon_deg.is_finite() && (-180.0..=180.0).contains(&lon_deg);
        if lat_ok && lon_ok {
            Ok(Self { lat_deg, lon_deg })
        } else {
            Err(ReportError::NoLocationData)
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6},{:.6}", self.lat_deg, self.lon_deg)
    }
}

/// A year-quarter search range for the transaction-price service, as two
/// 5-digit period codes (4-digit year + quarter digit).
///
/// Constructed only by `core::window`; `from` always sorts before `to`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportingWindow {
    pub from: String,
    pub to: String,
}

impl fmt::Display for ReportingWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.from, self.to)
    }
}

/// Municipality code returned by the reverse geocoder. Opaque to this crate;
/// it is only echoed back to the price service as the `city` parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MunicipalityCode(pub String);

impl MunicipalityCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MunicipalityCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One transaction record from the price service, forwarded as-is.
///
/// The pipeline never interprets these fields; they come out of the `data`
/// array and go straight into the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceRecord {
    #[serde(flatten)]
    pub data: HashMap<String, serde_json::Value>,
}

/// Renderer-ready markup pieces for the layered map, meant to be embedded
/// into a larger HTML document (stylesheet/script includes, the sized map
/// container, and the initialization script).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapFragments {
    pub header: String,
    pub body: String,
    pub script: String,
}

/// Everything a successful pipeline run hands to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct PhotoReport {
    pub coordinate: Coordinate,
    pub municipality: MunicipalityCode,
    pub window: ReportingWindow,
    pub price_records: Vec<PriceRecord>,
    pub map: MapFragments,
}

/// Outcome of one pipeline run.
///
/// `NoLocation` is the recovered failure for photos that cannot be anchored
/// to a region (no GPS metadata, or the geocoder found no municipality).
/// Upstream fetch failures are not represented here; they surface as
/// `Err(ReportError)` from the engine.
#[derive(Debug, Clone)]
pub enum ReportOutcome {
    Report(PhotoReport),
    NoLocation,
}

impl ReportOutcome {
    pub fn is_report(&self) -> bool {
        matches!(self, ReportOutcome::Report(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinate_accepts_valid_ranges() {
        assert!(Coordinate::new(35.6812, 139.7671).is_ok());
        assert!(Coordinate::new(-90.0, 180.0).is_ok());
        assert!(Coordinate::new(90.0, -180.0).is_ok());
        assert!(Coordinate::new(0.0, 0.0).is_ok());
    }

    #[test]
    fn coordinate_rejects_out_of_range() {
        assert!(Coordinate::new(90.1, 0.0).is_err());
        assert!(Coordinate::new(-90.1, 0.0).is_err());
        assert!(Coordinate::new(0.0, 180.1).is_err());
        assert!(Coordinate::new(0.0, -180.1).is_err());
    }

    #[test]
    fn coordinate_rejects_non_finite() {
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
        assert!(Coordinate::new(0.0, f64::INFINITY).is_err());
        assert!(Coordinate::new(f64::NEG_INFINITY, f64::NAN).is_err());
    }

    #[test]
    fn price_record_roundtrips_unknown_fields() {
        let raw = serde_json::json!({
            "TradePrice": "25000000",
            "Type": "宅地(土地と建物)",
            "Period": "2023年第2四半期"
        });
        let record: PriceRecord = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(record.data.len(), 3);
        assert_eq!(
            record.data.get("TradePrice").unwrap().as_str().unwrap(),
            "25000000"
        );
        let back = serde_json::to_value(&record).unwrap();
        assert_eq!(back, raw);
    }

    #[test]
    fn outcome_discriminates() {
        assert!(!ReportOutcome::NoLocation.is_report());
    }
}
