use crate::domain::model::Coordinate;
use crate::utils::error::{ReportError, Result};
use std::io::Cursor;

/// Reads the capture location out of a photo's EXIF block.
///
/// Latitude and longitude are stored as degree/minute/second rationals with
/// separate hemisphere reference tags; the decimal value is
/// `deg + min/60 + sec/3600`, negated for South/West references.
///
/// Anything short of a complete, in-range coordinate (unreadable container,
/// no EXIF segment, missing GPS tags, truncated rationals) is
/// `NoLocationData`. There is no partial result.
pub fn extract_coordinate(photo: &[u8]) -> Result<Coordinate> {
    let exif = exif::Reader::new()
        .read_from_container(&mut Cursor::new(photo))
        .map_err(|_| ReportError::NoLocationData)?;

    let lat_deg = read_axis(&exif, exif::Tag::GPSLatitude, exif::Tag::GPSLatitudeRef, 'S')?;
    let lon_deg = read_axis(&exif, exif::Tag::GPSLongitude, exif::Tag::GPSLongitudeRef, 'W')?;

    Coordinate::new(lat_deg, lon_deg)
}

fn read_axis(
    exif: &exif::Exif,
    value_tag: exif::Tag,
    ref_tag: exif::Tag,
    negative_ref: char,
) -> Result<f64> {
    let value = exif
        .get_field(value_tag, exif::In::PRIMARY)
        .ok_or(ReportError::NoLocationData)?;
    let reference = exif
        .get_field(ref_tag, exif::In::PRIMARY)
        .ok_or(ReportError::NoLocationData)?;

    let degrees = decimal_degrees(&value.value).ok_or(ReportError::NoLocationData)?;

    if reference.display_value().to_string().contains(negative_ref) {
        Ok(-degrees)
    } else {
        Ok(degrees)
    }
}

fn decimal_degrees(value: &exif::Value) -> Option<f64> {
    match value {
        exif::Value::Rational(parts) if parts.len() >= 3 => {
            Some(parts[0].to_f64() + parts[1].to_f64() / 60.0 + parts[2].to_f64() / 3600.0)
        }
        _ => None,
    }
}
