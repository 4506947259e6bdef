use anyhow::Result;
use chrono::NaiveDate;
use httpmock::prelude::*;
use photoland::domain::model::ReportOutcome;
use photoland::{HttpReportPipeline, MapComposer, ReportEngine, ReportError, TomlConfig};

// Builds a minimal JPEG whose APP1 segment carries a little-endian TIFF
// with a GPS IFD. EXIF offsets are relative to the TIFF header, so the
// payload layout is fixed: IFD0 at 8, GPS IFD at 26, rationals at 80/104.

fn put_u16(buf: &mut Vec<u8>, v: u16) {
    buf.extend_from_slice(&v.to_le_bytes());
}

fn put_u32(buf: &mut Vec<u8>, v: u32) {
    buf.extend_from_slice(&v.to_le_bytes());
}

fn put_entry(buf: &mut Vec<u8>, tag: u16, kind: u16, count: u32, value: [u8; 4]) {
    put_u16(buf, tag);
    put_u16(buf, kind);
    put_u32(buf, count);
    buf.extend_from_slice(&value);
}

fn gps_tiff(lat: [(u32, u32); 3], lon: [(u32, u32); 3]) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.extend_from_slice(b"II\x2a\x00");
    put_u32(&mut buf, 8);

    put_u16(&mut buf, 1);
    put_entry(&mut buf, 0x8825, 4, 1, 26u32.to_le_bytes());
    put_u32(&mut buf, 0);

    put_u16(&mut buf, 4);
    put_entry(&mut buf, 1, 2, 2, [b'N', 0, 0, 0]);
    put_entry(&mut buf, 2, 5, 3, 80u32.to_le_bytes());
    put_entry(&mut buf, 3, 2, 2, [b'E', 0, 0, 0]);
    put_entry(&mut buf, 4, 5, 3, 104u32.to_le_bytes());
    put_u32(&mut buf, 0);

    for (num, denom) in lat.into_iter().chain(lon) {
        put_u32(&mut buf, num);
        put_u32(&mut buf, denom);
    }
    buf
}

fn jpeg_with_exif(tiff: &[u8]) -> Vec<u8> {
    let mut jpeg = vec![0xff, 0xd8]; // SOI
    jpeg.extend_from_slice(&[0xff, 0xe1]); // APP1
    let segment_len = (2 + 6 + tiff.len()) as u16;
    jpeg.extend_from_slice(&segment_len.to_be_bytes());
    jpeg.extend_from_slice(b"Exif\x00\x00");
    jpeg.extend_from_slice(tiff);
    jpeg.extend_from_slice(&[0xff, 0xd9]); // EOI
    jpeg
}

/// Photo geotagged at exactly 35.5N 139.75E, so query strings are stable.
fn geotagged_photo() -> Vec<u8> {
    jpeg_with_exif(&gps_tiff(
        [(35, 1), (30, 1), (0, 1)],
        [(139, 1), (45, 1), (0, 1)],
    ))
}

fn photo_without_gps() -> Vec<u8> {
    let mut tiff = Vec::new();
    tiff.extend_from_slice(b"II\x2a\x00");
    put_u32(&mut tiff, 8);
    put_u16(&mut tiff, 1);
    put_entry(&mut tiff, 0x010f, 2, 2, [b'x', 0, 0, 0]);
    put_u32(&mut tiff, 0);
    jpeg_with_exif(&tiff)
}

fn engine_for(server: &MockServer) -> ReportEngine<HttpReportPipeline<TomlConfig>> {
    let mut config = TomlConfig::default();
    config.services.geocoder_endpoint = server.url("/reverse-geocoder/LonLatToAddress");
    config.services.price_endpoint = server.url("/webland/api/TradeListSearch");
    config.services.timeout_seconds = 5;

    let composer = MapComposer::new(config.map.clone());
    ReportEngine::new(HttpReportPipeline::new(config, composer))
}

fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 5, 20).unwrap()
}

#[tokio::test]
async fn test_end_to_end_report_with_real_http() -> Result<()> {
    let server = MockServer::start();

    let geocoder_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/reverse-geocoder/LonLatToAddress")
            .query_param("lat", "35.5")
            .query_param("lon", "139.75");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"results": {"muniCd": "14104", "lv01Nm": "幸区"}}));
    });

    let price_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/webland/api/TradeListSearch")
            .query_param("from", "20224")
            .query_param("to", "20231")
            .query_param("city", "14104");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "data": [
                    {"Type": "宅地(土地と建物)", "TradePrice": "45000000", "Municipality": "川崎市幸区"},
                    {"Type": "中古マンション等", "TradePrice": "21000000", "Municipality": "川崎市幸区"}
                ]
            }));
    });

    let engine = engine_for(&server);
    let outcome = engine.run_as_of(&geotagged_photo(), as_of()).await?;

    geocoder_mock.assert();
    price_mock.assert();

    let report = match outcome {
        ReportOutcome::Report(report) => report,
        ReportOutcome::NoLocation => panic!("expected a report"),
    };

    assert!((report.coordinate.lat_deg - 35.5).abs() < 1e-9);
    assert!((report.coordinate.lon_deg - 139.75).abs() < 1e-9);
    assert_eq!(report.municipality.as_str(), "14104");
    assert_eq!(report.window.from, "20224");
    assert_eq!(report.window.to, "20231");

    // records stay in API order with their fields untouched
    assert_eq!(report.price_records.len(), 2);
    assert_eq!(
        report.price_records[0]
            .data
            .get("TradePrice")
            .unwrap()
            .as_str()
            .unwrap(),
        "45000000"
    );
    assert_eq!(
        report.price_records[1]
            .data
            .get("Type")
            .unwrap()
            .as_str()
            .unwrap(),
        "中古マンション等"
    );

    assert!(report.map.script.contains("setView([35.5, 139.75], 15)"));
    assert!(report.map.body.contains("photoland-map"));

    Ok(())
}

#[tokio::test]
async fn test_photo_without_gps_makes_no_requests() -> Result<()> {
    let server = MockServer::start();

    let geocoder_mock = server.mock(|when, then| {
        when.method(GET).path("/reverse-geocoder/LonLatToAddress");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"results": {"muniCd": "14104"}}));
    });

    let engine = engine_for(&server);
    let outcome = engine.run_as_of(&photo_without_gps(), as_of()).await?;

    assert!(matches!(outcome, ReportOutcome::NoLocation));
    geocoder_mock.assert_hits(0);

    Ok(())
}

#[tokio::test]
async fn test_unmapped_coordinate_skips_price_fetch() -> Result<()> {
    let server = MockServer::start();

    let geocoder_mock = server.mock(|when, then| {
        when.method(GET).path("/reverse-geocoder/LonLatToAddress");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"results": null}));
    });

    let price_mock = server.mock(|when, then| {
        when.method(GET).path("/webland/api/TradeListSearch");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"data": []}));
    });

    let engine = engine_for(&server);
    let outcome = engine.run_as_of(&geotagged_photo(), as_of()).await?;

    assert!(matches!(outcome, ReportOutcome::NoLocation));
    geocoder_mock.assert();
    price_mock.assert_hits(0);

    Ok(())
}

#[tokio::test]
async fn test_price_service_failure_is_fatal() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/reverse-geocoder/LonLatToAddress");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"results": {"muniCd": "14104"}}));
    });

    let price_mock = server.mock(|when, then| {
        when.method(GET).path("/webland/api/TradeListSearch");
        then.status(500);
    });

    let engine = engine_for(&server);
    let err = engine
        .run_as_of(&geotagged_photo(), as_of())
        .await
        .unwrap_err();

    price_mock.assert();
    assert!(matches!(err, ReportError::UpstreamDataError { .. }));
    assert!(!err.is_no_location());
}

#[tokio::test]
async fn test_empty_price_data_still_reports() -> Result<()> {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/reverse-geocoder/LonLatToAddress");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"results": {"muniCd": "01202"}}));
    });

    server.mock(|when, then| {
        when.method(GET).path("/webland/api/TradeListSearch");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"data": []}));
    });

    let engine = engine_for(&server);
    let outcome = engine.run_as_of(&geotagged_photo(), as_of()).await?;

    match outcome {
        ReportOutcome::Report(report) => {
            assert!(report.price_records.is_empty());
            assert!(report.map.script.contains("L.control.layers"));
        }
        ReportOutcome::NoLocation => panic!("expected a report"),
    }

    Ok(())
}
