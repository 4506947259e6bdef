use clap::Parser;
use photoland::core::{geocode, prices};
use photoland::domain::model::{Coordinate, ReportingWindow};
use photoland::domain::ports::ServiceConfig;
use photoland::utils::validation::Validate;
use photoland::TomlConfig;

/// Connectivity check for the two public services the report depends on.
/// Geocodes a known coordinate, then fetches that municipality's records
/// for the current window.
#[derive(Debug, Parser)]
#[command(name = "probe_services")]
#[command(about = "Checks the reverse geocoder and the trade price API end to end")]
struct ProbeArgs {
    /// TOML file overriding service endpoints
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    /// Probe latitude (defaults to Tokyo Station)
    #[arg(long, default_value = "35.681236")]
    lat: f64,

    /// Probe longitude
    #[arg(long, default_value = "139.767125")]
    lon: f64,
}

#[tokio::main]
async fn main() -> photoland::Result<()> {
    tracing_subscriber::fmt::init();

    let args = ProbeArgs::parse();

    println!("🚀 Probing report services");

    let config = match &args.config {
        Some(path) => TomlConfig::from_file(path)?,
        None => TomlConfig::default(),
    };
    config.validate()?;

    println!("✅ Configuration valid");
    println!("  - geocoder: {}", config.geocoder_endpoint());
    println!("  - prices:   {}", config.price_endpoint());

    let client = reqwest::Client::new();
    let coordinate = Coordinate::new(args.lat, args.lon)?;

    println!("\n🔄 Reverse geocoding {}...", coordinate);
    let municipality = geocode::resolve_municipality(
        &client,
        config.geocoder_endpoint(),
        config.request_timeout(),
        coordinate,
    )
    .await?;
    println!("✅ Municipality code: {}", municipality);

    let window = ReportingWindow::current();
    println!("\n🔄 Fetching trade records for {}...", window);
    let records = prices::fetch_price_records(
        &client,
        config.price_endpoint(),
        config.request_timeout(),
        &window,
        &municipality,
    )
    .await?;
    println!("✅ {} records", records.len());

    if let Some(first) = records.first() {
        println!("📊 First record:\n{}", serde_json::to_string_pretty(first)?);
    }

    println!("\n🎉 Both services answered");
    Ok(())
}
