pub mod cli;
pub mod toml_config;

pub use cli::LocalStorage;
pub use toml_config::TomlConfig;

#[cfg(feature = "cli")]
use clap::Parser;

pub const DEFAULT_GEOCODER_ENDPOINT: &str =
    "https://mreversegeocoder.gsi.go.jp/reverse-geocoder/LonLatToAddress";
pub const DEFAULT_PRICE_ENDPOINT: &str =
    "https://www.land.mlit.go.jp/webland/api/TradeListSearch";
pub const DEFAULT_OUTPUT_DIR: &str = "./report";

/// Containers the EXIF reader understands.
pub const PHOTO_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "tif", "tiff", "webp", "heic"];

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "photoland")]
#[command(about = "Builds a land-price report with a flood hazard map from a geotagged photo")]
pub struct CliConfig {
    /// Photo to build the report from
    pub photo: std::path::PathBuf,

    /// Where to write the report bundle (overrides the configured output dir)
    #[arg(long)]
    pub output_dir: Option<String>,

    /// TOML file overriding service endpoints and map settings
    #[arg(long)]
    pub config: Option<std::path::PathBuf>,

    /// Fixes "today" for the reporting window (YYYY-MM-DD)
    #[arg(long)]
    pub as_of: Option<chrono::NaiveDate>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}
