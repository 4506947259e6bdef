pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{LocalStorage, TomlConfig};
pub use crate::core::{
    engine::ReportEngine,
    map::{MapComposer, MapSettings},
    pipeline::HttpReportPipeline,
    report::ReportWriter,
};
pub use domain::model::{PhotoReport, ReportOutcome};
pub use utils::error::{ReportError, Result};
