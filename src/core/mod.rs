pub mod engine;
pub mod exif;
pub mod geocode;
pub mod map;
pub mod pipeline;
pub mod prices;
pub mod report;
pub mod window;

pub use crate::domain::model::{
    Coordinate, MapFragments, MunicipalityCode, PhotoReport, PriceRecord, ReportOutcome,
    ReportingWindow,
};
pub use crate::domain::ports::{ReportPipeline, ServiceConfig, Storage};
pub use crate::utils::error::Result;
