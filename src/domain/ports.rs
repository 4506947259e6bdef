use crate::domain::model::{
    Coordinate, MapFragments, MunicipalityCode, PriceRecord, ReportingWindow,
};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ServiceConfig: Send + Sync {
    fn geocoder_endpoint(&self) -> &str;
    fn price_endpoint(&self) -> &str;
    fn request_timeout(&self) -> Duration;
}

/// The four report stages. `locate` fails with `NoLocationData` for photos
/// without a usable position; the remote stages reserve that error for
/// coordinates no municipality claims, and fail hard on everything else.
#[async_trait]
pub trait ReportPipeline: Send + Sync {
    fn locate(&self, photo: &[u8]) -> Result<Coordinate>;
    async fn resolve_region(&self, coordinate: Coordinate) -> Result<MunicipalityCode>;
    async fn fetch_prices(
        &self,
        window: &ReportingWindow,
        municipality: &MunicipalityCode,
    ) -> Result<Vec<PriceRecord>>;
    fn compose_map(&self, coordinate: Coordinate) -> MapFragments;
}
