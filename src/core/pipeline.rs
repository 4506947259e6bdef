use crate::core::map::MapComposer;
use crate::core::{exif, geocode, prices};
use crate::domain::model::{
    Coordinate, MapFragments, MunicipalityCode, PriceRecord, ReportingWindow,
};
use crate::domain::ports::{ReportPipeline, ServiceConfig};
use crate::utils::error::Result;
use reqwest::Client;

/// Production pipeline: EXIF parsing in-process, region and price lookups
/// over HTTP, map fragments rendered locally.
pub struct HttpReportPipeline<C: ServiceConfig> {
    config: C,
    composer: MapComposer,
    client: Client,
}

impl<C: ServiceConfig> HttpReportPipeline<C> {
    pub fn new(config: C, composer: MapComposer) -> Self {
        Self {
            config,
            composer,
            client: Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl<C: ServiceConfig> ReportPipeline for HttpReportPipeline<C> {
    fn locate(&self, photo: &[u8]) -> Result<Coordinate> {
        exif::extract_coordinate(photo)
    }

    async fn resolve_region(&self, coordinate: Coordinate) -> Result<MunicipalityCode> {
        geocode::resolve_municipality(
            &self.client,
            self.config.geocoder_endpoint(),
            self.config.request_timeout(),
            coordinate,
        )
        .await
    }

    async fn fetch_prices(
        &self,
        window: &ReportingWindow,
        municipality: &MunicipalityCode,
    ) -> Result<Vec<PriceRecord>> {
        prices::fetch_price_records(
            &self.client,
            self.config.price_endpoint(),
            self.config.request_timeout(),
            window,
            municipality,
        )
        .await
    }

    fn compose_map(&self, coordinate: Coordinate) -> MapFragments {
        self.composer.compose(coordinate)
    }
}
