use crate::domain::model::{PhotoReport, ReportOutcome, ReportingWindow};
use crate::domain::ports::ReportPipeline;
use crate::utils::error::Result;
use chrono::NaiveDate;

/// Drives one photo through the pipeline stages in order: locate, resolve
/// region, fetch prices, compose map.
///
/// Location problems are an answer, not a crash: any stage reporting
/// `NoLocationData` ends the run early with `ReportOutcome::NoLocation` and
/// no further stage is attempted. Upstream failures after a successful
/// locate stay fatal. There are no retries and no partial reports.
pub struct ReportEngine<P: ReportPipeline> {
    pipeline: P,
}

impl<P: ReportPipeline> ReportEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Builds a report with the window derived from today's date.
    pub async fn run(&self, photo: &[u8]) -> Result<ReportOutcome> {
        self.run_as_of(photo, chrono::Local::now().date_naive()).await
    }

    /// Same as [`run`](Self::run) with an explicit "today", so window
    /// arithmetic stays reproducible in tests.
    pub async fn run_as_of(&self, photo: &[u8], today: NaiveDate) -> Result<ReportOutcome> {
        match self.build_report(photo, today).await {
            Ok(report) => Ok(ReportOutcome::Report(report)),
            Err(err) if err.is_no_location() => {
                tracing::warn!("❌ {}", err);
                Ok(ReportOutcome::NoLocation)
            }
            Err(err) => Err(err),
        }
    }

    async fn build_report(&self, photo: &[u8], today: NaiveDate) -> Result<PhotoReport> {
        tracing::info!("🔍 Reading location from photo ({} bytes)", photo.len());
        let coordinate = self.pipeline.locate(photo)?;
        tracing::info!("✅ Coordinate: {}", coordinate);

        tracing::info!("📡 Resolving municipality...");
        let municipality = self.pipeline.resolve_region(coordinate).await?;
        tracing::info!("✅ Municipality code: {}", municipality);

        let window = ReportingWindow::for_date(today);
        tracing::info!("📡 Fetching trade records for {}", window);
        let price_records = self.pipeline.fetch_prices(&window, &municipality).await?;
        tracing::info!("✅ {} trade records", price_records.len());

        let map = self.pipeline.compose_map(coordinate);

        Ok(PhotoReport {
            coordinate,
            municipality,
            window,
            price_records,
            map,
        })
    }
}
