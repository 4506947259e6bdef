use clap::Parser;
use photoland::config::PHOTO_EXTENSIONS;
use photoland::utils::monitor::SystemMonitor;
use photoland::utils::{logger, validation, validation::Validate};
use photoland::{
    CliConfig, HttpReportPipeline, LocalStorage, MapComposer, ReportEngine, ReportError,
    ReportOutcome, ReportWriter, TomlConfig,
};

fn load_config(cli: &CliConfig) -> photoland::Result<TomlConfig> {
    validation::validate_file_extensions(
        "photo",
        &[cli.photo.display().to_string()],
        PHOTO_EXTENSIONS,
    )?;

    let config = match &cli.config {
        Some(path) => TomlConfig::from_file(path)?,
        None => TomlConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting photoland CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    let monitor = SystemMonitor::new(config.monitoring_enabled());
    if monitor.is_enabled() {
        tracing::info!("🔍 System monitoring enabled");
    }

    let photo = match tokio::fs::read(&cli.photo).await {
        Ok(photo) => photo,
        Err(e) => {
            let e = ReportError::IoError(e);
            tracing::error!("❌ Could not read photo {}: {}", cli.photo.display(), e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };
    let photo_name = cli
        .photo
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("photo.jpg")
        .to_string();

    let output_dir = cli
        .output_dir
        .clone()
        .unwrap_or_else(|| config.output_dir().to_string());

    let composer = MapComposer::new(config.map.clone());
    let pipeline = HttpReportPipeline::new(config, composer);
    let engine = ReportEngine::new(pipeline);

    let result = match cli.as_of {
        Some(date) => engine.run_as_of(&photo, date).await,
        None => engine.run(&photo).await,
    };
    monitor.log_stats("Pipeline complete");

    match result {
        Ok(ReportOutcome::Report(report)) => {
            let writer = ReportWriter::new(LocalStorage::new(&output_dir));
            if let Err(e) = writer.write(&report, &photo, &photo_name).await {
                tracing::error!("❌ Writing the report bundle failed: {}", e);
                eprintln!("❌ {}", e.user_friendly_message());
                eprintln!("💡 {}", e.recovery_suggestion());
                std::process::exit(1);
            }

            monitor.log_final_stats();
            tracing::info!("✅ Report completed successfully!");
            tracing::info!("📁 Output saved to: {}", output_dir);
            println!("✅ Report completed successfully!");
            println!("📁 {}/report.html", output_dir);
        }
        Ok(ReportOutcome::NoLocation) => {
            let e = ReportError::NoLocationData;
            tracing::warn!("❌ {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(2);
        }
        Err(e) => {
            tracing::error!("❌ Report generation failed: {}", e);
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    }

    Ok(())
}
