use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    /// The photo carries no usable GPS metadata, or the geocoder could not
    /// resolve the position to a municipality. Both collapse into this one
    /// category: either way no location-anchored report can be produced.
    #[error("no usable location data for this photo")]
    NoLocationData,

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("{service} returned an unusable response: {message}")]
    UpstreamDataError { service: String, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl ReportError {
    /// True for the recoverable "cannot anchor this photo" category that the
    /// pipeline boundary maps to `ReportOutcome::NoLocation`.
    pub fn is_no_location(&self) -> bool {
        matches!(self, ReportError::NoLocationData)
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ReportError::NoLocationData => {
                "This photo has no usable location information, so no report can be built for it."
                    .to_string()
            }
            ReportError::ApiError(_) | ReportError::UpstreamDataError { .. } => {
                format!("A lookup service could not be reached or answered unexpectedly: {}", self)
            }
            ReportError::ConfigError { .. } | ReportError::InvalidConfigValueError { .. } => {
                format!("Configuration problem: {}", self)
            }
            other => format!("Report generation failed: {}", other),
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            ReportError::NoLocationData => {
                "Use a photo taken with GPS/location recording enabled.".to_string()
            }
            ReportError::ApiError(_) | ReportError::UpstreamDataError { .. } => {
                "Check network connectivity and the configured service endpoints, then retry."
                    .to_string()
            }
            ReportError::ConfigError { .. } | ReportError::InvalidConfigValueError { .. } => {
                "Fix the configuration file or command-line flags and run again.".to_string()
            }
            ReportError::IoError(_) => {
                "Verify the photo path and that the output directory is writable.".to_string()
            }
            _ => "Re-run with --verbose for details.".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
