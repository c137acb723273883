//! Error types for the bmi_core library.

use std::io;
use std::path::PathBuf;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for bmi_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Height or weight was zero or negative
    #[error("Height and weight must be greater than zero.")]
    InvalidMeasurement,

    /// Height or weight text could not be read as a number
    #[error("Please enter valid numbers for height and weight.")]
    MalformedInput,

    /// Save requested before any calculation succeeded
    #[error("Please calculate the BMI before saving.")]
    NoResultToSave,

    /// Unit tag not in the supported set
    #[error("Unknown unit: {0}")]
    UnknownUnit(String),

    /// Refused to replace an existing report
    #[error("File already exists: {}", .0.display())]
    FileExists(PathBuf),

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization error (`--json` output)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Short title used for error dialogs
    pub fn title(&self) -> &'static str {
        match self {
            Error::InvalidMeasurement | Error::MalformedInput | Error::UnknownUnit(_) => {
                "Invalid input"
            }
            Error::NoResultToSave => "No Results",
            Error::FileExists(_) | Error::Io(_) => "Save failed",
            Error::Json(_) => "Output error",
            Error::Toml(_) | Error::Config(_) => "Configuration error",
        }
    }
}
