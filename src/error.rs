use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RepogenError {
    #[error("Manifest not found: {}", path.display())]
    MissingManifest { path: PathBuf },

    #[error("Failed to write {}", path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Permission denied: {path}")]
    Permission { path: String },

    #[error("Invalid path: {path}")]
    InvalidPath { path: String },
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for RepogenError {
    fn user_message(&self) -> String {
        match self {
            RepogenError::MissingManifest { path } => {
                format!("Manifest file does not exist: {}", path.display())
            }
            RepogenError::WriteFailure { path, source } => {
                format!("Failed to write {}: {}", path.display(), source)
            }
            RepogenError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            RepogenError::Permission { path } => {
                format!("Permission denied accessing: {}", path)
            }
            RepogenError::InvalidPath { path } => {
                format!("Invalid file path: {}", path)
            }
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            RepogenError::MissingManifest { .. } => Some(
                "Place a manifest.txt next to the tool's install directory, or pass an explicit path as the first argument.".to_string()
            ),
            RepogenError::WriteFailure { .. } => Some(
                "Check that the destination is writable and that the entry's path contains no invalid characters. Files written before the failure are left in place.".to_string()
            ),
            RepogenError::Config { .. } => Some(
                "Check your configuration file syntax and ensure all required fields are present.".to_string()
            ),
            RepogenError::Permission { .. } => Some(
                "Ensure you have the necessary read/write permissions for the target directory.".to_string()
            ),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for RepogenError {
    fn from(error: toml::de::Error) -> Self {
        RepogenError::Config {
            message: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RepogenError>;
