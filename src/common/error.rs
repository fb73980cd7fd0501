use rust_bert::RustBertError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DemoError {
    #[error("Model error: {0}")]
    ModelError(String),

    #[error("IO error: {0}")]
    IOError(String),

    #[error("Invalid configuration error: {0}")]
    InvalidConfigurationError(String),

    #[error("Invalid input error: {0}")]
    InvalidInputError(String),

    #[error("Unsupported language error: {0}")]
    UnsupportedLanguageError(String),

    #[error("Empty output error: {0} returned no sequence")]
    EmptyOutputError(String),

    #[error("Model unavailable error: {0}")]
    ModelUnavailableError(String),
}

impl From<RustBertError> for DemoError {
    fn from(error: RustBertError) -> Self {
        DemoError::ModelError(error.to_string())
    }
}

impl From<std::io::Error> for DemoError {
    fn from(error: std::io::Error) -> Self {
        DemoError::IOError(error.to_string())
    }
}

impl From<serde_json::Error> for DemoError {
    fn from(error: serde_json::Error) -> Self {
        DemoError::InvalidConfigurationError(error.to_string())
    }
}
