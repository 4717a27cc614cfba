use thiserror::Error;

/// Top-level error type for the Kisan workspace.
///
/// Subsystem crates define their own error enums and convert from
/// `KisanError` where they sit on top of storage or configuration, so the
/// `?` operator works across crate boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum KisanError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for KisanError {
    fn from(err: toml::de::Error) -> Self {
        KisanError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for KisanError {
    fn from(err: toml::ser::Error) -> Self {
        KisanError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for KisanError {
    fn from(err: serde_json::Error) -> Self {
        KisanError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Kisan operations.
pub type Result<T> = std::result::Result<T, KisanError>;
