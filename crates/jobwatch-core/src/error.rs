use thiserror::Error;

/// Errors surfaced by the few fallible operations in jobwatch.
///
/// Registry and scheduler operations are total, so in practice this only
/// covers configuration loading.
#[derive(Debug, Error)]
pub enum WatchError {
    #[error("Configuration error: {0}")]
    Config(String),
}

impl WatchError {
    /// Short error code string for log correlation.
    pub fn code(&self) -> &'static str {
        match self {
            WatchError::Config(_) => "CONFIG_ERROR",
        }
    }
}

pub type Result<T> = std::result::Result<T, WatchError>;
