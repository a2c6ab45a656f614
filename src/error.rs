use std::fmt;

/// Main error type for the upload monitor
#[derive(Debug)]
pub enum UploadMonitorError {
    // Configuration Errors
    ConfigLoad(String),
    InvalidConfigValue(String),

    // Panel Errors
    PanelWrite(std::io::Error),

    // IO Errors
    Io(std::io::Error),

    // General errors
    Other(String),
}

impl fmt::Display for UploadMonitorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Configuration Errors
            Self::ConfigLoad(msg) => write!(f, "Failed to load configuration: {}", msg),
            Self::InvalidConfigValue(msg) => write!(f, "Invalid configuration value: {}", msg),

            // Panel Errors
            Self::PanelWrite(err) => write!(f, "Failed to write panel output: {}", err),

            // IO Errors
            Self::Io(err) => write!(f, "IO error: {}", err),

            // General
            Self::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for UploadMonitorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::PanelWrite(err) => Some(err),
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for UploadMonitorError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<config::ConfigError> for UploadMonitorError {
    fn from(err: config::ConfigError) -> Self {
        Self::ConfigLoad(err.to_string())
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, UploadMonitorError>;
