use crate::error::{Result, UploadMonitorError};
use serde::Deserialize;
use std::env;

/// Configuration for the upload monitor
#[derive(Debug, Clone, Deserialize)]
pub struct MonitorConfig {
    /// Upload tracking configuration
    #[serde(default)]
    pub tracking: TrackingConfig,

    /// Panel rendering configuration
    #[serde(default)]
    pub panel: PanelConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackingConfig {
    /// Path substrings that identify upload endpoints
    #[serde(default = "default_endpoints")]
    pub endpoints: Vec<String>,

    /// Minimum time between speed recalculations, in milliseconds
    #[serde(default = "default_speed_sample_ms")]
    pub speed_sample_ms: u64,

    /// Minimum time between progress-driven panel repaints, in milliseconds
    #[serde(default = "default_render_coalesce_ms")]
    pub render_coalesce_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PanelConfig {
    /// Title shown in the panel header
    #[serde(default = "default_title")]
    pub title: String,

    /// Width of the progress bar in characters
    #[serde(default = "default_bar_width")]
    pub bar_width: usize,

    /// Maximum displayed file name length before truncation
    #[serde(default = "default_max_name_len")]
    pub max_name_len: usize,
}

fn default_endpoints() -> Vec<String> {
    vec![
        "/remote.php/dav/".to_string(),
        "/remote.php/webdav/".to_string(),
        "/uploads/".to_string(),
    ]
}

fn default_speed_sample_ms() -> u64 {
    500
}

fn default_render_coalesce_ms() -> u64 {
    100
}

fn default_title() -> String {
    "Uploads".to_string()
}

fn default_bar_width() -> usize {
    30
}

fn default_max_name_len() -> usize {
    40
}

impl MonitorConfig {
    /// Load configuration from an optional TOML file with environment variable overrides
    pub fn load(config_name: &str) -> Result<Self> {
        let source = config::Config::builder()
            .add_source(config::File::with_name(config_name).required(false))
            .build()
            .map_err(|e| {
                UploadMonitorError::ConfigLoad(format!(
                    "Cannot read config '{}': {}",
                    config_name, e
                ))
            })?;

        let mut monitor_config: MonitorConfig = source.try_deserialize().map_err(|e| {
            UploadMonitorError::ConfigLoad(format!("Invalid config '{}': {}", config_name, e))
        })?;

        // Apply environment variable overrides
        monitor_config.apply_env_overrides()?;

        // Validate the configuration
        monitor_config.validate()?;

        Ok(monitor_config)
    }

    /// Apply environment variable overrides to config
    fn apply_env_overrides(&mut self) -> Result<()> {
        // Tracking overrides
        if let Ok(endpoints) = env::var("UPLOAD_MONITOR_ENDPOINTS") {
            self.tracking.endpoints = endpoints
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
        }

        if let Ok(sample_ms_str) = env::var("UPLOAD_MONITOR_SPEED_SAMPLE_MS") {
            self.tracking.speed_sample_ms = sample_ms_str.parse().map_err(|_| {
                UploadMonitorError::InvalidConfigValue(
                    "UPLOAD_MONITOR_SPEED_SAMPLE_MS must be a valid number of milliseconds"
                        .to_string(),
                )
            })?;
        }

        if let Ok(coalesce_ms_str) = env::var("UPLOAD_MONITOR_RENDER_COALESCE_MS") {
            self.tracking.render_coalesce_ms = coalesce_ms_str.parse().map_err(|_| {
                UploadMonitorError::InvalidConfigValue(
                    "UPLOAD_MONITOR_RENDER_COALESCE_MS must be a valid number of milliseconds"
                        .to_string(),
                )
            })?;
        }

        // Panel overrides
        if let Ok(title) = env::var("UPLOAD_MONITOR_TITLE") {
            self.panel.title = title;
        }

        if let Ok(bar_width_str) = env::var("UPLOAD_MONITOR_BAR_WIDTH") {
            self.panel.bar_width = bar_width_str.parse().map_err(|_| {
                UploadMonitorError::InvalidConfigValue(
                    "UPLOAD_MONITOR_BAR_WIDTH must be a valid width in characters".to_string(),
                )
            })?;
        }

        if let Ok(max_name_len_str) = env::var("UPLOAD_MONITOR_MAX_NAME_LEN") {
            self.panel.max_name_len = max_name_len_str.parse().map_err(|_| {
                UploadMonitorError::InvalidConfigValue(
                    "UPLOAD_MONITOR_MAX_NAME_LEN must be a valid length in characters".to_string(),
                )
            })?;
        }

        Ok(())
    }

    /// Validate the basic configuration
    pub fn validate(&self) -> Result<()> {
        // Check that at least one endpoint pattern is present
        if self.tracking.endpoints.is_empty() {
            return Err(UploadMonitorError::InvalidConfigValue(
                "At least one upload endpoint pattern is required".to_string(),
            ));
        }

        if self.tracking.endpoints.iter().any(|p| p.is_empty()) {
            return Err(UploadMonitorError::InvalidConfigValue(
                "Endpoint patterns cannot be empty".to_string(),
            ));
        }

        // Check sampling interval
        if self.tracking.speed_sample_ms == 0 {
            return Err(UploadMonitorError::InvalidConfigValue(
                "Speed sampling interval cannot be 0".to_string(),
            ));
        }

        // Check panel dimensions
        if self.panel.bar_width == 0 {
            return Err(UploadMonitorError::InvalidConfigValue(
                "Progress bar width cannot be 0".to_string(),
            ));
        }

        if self.panel.max_name_len < 4 {
            return Err(UploadMonitorError::InvalidConfigValue(
                "Maximum name length must be at least 4 characters".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            tracking: TrackingConfig::default(),
            panel: PanelConfig::default(),
        }
    }
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            endpoints: default_endpoints(),
            speed_sample_ms: default_speed_sample_ms(),
            render_coalesce_ms: default_render_coalesce_ms(),
        }
    }
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            bar_width: default_bar_width(),
            max_name_len: default_max_name_len(),
        }
    }
}

impl std::fmt::Display for MonitorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Upload Monitor Config - Endpoints: [{}], Speed Sample: {}ms, Render Coalesce: {}ms, Bar Width: {}",
            self.tracking.endpoints.join(", "),
            self.tracking.speed_sample_ms,
            self.tracking.render_coalesce_ms,
            self.panel.bar_width
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = MonitorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.tracking.speed_sample_ms, 500);
        assert!(
            config
                .tracking
                .endpoints
                .iter()
                .any(|p| p == "/remote.php/dav/")
        );
    }

    #[test]
    fn test_validate_rejects_empty_endpoints() {
        let mut config = MonitorConfig::default();
        config.tracking.endpoints.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_sample_interval() {
        let mut config = MonitorConfig::default();
        config.tracking.speed_sample_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_bar_width() {
        let mut config = MonitorConfig::default();
        config.panel.bar_width = 0;
        assert!(config.validate().is_err());
    }
}
