//! Application configuration for the `waveview` binary.
//!
//! Loaded from YAML. Every section and field is optional, missing ones take
//! their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use transport::TransportConfig;
use waveform::{RenderConfig, ViewConfig};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: 780,
            height: 280,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub surface: SurfaceConfig,
    pub view: ViewConfig,
    pub render: RenderConfig,
    pub transport: TransportConfig,
}

/// Load configuration from a YAML file
///
/// If the file doesn't exist, returns default config.
/// If the file exists but is invalid, logs a warning and returns default config.
pub fn load_config(path: &Path) -> AppConfig {
    log::info!("load_config: Loading from {:?}", path);

    if !path.exists() {
        log::info!("load_config: Config file doesn't exist, using defaults");
        return AppConfig::default();
    }

    match std::fs::read_to_string(path) {
        Ok(contents) => parse_config(&contents),
        Err(e) => {
            log::warn!("load_config: Failed to read config file: {}, using defaults", e);
            AppConfig::default()
        }
    }
}

fn parse_config(contents: &str) -> AppConfig {
    match serde_yaml::from_str::<AppConfig>(contents) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("load_config: Failed to parse config: {}, using defaults", e);
            AppConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.surface.width, 780);
        assert_eq!(config.surface.height, 280);
        assert_eq!(config.view.zoom_in_factor, 1.1);
        assert_eq!(config.transport.tick_interval_ms, 16);
    }

    #[test]
    fn test_partial_yaml_keeps_other_defaults() {
        let config = parse_config(
            "surface:\n  width: 1024\ntransport:\n  follow_margin_px: 50.0\n",
        );
        assert_eq!(config.surface.width, 1024);
        assert_eq!(config.surface.height, 280);
        assert_eq!(config.transport.follow_margin_px, 50.0);
        assert_eq!(config.transport.seek_lead_fraction, 0.1);
        assert_eq!(config.render, RenderConfig::default());
    }

    #[test]
    fn test_invalid_yaml_falls_back_to_defaults() {
        let config = parse_config("surface: [this is not a map");
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = load_config(Path::new("/nonexistent/waveview.yaml"));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("waveview-{}.yaml", std::process::id()));
        std::fs::write(&path, "view:\n  zoom_ceiling: 50.0\n").unwrap();

        let config = load_config(&path);
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.view.zoom_ceiling, 50.0);
        assert_eq!(config.view.zoom_out_factor, 0.9);
    }
}
