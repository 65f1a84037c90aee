//! TOML configuration file for the writer.
//!
//! ```toml
//! # pixgear.toml
//! [writer]
//! file_name = "run42.pixgear.parquet"
//! geometry_file = "run42_geometry.xml"
//! output_collection_name = "zsdata_m26"
//! dump_mc_truth = true
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use pixgear::writer::WriterConfig;

/// Root configuration structure for pixgear.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Writer settings.
    #[serde(default)]
    pub writer: WriterConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixgear::writer::ChannelLayout;

    #[test]
    fn test_parse_config() {
        let toml = r#"
            [writer]
            file_name = "run42.pixgear.parquet"
            detector_name = "DESY"
            pixel_type = 3
            dump_mc_truth = true
            output_collection_name = "hits"
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.writer.file_name, Path::new("run42.pixgear.parquet"));
        assert_eq!(config.writer.detector_name, "DESY");
        assert_eq!(config.writer.pixel_type, 3);
        assert!(config.writer.dump_mc_truth);
        assert_eq!(
            config.writer.channel_layout().unwrap(),
            ChannelLayout::Single("hits".to_string())
        );
    }

    #[test]
    fn test_both_naming_modes_fail_resolution() {
        let toml = r#"
            [writer]
            output_collection_name = "hits"

            [[writer.detector_assignment]]
            detector = "plane0"
            collection = "hits"
            sensor_id = 0
        "#;

        let config = Config::from_str(toml).unwrap();
        assert!(config.writer.channel_layout().is_err());
    }

    #[test]
    fn test_empty_config() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config.writer, WriterConfig::default());
    }

    #[test]
    fn test_unknown_key() {
        assert!(Config::from_str("[writer]\nfile = \"x\"").is_err());
    }
}
