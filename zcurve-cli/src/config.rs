//! Configuration handling for the zcurve CLI
//!
//! Supports loading configuration from zcurve.toml files with CLI argument overrides.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use zcurve_core::PlotFormat;
use zcurve_render::ExportConfig;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub batch: BatchConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory plots are written to; must already exist
    #[serde(default = "default_directory")]
    pub directory: PathBuf,

    /// Plot formats written for every input
    #[serde(default = "default_formats")]
    pub formats: Vec<PlotFormat>,

    /// When set, GC content is written to this file instead of the terminal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gc_report: Option<PathBuf>,
}

/// Overrides applied on top of the rendering style. Unset keys leave the
/// style file (or the built-in defaults) alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// TOML rendering style file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,

    /// Maximum number of points drawn per curve
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_points: Option<usize>,

    /// View rotation around the Z axis, degrees
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theta: Option<f64>,

    /// View elevation, degrees
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phi: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Stop at the first failing input instead of moving on
    #[serde(default)]
    pub fail_fast: bool,
}

// Default value functions
fn default_directory() -> PathBuf { PathBuf::from(".") }
fn default_formats() -> Vec<PlotFormat> { vec![PlotFormat::Png] }

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            formats: default_formats(),
            gc_report: None,
        }
    }
}

impl RenderConfig {
    /// Apply the overrides that are set to `export`.
    pub fn apply_to(&self, export: &mut ExportConfig) {
        if let Some(width) = self.width { export.width = width; }
        if let Some(height) = self.height { export.height = height; }
        if let Some(max_points) = self.max_points { export.max_points = max_points; }
        if let Some(theta) = self.theta { export.theta = theta; }
        if let Some(phi) = self.phi { export.phi = phi; }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => {
                log::info!("Loading configuration from: {}", path.display());
                Self::load_from_file(path)?
            }
            None => {
                // Try to find zcurve.toml in current directory
                let default_path = PathBuf::from("zcurve.toml");
                if default_path.exists() {
                    log::info!("Loading configuration from: zcurve.toml");
                    Self::load_from_file(&default_path)?
                } else {
                    log::debug!("Using default configuration");
                    Self::default()
                }
            }
        };

        Ok(config)
    }

    /// Load configuration from a specific TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse configuration file: {}", path.display()))?;

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = self.to_toml()?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write configuration file: {}", path.display()))?;

        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }

    /// Example configuration with every key filled in
    pub fn example() -> Self {
        let defaults = ExportConfig::default();
        Self {
            output: OutputConfig {
                directory: PathBuf::from("plots"),
                formats: vec![PlotFormat::Png, PlotFormat::Svg],
                gc_report: Some(PathBuf::from("GC_content_output.txt")),
            },
            render: RenderConfig {
                style: Some(PathBuf::from("zcurve_style.toml")),
                width: Some(defaults.width),
                height: Some(defaults.height),
                max_points: Some(defaults.max_points),
                theta: Some(defaults.theta),
                phi: Some(defaults.phi),
            },
            batch: BatchConfig { fail_fast: false },
        }
    }

    pub fn example_toml() -> Result<String> {
        Self::example().to_toml()
    }
}
