use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fs;

/// Sampling grid configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    #[serde(default = "default_n")]
    pub n: usize,
    #[serde(default = "default_min")]
    pub min: f64,
    #[serde(default = "default_max")]
    pub max: f64,
}

fn default_n() -> usize {
    20
}

fn default_min() -> f64 {
    -5.0
}

fn default_max() -> f64 {
    5.0
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            n: default_n(),
            min: default_min(),
            max: default_max(),
        }
    }
}

impl GridConfig {
    fn validate(&self) -> Result<()> {
        if self.n < 2 {
            return Err(anyhow!("Grid needs at least 2 points per axis, got {}", self.n));
        }
        if !(self.max > self.min) {
            return Err(anyhow!(
                "Grid bounds must satisfy max > min (min={}, max={})",
                self.min,
                self.max
            ));
        }
        Ok(())
    }
}

/// Fan flow configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowConfig {
    #[serde(default = "default_epsilon")]
    pub epsilon: f64, // Additive distance offset, keeps r strictly positive
    #[serde(default)]
    pub plane_y: f64, // Height of the blocking plane (default 0.0)
}

fn default_epsilon() -> f64 {
    1e-6
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            epsilon: default_epsilon(),
            plane_y: 0.0,
        }
    }
}

impl FlowConfig {
    fn validate(&self) -> Result<()> {
        if !(self.epsilon > 0.0 && self.epsilon.is_finite()) {
            return Err(anyhow!(
                "Flow epsilon must be positive and finite, got {}",
                self.epsilon
            ));
        }
        if !self.plane_y.is_finite() {
            return Err(anyhow!("Plane height must be finite, got {}", self.plane_y));
        }
        Ok(())
    }
}

/// Visualization configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisualizationConfig {
    #[serde(default = "default_image_width")]
    pub image_width: u32,
    #[serde(default = "default_image_height")]
    pub image_height: u32,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

fn default_image_width() -> u32 {
    1200
}

fn default_image_height() -> u32 {
    600
}

fn default_output_dir() -> String {
    "output".to_string()
}

impl Default for VisualizationConfig {
    fn default() -> Self {
        Self {
            image_width: default_image_width(),
            image_height: default_image_height(),
            output_dir: default_output_dir(),
        }
    }
}

impl VisualizationConfig {
    fn validate(&self) -> Result<()> {
        if self.image_width == 0 || self.image_height == 0 {
            return Err(anyhow!(
                "Image dimensions must be positive (width={}, height={})",
                self.image_width,
                self.image_height
            ));
        }
        if self.output_dir.is_empty() {
            return Err(anyhow!("Output directory must not be empty"));
        }
        Ok(())
    }
}

/// Complete run configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub flow: FlowConfig,
    #[serde(default)]
    pub visualization: VisualizationConfig,
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read config file '{}': {}", path, e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse TOML config: {}", e))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate all configuration parameters
    pub fn validate(&self) -> Result<()> {
        self.grid.validate()?;
        self.flow.validate()?;
        self.visualization.validate()?;
        Ok(())
    }

    /// Print configuration summary
    pub fn print_summary(&self) {
        println!("=== Fan Flow Configuration ===");
        println!(
            "Grid: {}x{} points over [{}, {}]²",
            self.grid.n, self.grid.n, self.grid.min, self.grid.max
        );
        println!(
            "Flow: epsilon={}, blocking plane at y={}",
            self.flow.epsilon, self.flow.plane_y
        );
        println!(
            "Visualization: {}x{} px to {}/",
            self.visualization.image_width,
            self.visualization.image_height,
            self.visualization.output_dir
        );
        println!("==============================");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_script_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.grid.n, 20);
        assert_eq!(config.grid.min, -5.0);
        assert_eq!(config.grid.max, 5.0);
        assert_eq!(config.flow.epsilon, 1e-6);
        assert_eq!(config.flow.plane_y, 0.0);
        assert_eq!(config.visualization.output_dir, "output");
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config: Config = toml::from_str("[grid]\nn = 41\n").unwrap();
        assert_eq!(config.grid.n, 41);
        assert_eq!(config.grid.max, 5.0);
        assert_eq!(config.visualization.image_width, 1200);
    }

    #[test]
    fn rejects_bad_epsilon() {
        let config: Config = toml::from_str("[flow]\nepsilon = 0.0\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_inverted_grid_bounds() {
        let config: Config = toml::from_str("[grid]\nmin = 5.0\nmax = -5.0\n").unwrap();
        assert!(config.validate().is_err());
    }
}
