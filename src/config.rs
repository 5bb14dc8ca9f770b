use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub planet: PlanetConfig,
    #[serde(default)]
    pub feeds: Vec<FeedConfig>,
}

/// Site-wide settings from the `[planet]` table.
#[derive(Debug, Deserialize, Clone)]
pub struct PlanetConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_items_per_page")]
    pub items_per_page: usize,
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "default_date_format")]
    pub date_format: String,
    #[serde(default = "default_encoding")]
    pub encoding: String,
    /// Days without a new entry before a feed counts as dormant.
    /// Reserved for inactivity-based pruning; the pipeline does not
    /// apply it yet.
    #[serde(default = "default_activity_threshold")]
    pub activity_threshold: u32,
}

impl Default for PlanetConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            items_per_page: default_items_per_page(),
            max_pages: default_max_pages(),
            output_dir: default_output_dir(),
            date_format: default_date_format(),
            encoding: default_encoding(),
            activity_threshold: default_activity_threshold(),
        }
    }
}

fn default_name() -> String {
    "Planet".to_string()
}

fn default_items_per_page() -> usize {
    25
}

fn default_max_pages() -> usize {
    10
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./output")
}

fn default_date_format() -> String {
    "%B %d, %Y %I:%M %p %Z".to_string()
}

fn default_encoding() -> String {
    "utf-8".to_string()
}

fn default_activity_threshold() -> u32 {
    180
}

#[derive(Debug, Deserialize, Clone)]
pub struct FeedConfig {
    pub name: String,
    pub url: String,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parse config from a TOML string (useful for testing)
    pub fn from_str(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.planet.items_per_page > 0,
            "items_per_page must be greater than zero"
        );
        anyhow::ensure!(
            self.planet.max_pages > 0,
            "max_pages must be greater than zero"
        );
        Ok(())
    }
}
