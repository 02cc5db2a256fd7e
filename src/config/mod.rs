mod file_config;

pub use file_config::FileConfig;

use clap::ValueEnum;
use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::level_filters::LevelFilter;

/// What deleting an artist does to the songs that reference it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CascadePolicy {
    /// Refuse the deletion while songs reference the artist.
    #[default]
    Reject,
    /// Delete the referencing songs, with their links and index entries,
    /// together with the artist.
    CascadeDelete,
}

impl CascadePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            CascadePolicy::Reject => "reject",
            CascadePolicy::CascadeDelete => "cascade_delete",
        }
    }
}

impl fmt::Display for CascadePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CascadePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "reject" => Ok(CascadePolicy::Reject),
            "cascade_delete" => Ok(CascadePolicy::CascadeDelete),
            other => Err(format!(
                "Invalid cascade policy '{}'. Valid policies are: reject, cascade_delete",
                other
            )),
        }
    }
}

/// Settings of a [`Catalog`](crate::catalog::Catalog) instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogConfig {
    pub cascade_policy: CascadePolicy,
}

impl CatalogConfig {
    pub fn with_cascade_policy(cascade_policy: CascadePolicy) -> Self {
        CatalogConfig { cascade_policy }
    }
}

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub cascade_policy: CascadePolicy,
    pub logging_level: Option<String>,
    pub seed_path: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub catalog: CatalogConfig,
    pub logging_level: LevelFilter,
    pub seed_path: Option<PathBuf>,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> anyhow::Result<Self> {
        let file = file_config.unwrap_or_default();

        let cascade_policy = file.cascade_policy.unwrap_or(cli.cascade_policy);

        let logging_level = match file.logging_level.or_else(|| cli.logging_level.clone()) {
            Some(level) => parse_logging_level(&level)
                .ok_or_else(|| anyhow::anyhow!("Invalid logging level: {}", level))?,
            None => LevelFilter::INFO,
        };

        let seed_path = file
            .seed_path
            .map(PathBuf::from)
            .or_else(|| cli.seed_path.clone());
        if let Some(path) = seed_path.as_ref() {
            if !path.is_file() {
                anyhow::bail!("Seed file does not exist: {:?}", path);
            }
        }

        Ok(AppConfig {
            catalog: CatalogConfig::with_cascade_policy(cascade_policy),
            logging_level,
            seed_path,
        })
    }
}

fn parse_logging_level(s: &str) -> Option<LevelFilter> {
    LevelFilter::from_str(s).ok()
}
