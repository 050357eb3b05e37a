use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use serde::Deserialize;
use thiserror::Error;

use crate::adapters::slack::DEFAULT_API_URL;
use crate::domain::{MountThreshold, ThresholdError, ThresholdSpec};

pub const DEFAULT_DISKS: &str = "/ /tmp";
pub const DEFAULT_THRESHOLDS: &str = "10 10";
pub const DEFAULT_TARGET: &str = "#target_slack_channel";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Threshold(#[from] ThresholdError),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Command line flags
#[derive(Debug, Clone, Parser)]
#[command(version, about)]
pub struct Args {
    /// Mount paths to check, separated by spaces [default: "/ /tmp"]
    #[arg(long)]
    pub disk: Option<String>,

    /// Minimum free space percentage per mount, same count as --disk [default: "10 10"]
    #[arg(long)]
    pub threshold: Option<String>,

    /// Slack channel or user to alert [default: "#target_slack_channel"]
    #[arg(long)]
    pub target: Option<String>,

    /// TOML file with [[mount]] entries, replaces --disk and --threshold
    #[arg(long, value_name = "FILE", conflicts_with_all = ["disk", "threshold"])]
    pub config: Option<PathBuf>,

    /// Give up on an alert that gets no answer within this many seconds
    #[arg(long, value_name = "SECONDS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,
}

/// Layout of the optional `--config` file
#[derive(Debug, Deserialize)]
struct ConfigFile {
    target: Option<String>,
    #[serde(default, rename = "mount")]
    mounts: Vec<MountThreshold>,
}

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub spec: ThresholdSpec,
    pub target: String,
    pub timeout: Option<Duration>,
    pub slack_token: Option<String>,
    pub slack_api_url: String,
}

impl Config {
    pub fn from_args(args: Args) -> Result<Self, ConfigError> {
        Self::load(args, |key| env::var(key).ok())
    }

    fn load(args: Args, var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let file = args.config.as_deref().map(read_config_file).transpose()?;

        let spec = match &file {
            Some(file) => ThresholdSpec::new(file.mounts.clone())?,
            None => {
                let disks = args.disk.as_deref().unwrap_or(DEFAULT_DISKS);
                let thresholds = args.threshold.as_deref().unwrap_or(DEFAULT_THRESHOLDS);
                ThresholdSpec::from_lists(
                    &disks.split_whitespace().collect::<Vec<_>>(),
                    &thresholds.split_whitespace().collect::<Vec<_>>(),
                )?
            }
        };

        let target = args
            .target
            .or_else(|| file.and_then(|f| f.target))
            .unwrap_or_else(|| DEFAULT_TARGET.to_string());

        Ok(Self {
            spec,
            target,
            timeout: args.timeout.map(Duration::from_secs),
            slack_token: var("SLACK_SECRET_KEY").filter(|t| !t.is_empty()),
            slack_api_url: var("SLACK_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        })
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("spec", &self.spec)
            .field("target", &self.target)
            .field("timeout", &self.timeout)
            .field("slack_token", &self.slack_token.as_ref().map(|_| "<redacted>"))
            .field("slack_api_url", &self.slack_api_url)
            .finish()
    }
}

/// Default log level, overridden by `RUST_LOG`
pub fn log_level() -> String {
    env::var("DISKSPACE2SLACK_LOG_LEVEL").unwrap_or_else(|_| "info".to_string())
}

fn read_config_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Toml {
        path: path.to_path_buf(),
        source,
    })
}
