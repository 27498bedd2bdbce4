//! Configuration
//!
//! Values come from an optional TOML file and are overridden by CLI flags
//! and environment variables (`ADO_ORGANIZATION`, `ADO_TOKEN`).
//!
//! ```toml
//! organization = "contoso"
//! auth = "pat"
//! threshold_mb = 250
//! output = "reports/large-files.xlsx"
//! timeout_secs = 30
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use time::OffsetDateTime;

use crate::cli::Cli;
use crate::model::SizeThreshold;
use crate::provider::{ClientOptions, Credential};
use crate::util::file_stamp;

const DEFAULT_TOP_N: usize = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("missing {0}; pass it on the command line, via environment or in the config file")]
    Missing(&'static str),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AuthScheme {
    /// `Authorization: Bearer <token>`
    #[default]
    Bearer,
    /// Personal access token over basic auth
    Pat,
}

/// Contents of the TOML config file. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub organization: Option<String>,
    pub token: Option<String>,
    pub auth: Option<AuthScheme>,
    pub threshold_mb: Option<u64>,
    pub output: Option<PathBuf>,
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub max_retries: Option<u32>,
    pub retry_backoff_ms: Option<u64>,
    pub page_size: Option<u32>,
    pub top_n: Option<usize>,
}

impl FileConfig {
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, path)
    }

    fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// `<config dir>/adoscan/config.toml`
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("adoscan").join("config.toml"))
    }

    /// Load the explicit file if given (must exist), else the default file
    /// if it exists, else an empty config.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load_from_file(path);
        }
        match Self::default_config_path() {
            Some(path) if path.exists() => Self::load_from_file(&path),
            _ => Ok(Self::default()),
        }
    }
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub organization: String,
    pub credential: Credential,
    pub threshold: SizeThreshold,
    /// `None` when the Excel report is disabled
    pub output: Option<PathBuf>,
    pub client: ClientOptions,
    pub top_n: usize,
}

impl Settings {
    /// Merge CLI over file config and validate. `now` names the default report file.
    pub fn resolve(cli: &Cli, file: FileConfig, now: OffsetDateTime) -> Result<Self, ConfigError> {
        let organization = cli
            .organization
            .clone()
            .or(file.organization)
            .filter(|o| !o.trim().is_empty())
            .ok_or(ConfigError::Missing("organization"))?;

        let token = cli
            .token
            .clone()
            .or(file.token)
            .filter(|t| !t.trim().is_empty())
            .ok_or(ConfigError::Missing("token"))?;
        let credential = match cli.auth.or(file.auth).unwrap_or_default() {
            AuthScheme::Bearer => Credential::Bearer(token),
            AuthScheme::Pat => Credential::Pat(token),
        };

        let threshold_mb = cli
            .threshold_mb
            .or(file.threshold_mb)
            .unwrap_or(SizeThreshold::DEFAULT_MB);
        if threshold_mb == 0 {
            return Err(ConfigError::Invalid("threshold_mb must be greater than 0".into()));
        }

        let output = if cli.no_excel {
            None
        } else {
            Some(
                cli.output
                    .clone()
                    .or(file.output)
                    .unwrap_or_else(|| default_output_path(&organization, now)),
            )
        };

        let defaults = ClientOptions::default();
        let client = ClientOptions {
            base_url: cli.base_url.clone().or(file.base_url),
            timeout: cli
                .timeout_secs
                .or(file.timeout_secs)
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
            max_retries: cli.max_retries.or(file.max_retries).unwrap_or(defaults.max_retries),
            retry_backoff: file
                .retry_backoff_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.retry_backoff),
            page_size: file.page_size.unwrap_or(defaults.page_size),
        };
        if client.timeout.is_zero() {
            return Err(ConfigError::Invalid("timeout_secs must be greater than 0".into()));
        }
        if client.page_size == 0 {
            return Err(ConfigError::Invalid("page_size must be greater than 0".into()));
        }

        Ok(Self {
            organization,
            credential,
            threshold: SizeThreshold::from_megabytes(threshold_mb),
            output,
            client,
            top_n: cli.top.or(file.top_n).unwrap_or(DEFAULT_TOP_N),
        })
    }
}

/// `AzureDevOps_LargeFiles_<org>_<YYYYMMDD_HHMMSS>.xlsx`
pub fn default_output_path(organization: &str, now: OffsetDateTime) -> PathBuf {
    PathBuf::from(format!(
        "AzureDevOps_LargeFiles_{}_{}.xlsx",
        organization,
        file_stamp(now)
    ))
}
