//! # Scan Configuration
//!
//! Settings for a single scan. Values come from built-in defaults, an optional
//! YAML/JSON file and finally command line flags, in that order.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::resolver::ResolverOptions;

pub const DEFAULT_THREADS: usize = 10;
pub const DEFAULT_RETRIES: u32 = 2;
pub const DEFAULT_BACKOFF: Duration = Duration::from_millis(500);
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_WORDLIST: &str = "dom.txt";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(ConfigError::InvalidOutputFormat(s.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => f.write_str("text"),
            OutputFormat::Json => f.write_str("json"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Target domain, e.g. `example.com`.
    pub domain: String,
    /// Wordlist with one subdomain label per line.
    pub wordlist: PathBuf,
    /// Number of concurrent workers.
    pub threads: usize,
    /// Attempts per lookup beyond the first.
    pub retries: u32,
    /// Base delay between attempts, doubled after every failure.
    #[serde(with = "crate::utils::duration")]
    pub backoff: Duration,
    /// Upper bound for a single DNS attempt.
    #[serde(with = "crate::utils::duration")]
    pub timeout: Duration,
    /// Pause taken by a worker before each job.
    #[serde(with = "crate::utils::duration")]
    pub delay: Duration,
    /// Chase one level of CNAME when a name has no usable address.
    pub follow_cname: bool,
    /// Keep addresses that belong to the provider.
    pub include_cf: bool,
    /// Skip the live range fetch and use the embedded table.
    pub no_fetch_cf: bool,
    pub output: Option<PathBuf>,
    pub output_format: OutputFormat,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            domain: String::new(),
            wordlist: PathBuf::from(DEFAULT_WORDLIST),
            threads: DEFAULT_THREADS,
            retries: DEFAULT_RETRIES,
            backoff: DEFAULT_BACKOFF,
            timeout: DEFAULT_TIMEOUT,
            delay: Duration::ZERO,
            follow_cname: false,
            include_cf: false,
            no_fetch_cf: false,
            output: None,
            output_format: OutputFormat::Text,
        }
    }
}

impl ScanConfig {
    /// Loads a config file. Files ending in `.json` are read as JSON, anything else as YAML.
    ///
    /// Fields missing from the file keep their defaults. The result is not validated,
    /// callers apply their overrides first and then call [`ScanConfig::validate`].
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let config = if is_json {
            serde_json::from_str(&raw)?
        } else {
            serde_yaml::from_str(&raw)?
        };
        Ok(config)
    }

    /// Writes an example configuration to `path`.
    pub fn write_default(path: &Path) -> Result<(), ConfigError> {
        let example = ScanConfig {
            domain: "example.com".to_string(),
            output: Some(PathBuf::from("results.txt")),
            ..ScanConfig::default()
        };
        let yaml = serde_yaml::to_string(&example)?;
        fs::write(path, yaml).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.domain.trim().is_empty() {
            return Err(ConfigError::MissingDomain);
        }
        if self.threads == 0 {
            return Err(ConfigError::InvalidThreads);
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout);
        }
        Ok(())
    }

    pub fn resolver_options(&self) -> ResolverOptions {
        ResolverOptions {
            retries: self.retries,
            backoff: self.backoff,
            timeout: self.timeout,
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
