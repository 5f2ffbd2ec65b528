use std::path::PathBuf;

use thiserror::Error;

/// Invalid or unreadable scan settings. Fatal before any lookup is made.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("a target domain is required")]
    MissingDomain,

    #[error("thread count must be greater than 0")]
    InvalidThreads,

    #[error("per-attempt timeout must be greater than 0")]
    InvalidTimeout,

    #[error("invalid output format '{0}', expected 'text' or 'json'")]
    InvalidOutputFormat(String),

    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write config file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum WordlistError {
    #[error("failed to read wordlist {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failure to obtain live provider ranges. Always recovered with the embedded table.
#[derive(Debug, Error)]
pub enum RangeFetchError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("provider API answered with status {0}")]
    Status(u16),

    #[error("provider API reported an unsuccessful response")]
    Unsuccessful,

    #[error("range fetch cancelled")]
    Cancelled,
}

/// A single DNS query failed. Recovered per job.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("no records found for {0}")]
    NoRecords(String),

    #[error("lookup of {0} timed out")]
    Timeout(String),

    #[error("resolver error: {0}")]
    Resolve(String),

    #[error("lookup cancelled")]
    Cancelled,
}

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to create {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write results: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode results: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Errors that abort a whole scan.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Wordlist(#[from] WordlistError),

    #[error("scan cancelled before all results were collected")]
    Cancelled,
}
