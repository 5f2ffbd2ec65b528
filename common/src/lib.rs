//! # Cloudrip Common
//!
//! Shared models, configuration, error kinds and the port traits that the
//! scanning engine in `cloudrip-core` depends on.
//!
//! * **[`network`]**: address records, scan jobs and provider range sets.
//! * **[`config`]**: scan configuration, defaults and file loading.
//! * **[`error`]**: typed error kinds for every stage of a scan.
//! * **[`resolver`]**, **[`provider`]**, **[`wordlist`]**, **[`progress`]**:
//!   boundaries implemented by adapters in `cloudrip-core` and `cloudrip-cli`.

pub mod config;
pub mod error;
pub mod network;
pub mod progress;
pub mod provider;
pub mod resolver;
pub mod scan;
pub mod utils;
pub mod wordlist;

/// Logs a positive outcome. Rendered with a distinct marker by the CLI formatter.
#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        ::tracing::info!(target: "cloudrip::success", $($arg)*)
    };
}
