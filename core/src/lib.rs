//! # Cloudrip Core
//!
//! The scanning engine and the adapters it is wired to by default.
//!
//! * **[`scanner`]**: feeder, worker pool and collector behind [`scanner::Scanner`].
//! * **[`resolver`]**: retrying resolver client and the system DNS adapter.
//! * **[`ranges`]**: live provider range fetch with fallback to the embedded table.
//! * **[`metrics`]**, **[`health`]**: runtime counters and process health.
//! * **[`wordlist`]**: file backed wordlist repository.

pub mod health;
pub mod metrics;
pub mod ranges;
pub mod resolver;
pub mod scanner;
pub mod wordlist;
