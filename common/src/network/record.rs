//! # Resolution Records
//!
//! The units that flow through a scan: a [`Job`] goes in, [`ResolvedAddress`]es
//! come back from the resolver and qualifying ones leave as [`ResultEntry`]s.

use std::fmt;
use std::net::IpAddr;

use serde::{Deserialize, Serialize};

/// DNS record type of a resolved address, inferred from its family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RecordType {
    A,
    AAAA,
}

impl RecordType {
    pub fn of(ip: &IpAddr) -> Self {
        match ip {
            IpAddr::V4(_) => RecordType::A,
            IpAddr::V6(_) => RecordType::AAAA,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::AAAA => "AAAA",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResolvedAddress {
    pub ip: IpAddr,
    pub record_type: RecordType,
}

impl From<IpAddr> for ResolvedAddress {
    fn from(ip: IpAddr) -> Self {
        Self {
            ip,
            record_type: RecordType::of(&ip),
        }
    }
}

/// One candidate origin address for a name. Unique by `(fqdn, ip, type)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResultEntry {
    pub fqdn: String,
    pub ip: String,
    #[serde(rename = "type")]
    pub record_type: RecordType,
}

impl ResultEntry {
    pub fn new(fqdn: impl Into<String>, ip: impl Into<String>, record_type: RecordType) -> Self {
        Self {
            fqdn: fqdn.into(),
            ip: ip.into(),
            record_type,
        }
    }

    /// Whether `other` carries the same address under the same record type.
    pub fn same_address(&self, other: &ResultEntry) -> bool {
        self.ip == other.ip && self.record_type == other.record_type
    }
}

impl fmt::Display for ResultEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} ({})", self.fqdn, self.ip, self.record_type)
    }
}

/// A single wordlist entry waiting to be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub subdomain: String,
}

impl Job {
    pub fn new(subdomain: impl Into<String>) -> Self {
        Self {
            subdomain: subdomain.into(),
        }
    }

    /// Joins the label with the target domain. An empty label checks the domain itself.
    pub fn fqdn(&self, domain: &str) -> String {
        if self.subdomain.is_empty() {
            domain.to_string()
        } else {
            format!("{}.{}", self.subdomain, domain)
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
