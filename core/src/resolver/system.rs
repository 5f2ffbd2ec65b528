use std::net::IpAddr;

use async_trait::async_trait;
use cloudrip_common::error::LookupError;
use cloudrip_common::resolver::DnsResolver;
use hickory_resolver::config::ResolverConfig;
use hickory_resolver::name_server::TokioConnectionProvider;
use hickory_resolver::proto::rr::RecordType;
use hickory_resolver::{ResolveError, TokioResolver};
use tracing::warn;

/// Resolver backed by the host's DNS configuration.
pub struct SystemResolver {
    resolver: TokioResolver,
}

impl SystemResolver {
    /// Reads the system resolver configuration, falling back to the library
    /// defaults when none can be loaded.
    pub fn new() -> Self {
        let resolver = match TokioResolver::builder(TokioConnectionProvider::default()) {
            Ok(builder) => builder.build(),
            Err(e) => {
                warn!("System resolver configuration unavailable, using library defaults: {e}");
                TokioResolver::builder_with_config(
                    ResolverConfig::default(),
                    TokioConnectionProvider::default(),
                )
                .build()
            }
        };
        Self { resolver }
    }
}

impl Default for SystemResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DnsResolver for SystemResolver {
    async fn lookup_ip(&self, fqdn: &str) -> Result<Vec<IpAddr>, LookupError> {
        let lookup = self
            .resolver
            .lookup_ip(fqdn)
            .await
            .map_err(|e| map_error(fqdn, e))?;
        Ok(lookup.iter().collect())
    }

    async fn lookup_cname(&self, fqdn: &str) -> Result<String, LookupError> {
        let lookup = self
            .resolver
            .lookup(fqdn, RecordType::CNAME)
            .await
            .map_err(|e| map_error(fqdn, e))?;

        lookup
            .iter()
            .find_map(|rdata| rdata.as_cname().map(|cname| cname.0.to_string()))
            .ok_or_else(|| LookupError::NoRecords(fqdn.to_string()))
    }
}

fn map_error(fqdn: &str, err: ResolveError) -> LookupError {
    if err.is_no_records_found() {
        LookupError::NoRecords(fqdn.to_string())
    } else {
        LookupError::Resolve(err.to_string())
    }
}
