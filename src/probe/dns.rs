//! DNS inspection for reporting
//!
//! Independent of the reachability probe: resolves an endpoint's hostname,
//! recording resolution time and the resolved addresses, or the error when
//! resolution fails. Failures here never affect the probe attempts.

use crate::error::{AppError, Result};
use crate::models::DnsResolution;
use crate::probe::http::probe_url;
use std::net::IpAddr;
use std::time::{Duration, Instant};
use trust_dns_resolver::{system_conf, TokioAsyncResolver};

/// Timed hostname resolver backed by the system DNS configuration
pub struct DnsInspector {
    resolver: TokioAsyncResolver,
}

impl DnsInspector {
    /// Create an inspector from the system resolver configuration
    pub fn from_system() -> Result<Self> {
        let (config, opts) = system_conf::read_system_conf().map_err(|e| {
            AppError::dns_resolution(format!("Failed to read system DNS config: {}", e))
        })?;

        Ok(Self {
            resolver: TokioAsyncResolver::tokio(config, opts),
        })
    }

    /// Resolve the hostname of an endpoint address, timing the lookup
    pub async fn inspect(&self, address: &str) -> DnsResolution {
        let start = Instant::now();

        let host = match probe_url(address) {
            Ok(url) => match url.host_str() {
                Some(host) => host.to_string(),
                None => {
                    return DnsResolution::failed("address has no hostname", start.elapsed())
                }
            },
            Err(detail) => return DnsResolution::failed(detail, start.elapsed()),
        };

        // IP-literal addresses need no lookup
        if let Ok(ip) = host.trim_matches(['[', ']']).parse::<IpAddr>() {
            return DnsResolution::resolved(vec![ip], Duration::ZERO);
        }

        match self.resolver.lookup_ip(host.as_str()).await {
            Ok(lookup) => {
                let ips: Vec<IpAddr> = lookup.iter().collect();
                let elapsed = start.elapsed();
                if ips.is_empty() {
                    DnsResolution::failed("no address records found", elapsed)
                } else {
                    DnsResolution::resolved(ips, elapsed)
                }
            }
            Err(e) => DnsResolution::failed(e.to_string(), start.elapsed()),
        }
    }
}
