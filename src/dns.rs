use hickory_resolver::TokioAsyncResolver;
use std::net::IpAddr;
use std::time::Duration;
use tokio::time::timeout;

/// Best-effort A/AAAA resolution of the request domain, used only for
/// blacklist comparison. One attempt, bounded timeout, failure is `None`.
///
/// The resolver is built once from system configuration and shared across
/// requests, like the fetcher's HTTP client.
pub struct DnsClient {
    resolver: Option<TokioAsyncResolver>,
    timeout: Duration,
}

impl DnsClient {
    pub fn new(timeout_seconds: u64) -> Self {
        let resolver = match TokioAsyncResolver::tokio_from_system_conf() {
            Ok(resolver) => Some(resolver),
            Err(e) => {
                log::warn!("Could not build DNS resolver from system config: {e}");
                None
            }
        };
        Self {
            resolver,
            timeout: Duration::from_secs(timeout_seconds),
        }
    }

    pub async fn resolve(&self, domain: &str) -> Option<IpAddr> {
        if domain.is_empty() {
            return None;
        }
        let resolver = self.resolver.as_ref()?;

        match timeout(self.timeout, resolver.lookup_ip(domain)).await {
            Ok(Ok(lookup)) => {
                let ip = lookup.iter().next();
                log::debug!("Resolved {domain} to {ip:?}");
                ip
            }
            Ok(Err(e)) => {
                log::debug!("DNS lookup failed for {domain}: {e}");
                None
            }
            Err(_) => {
                log::debug!("DNS lookup timed out for {domain}");
                None
            }
        }
    }
}
