use crate::config::Config;
use crate::dns::DnsClient;
use crate::error::FeatureError;
use crate::features::{self, FeatureVector};
use crate::fetcher::{FetchResult, PageFetcher};
use crate::popularity::PopularityIndex;
use crate::url_parts::UrlTarget;
use crate::whois::{WhoisClient, WhoisRecord};
use scraper::Html;
use std::net::IpAddr;
use std::sync::Arc;

/// Everything the scorers are allowed to look at for one request. Built
/// once, consumed read-only; absent artifacts mean the corresponding
/// external lookup failed.
pub struct UrlContext {
    pub target: UrlTarget,
    pub fetch: Option<FetchResult>,
    pub document: Option<Html>,
    pub whois: Option<WhoisRecord>,
    pub resolved_ip: Option<IpAddr>,
    pub index: Arc<PopularityIndex>,
}

/// Per-process extraction service: owns the network clients and the shared
/// read-only popularity index. One `gather` call is one independent
/// pipeline run.
pub struct Extractor {
    fetcher: PageFetcher,
    whois: WhoisClient,
    dns: DnsClient,
    index: Arc<PopularityIndex>,
}

impl Extractor {
    pub fn new(config: &Config, index: Arc<PopularityIndex>) -> Result<Self, FeatureError> {
        let fetcher = PageFetcher::new(
            config.fetch_timeout_seconds,
            &config.user_agent,
            config.max_redirects,
        )?;
        Ok(Self {
            fetcher,
            whois: WhoisClient::new(config.whois_timeout_seconds),
            dns: DnsClient::new(config.dns_timeout_seconds),
            index,
        })
    }

    /// Gather all external artifacts for a URL. The page fetch, WHOIS
    /// lookup, and DNS resolution run concurrently, each best-effort and
    /// bounded by its own timeout; a failure of one degrades only the
    /// scorers that depend on it. Dropping the returned future cancels all
    /// three in-flight lookups.
    pub async fn gather(&self, url: &str) -> UrlContext {
        let target = UrlTarget::decompose(url);
        let registrable = target.registrable_domain();
        let host = target.host_without_port().to_string();

        let (fetch, whois, resolved_ip) = tokio::join!(
            self.fetcher.fetch(url),
            self.whois.lookup(&registrable),
            self.dns.resolve(&host),
        );

        // The document tree is parsed here, after all network calls are
        // done, so the gather future itself stays Send.
        let document = fetch.as_ref().map(|f| Html::parse_document(&f.body));

        log::info!(
            "Gathered artifacts for {url}: page={}, whois={}, dns={}",
            fetch.is_some(),
            whois.is_some(),
            resolved_ip.is_some(),
        );

        UrlContext {
            target,
            fetch,
            document,
            whois,
            resolved_ip,
            index: Arc::clone(&self.index),
        }
    }

    /// Full pipeline: gather artifacts, then assemble the feature vector
    /// against the classifier's declared feature-name list.
    pub async fn extract(
        &self,
        url: &str,
        expected_names: &[&str],
    ) -> Result<FeatureVector, FeatureError> {
        let context = self.gather(url).await;
        features::extract(&context, expected_names)
    }
}
