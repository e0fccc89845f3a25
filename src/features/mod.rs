//! The 28 signal scorers and the feature vector assembler.
//!
//! Every scorer is a pure function of the shared request context. A scorer
//! returns `None` whenever an artifact it needs is missing or unusable, and
//! the registry substitutes that scorer's declared failure default - one
//! uniform mechanism instead of 28 ad-hoc fallbacks. Scorer order here is
//! the classifier's input order and must never change.

pub mod document;
pub mod lexical;
pub mod registration;
pub mod reputation;

use crate::context::UrlContext;
use crate::error::FeatureError;
use serde::Serialize;

/// Trinary signal: -1 suspicious, 0 neutral, 1 benign.
pub type Score = i8;

type ScorerFn = fn(&UrlContext) -> Option<Score>;

struct Scorer {
    name: &'static str,
    score: ScorerFn,
    on_failure: Score,
}

const SCORERS: [Scorer; 28] = [
    Scorer { name: "UsingIP", score: lexical::using_ip, on_failure: 1 },
    Scorer { name: "LongURL", score: lexical::long_url, on_failure: -1 },
    Scorer { name: "ShortURL", score: lexical::short_url, on_failure: 1 },
    Scorer { name: "Symbol@", score: lexical::at_symbol, on_failure: 1 },
    Scorer { name: "Redirecting//", score: lexical::redirecting, on_failure: 1 },
    Scorer { name: "PrefixSuffix-", score: lexical::prefix_suffix, on_failure: 1 },
    Scorer { name: "SubDomains", score: lexical::sub_domains, on_failure: -1 },
    Scorer { name: "HTTPS", score: lexical::https_scheme, on_failure: 0 },
    Scorer { name: "DomainRegLen", score: registration::domain_reg_len, on_failure: -1 },
    Scorer { name: "Favicon", score: document::favicon, on_failure: -1 },
    Scorer { name: "NonStdPort", score: lexical::non_std_port, on_failure: 1 },
    Scorer { name: "HTTPSDomainURL", score: lexical::https_in_domain, on_failure: 1 },
    Scorer { name: "RequestURL", score: document::request_url, on_failure: -1 },
    Scorer { name: "AnchorURL", score: document::anchor_url, on_failure: -1 },
    Scorer { name: "LinksInScriptTags", score: document::links_in_script_tags, on_failure: -1 },
    Scorer { name: "ServerFormHandler", score: document::server_form_handler, on_failure: -1 },
    Scorer { name: "InfoEmail", score: document::info_email, on_failure: -1 },
    Scorer { name: "AbnormalURL", score: registration::abnormal_url, on_failure: -1 },
    Scorer { name: "WebsiteForwarding", score: document::website_forwarding, on_failure: -1 },
    Scorer { name: "StatusBarCust", score: document::status_bar_cust, on_failure: -1 },
    Scorer { name: "DisableRightClick", score: document::disable_right_click, on_failure: -1 },
    Scorer { name: "UsingPopupWindow", score: document::popup_window, on_failure: -1 },
    Scorer { name: "IframeRedirection", score: document::iframe_redirection, on_failure: -1 },
    Scorer { name: "AgeofDomain", score: registration::age_of_domain, on_failure: -1 },
    Scorer { name: "DNSRecording", score: registration::dns_recording, on_failure: -1 },
    Scorer { name: "WebsiteTraffic", score: reputation::website_traffic, on_failure: -1 },
    Scorer { name: "GoogleIndex", score: reputation::google_index, on_failure: -1 },
    Scorer { name: "StatsReport", score: reputation::stats_report, on_failure: -1 },
];

/// Feature names in classifier input order.
pub const FEATURE_NAMES: [&str; 28] = [
    "UsingIP",
    "LongURL",
    "ShortURL",
    "Symbol@",
    "Redirecting//",
    "PrefixSuffix-",
    "SubDomains",
    "HTTPS",
    "DomainRegLen",
    "Favicon",
    "NonStdPort",
    "HTTPSDomainURL",
    "RequestURL",
    "AnchorURL",
    "LinksInScriptTags",
    "ServerFormHandler",
    "InfoEmail",
    "AbnormalURL",
    "WebsiteForwarding",
    "StatusBarCust",
    "DisableRightClick",
    "UsingPopupWindow",
    "IframeRedirection",
    "AgeofDomain",
    "DNSRecording",
    "WebsiteTraffic",
    "GoogleIndex",
    "StatsReport",
];

/// Ordered scores for one URL, in `FEATURE_NAMES` order.
#[derive(Debug, Clone, Serialize)]
pub struct FeatureVector {
    values: Vec<Score>,
}

impl FeatureVector {
    pub fn values(&self) -> &[Score] {
        &self.values
    }

    pub fn named(&self) -> impl Iterator<Item = (&'static str, Score)> + '_ {
        FEATURE_NAMES.iter().copied().zip(self.values.iter().copied())
    }

    pub fn get(&self, name: &str) -> Option<Score> {
        self.named().find(|(n, _)| *n == name).map(|(_, v)| v)
    }

    pub fn suspicious_count(&self) -> usize {
        self.values.iter().filter(|v| **v == -1).count()
    }
}

/// Run all scorers against the gathered artifacts and validate the result
/// against the classifier's declared feature-name list. A length mismatch
/// is a hard error; it is never padded or truncated away.
pub fn extract(
    context: &UrlContext,
    expected_names: &[&str],
) -> Result<FeatureVector, FeatureError> {
    if expected_names.len() != SCORERS.len() {
        return Err(FeatureError::SchemaMismatch {
            expected: expected_names.len(),
            actual: SCORERS.len(),
        });
    }

    let values = SCORERS
        .iter()
        .map(|scorer| {
            let value = (scorer.score)(context).unwrap_or_else(|| {
                log::debug!(
                    "Scorer {} fell back to its default {} for {}",
                    scorer.name,
                    scorer.on_failure,
                    context.target.raw
                );
                scorer.on_failure
            });
            debug_assert!((-1..=1).contains(&value), "{} out of range", scorer.name);
            value
        })
        .collect();

    let vector = FeatureVector { values };
    log::info!(
        "Extracted {} features for {} ({} suspicious)",
        vector.values.len(),
        context.target.raw,
        vector.suspicious_count()
    );
    Ok(vector)
}


#[cfg(test)]
mod tests {
    use super::*;
    use testutil::*;

    #[test]
    fn test_schema_mismatch_is_rejected() {
        let ctx = bare_context("http://example.com/");
        let too_short = &FEATURE_NAMES[..27];
        match extract(&ctx, too_short) {
            Err(FeatureError::SchemaMismatch { expected, actual }) => {
                assert_eq!(expected, 27);
                assert_eq!(actual, 28);
            }
            other => panic!("expected schema mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_unavailable_artifacts_still_yield_full_vector() {
        let ctx = bare_context("http://example.com");
        let vector = extract(&ctx, &FEATURE_NAMES).unwrap();
        assert_eq!(vector.values().len(), 28);

        assert_eq!(vector.get("UsingIP"), Some(1));
        assert_eq!(vector.get("HTTPS"), Some(-1));
        assert_eq!(vector.get("DomainRegLen"), Some(-1));
        assert_eq!(vector.get("DNSRecording"), Some(-1));
        assert_eq!(vector.get("WebsiteTraffic"), Some(-1));

        // Every document-dependent scorer fell back to -1.
        for name in [
            "Favicon",
            "RequestURL",
            "AnchorURL",
            "LinksInScriptTags",
            "ServerFormHandler",
            "InfoEmail",
            "WebsiteForwarding",
            "StatusBarCust",
            "DisableRightClick",
            "UsingPopupWindow",
            "IframeRedirection",
        ] {
            assert_eq!(vector.get(name), Some(-1), "{name}");
        }
    }

    #[test]
    fn test_ip_literal_url_example() {
        let ctx = bare_context("https://192.168.0.1/login");
        let vector = extract(&ctx, &FEATURE_NAMES).unwrap();
        assert_eq!(vector.get("UsingIP"), Some(-1));
        assert_eq!(vector.get("HTTPS"), Some(1));
        assert_eq!(vector.get("SubDomains"), Some(-1));
    }

    #[test]
    fn test_all_values_are_trinary() {
        let ctx = context_with_page(
            "http://example.com/",
            "<a href=\"#\">x</a><form action=\"\"></form>",
            2,
        );
        let vector = extract(&ctx, &FEATURE_NAMES).unwrap();
        assert!(vector.values().iter().all(|v| (-1..=1).contains(v)));
    }

    #[test]
    fn test_registry_order_matches_feature_names() {
        for (scorer, name) in SCORERS.iter().zip(FEATURE_NAMES.iter()) {
            assert_eq!(scorer.name, *name);
        }
    }

    #[test]
    fn test_popular_domain_properties() {
        let ctx = context_with_index("http://www.example.com/", &[(42, "example.com")]);
        let vector = extract(&ctx, &FEATURE_NAMES).unwrap();
        assert_eq!(vector.get("WebsiteTraffic"), Some(1));
        assert_eq!(vector.get("GoogleIndex"), Some(1));
    }

    #[test]
    fn test_suspicious_count() {
        let ctx = bare_context("http://example.com");
        let vector = extract(&ctx, &FEATURE_NAMES).unwrap();
        assert!(vector.suspicious_count() >= 13);
    }
}
