//! Scorers over the popularity index and the resolved IP.
//!
//! GoogleIndex and StatsReport both reuse the popularity table as a proxy
//! for search-engine indexing and traffic rank. That conflation matches the
//! dataset the classifier was trained on and is kept deliberately.

use crate::context::UrlContext;
use crate::features::Score;
use regex::Regex;

const POPULARITY_CUTOFF: u32 = 100_000;

/// #26 WebsiteTraffic: membership in the popularity table.
pub(crate) fn website_traffic(ctx: &UrlContext) -> Option<Score> {
    let registrable = ctx.target.registrable_domain();
    Some(if ctx.index.contains(&registrable) { 1 } else { -1 })
}

/// #27 GoogleIndex: ranked within the top 100k.
pub(crate) fn google_index(ctx: &UrlContext) -> Option<Score> {
    let registrable = ctx.target.registrable_domain();
    Some(match ctx.index.rank(&registrable) {
        Some(rank) if rank <= POPULARITY_CUTOFF => 1,
        _ => -1,
    })
}

/// #28 StatsReport: combined blocklist check. Suspicious when the URL
/// matches known abuse hosting patterns, the domain resolves to a known-bad
/// IP, or the domain falls outside the top 100k. Requires a DNS result;
/// resolution failure degrades to -1 through the registry.
pub(crate) fn stats_report(ctx: &UrlContext) -> Option<Score> {
    let url_pattern = Regex::new(
        r"at\.ua|usa\.cc|pe\.hu|esy\.es|hol\.es|ow\.ly|ml|cf|gq|ga|tk|xyz|top|online|site|club|cn|ru",
    )
    .ok()?;
    let suspicious_url = url_pattern.is_match(&ctx.target.raw);

    let ip = ctx.resolved_ip?.to_string();
    let bad_ip = matches!(
        ip.as_str(),
        "146.112.61.108" | "213.174.157.151" | "121.50.168.88"
    );

    let low_traffic = ctx
        .index
        .rank(&ctx.target.registrable_domain())
        .map_or(true, |rank| rank > POPULARITY_CUTOFF);

    Some(if suspicious_url || bad_ip || low_traffic {
        -1
    } else {
        1
    })
}
