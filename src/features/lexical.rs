//! Scorers over the raw URL string and its decomposed parts. No I/O.

use crate::context::UrlContext;
use crate::features::Score;
use regex::Regex;
use std::net::IpAddr;

/// #1 UsingIP: the URL itself, or its host, is a bare IP literal.
pub(crate) fn using_ip(ctx: &UrlContext) -> Option<Score> {
    let raw_is_ip = ctx.target.raw.parse::<IpAddr>().is_ok();
    let host_is_ip = ctx.target.host_without_port().parse::<IpAddr>().is_ok();
    Some(if raw_is_ip || host_is_ip { -1 } else { 1 })
}

/// #2 LongURL: length thresholds 54/75.
pub(crate) fn long_url(ctx: &UrlContext) -> Option<Score> {
    let len = ctx.target.raw.len();
    Some(if len < 54 {
        1
    } else if len <= 75 {
        0
    } else {
        -1
    })
}

/// #3 ShortURL: known URL-shortener domains.
pub(crate) fn short_url(ctx: &UrlContext) -> Option<Score> {
    let shorteners = Regex::new(r"bit\.ly|goo\.gl|tinyurl\.com|t\.co|ow\.ly|is\.gd|adf\.ly").ok()?;
    Some(if shorteners.is_match(&ctx.target.raw) { -1 } else { 1 })
}

/// #4 Symbol@.
pub(crate) fn at_symbol(ctx: &UrlContext) -> Option<Score> {
    Some(if ctx.target.raw.contains('@') { -1 } else { 1 })
}

/// #5 Redirecting//: a `//` appearing after the scheme separator.
pub(crate) fn redirecting(ctx: &UrlContext) -> Option<Score> {
    let suspicious = matches!(ctx.target.raw.rfind("//"), Some(index) if index > 6);
    Some(if suspicious { -1 } else { 1 })
}

/// #6 PrefixSuffix-: hyphenated domain.
pub(crate) fn prefix_suffix(ctx: &UrlContext) -> Option<Score> {
    Some(if ctx.target.domain.contains('-') { -1 } else { 1 })
}

/// #7 SubDomains: dot count of the domain text.
pub(crate) fn sub_domains(ctx: &UrlContext) -> Option<Score> {
    let dots = ctx.target.domain.matches('.').count();
    Some(match dots {
        1 => 1,
        2 => 0,
        _ => -1,
    })
}

/// #8 HTTPS: scheme of the request URL.
pub(crate) fn https_scheme(ctx: &UrlContext) -> Option<Score> {
    Some(match ctx.target.scheme.as_str() {
        "https" => 1,
        "http" => -1,
        _ => 0,
    })
}

/// #11 NonStdPort: an explicit port in the authority.
pub(crate) fn non_std_port(ctx: &UrlContext) -> Option<Score> {
    Some(if ctx.target.domain.contains(':') { -1 } else { 1 })
}

/// #12 HTTPSDomainURL: "https" embedded in the domain text itself.
pub(crate) fn https_in_domain(ctx: &UrlContext) -> Option<Score> {
    Some(if ctx.target.domain.contains("https") { -1 } else { 1 })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::testutil::bare_context;

    #[test]
    fn test_using_ip() {
        assert_eq!(using_ip(&bare_context("192.168.0.1")), Some(-1));
        assert_eq!(using_ip(&bare_context("https://192.168.0.1/login")), Some(-1));
        assert_eq!(using_ip(&bare_context("http://example.com")), Some(1));
    }

    #[test]
    fn test_long_url_thresholds() {
        let short = format!("http://a.com/{}", "x".repeat(10));
        assert!(short.len() < 54);
        assert_eq!(long_url(&bare_context(&short)), Some(1));

        let exactly_54 = format!("http://a.com/{}", "x".repeat(41));
        assert_eq!(exactly_54.len(), 54);
        assert_eq!(long_url(&bare_context(&exactly_54)), Some(0));

        let exactly_75 = format!("http://a.com/{}", "x".repeat(62));
        assert_eq!(exactly_75.len(), 75);
        assert_eq!(long_url(&bare_context(&exactly_75)), Some(0));

        let long = format!("http://a.com/{}", "x".repeat(70));
        assert!(long.len() > 75);
        assert_eq!(long_url(&bare_context(&long)), Some(-1));
    }

    #[test]
    fn test_short_url() {
        assert_eq!(short_url(&bare_context("https://bit.ly/abc")), Some(-1));
        assert_eq!(short_url(&bare_context("https://tinyurl.com/x")), Some(-1));
        assert_eq!(short_url(&bare_context("https://example.com/")), Some(1));
    }

    #[test]
    fn test_at_symbol() {
        assert_eq!(at_symbol(&bare_context("http://evil.com/@example.com")), Some(-1));
        assert_eq!(at_symbol(&bare_context("http://example.com/")), Some(1));
    }

    #[test]
    fn test_redirecting() {
        assert_eq!(redirecting(&bare_context("http://example.com//evil")), Some(-1));
        assert_eq!(redirecting(&bare_context("http://example.com/path")), Some(1));
        assert_eq!(redirecting(&bare_context("https://example.com/a")), Some(1));
    }

    #[test]
    fn test_prefix_suffix() {
        assert_eq!(prefix_suffix(&bare_context("http://pay-pal.com/")), Some(-1));
        assert_eq!(prefix_suffix(&bare_context("http://paypal.com/")), Some(1));
    }

    #[test]
    fn test_sub_domains() {
        assert_eq!(sub_domains(&bare_context("http://example.com/")), Some(1));
        assert_eq!(sub_domains(&bare_context("http://www.example.com/")), Some(0));
        assert_eq!(sub_domains(&bare_context("http://a.b.example.com/")), Some(-1));
        // An IP host has three dots and is treated as plain domain text.
        assert_eq!(sub_domains(&bare_context("https://192.168.0.1/login")), Some(-1));
    }

    #[test]
    fn test_https_scheme() {
        assert_eq!(https_scheme(&bare_context("https://example.com/")), Some(1));
        assert_eq!(https_scheme(&bare_context("http://example.com/")), Some(-1));
        assert_eq!(https_scheme(&bare_context("ftp://example.com/")), Some(0));
        assert_eq!(https_scheme(&bare_context("no scheme here")), Some(0));
    }

    #[test]
    fn test_non_std_port() {
        assert_eq!(non_std_port(&bare_context("http://example.com:8080/")), Some(-1));
        assert_eq!(non_std_port(&bare_context("http://example.com/")), Some(1));
    }

    #[test]
    fn test_https_in_domain() {
        assert_eq!(
            https_in_domain(&bare_context("http://https-login.example.com/")),
            Some(-1)
        );
        assert_eq!(https_in_domain(&bare_context("https://example.com/")), Some(1));
    }
}
