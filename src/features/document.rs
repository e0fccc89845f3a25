//! Scorers over the fetched page. Each one needs the shared fetch result
//! and/or the parsed document; when the fetch failed they all degrade to
//! their -1 defaults through the registry.

use crate::context::UrlContext;
use crate::features::Score;
use regex::Regex;
use scraper::{Html, Selector};

fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

/// Collect a named attribute from all elements matching a selector.
fn attr_values<'a>(document: &'a Html, selector: &str, attr: &str) -> Vec<&'a str> {
    let Ok(selector) = Selector::parse(selector) else {
        return Vec::new();
    };
    document
        .select(&selector)
        .filter_map(|element| element.value().attr(attr))
        .collect()
}

/// #10 Favicon: some `<link href>` references the site's own domain or URL.
pub(crate) fn favicon(ctx: &UrlContext) -> Option<Score> {
    let document = ctx.document.as_ref()?;
    let own = attr_values(document, "link[href]", "href")
        .iter()
        .any(|href| href.contains(&ctx.target.domain) || href.contains(&ctx.target.raw));
    Some(if own { 1 } else { -1 })
}

/// #13 RequestURL: share of media resources loaded from the site itself.
pub(crate) fn request_url(ctx: &UrlContext) -> Option<Score> {
    let document = ctx.document.as_ref()?;
    let sources = attr_values(
        document,
        "img[src], audio[src], embed[src], iframe[src]",
        "src",
    );
    let own = sources
        .iter()
        .filter(|src| src.contains(&ctx.target.domain) || src.contains(&ctx.target.raw))
        .count();
    let pct = percentage(own, sources.len());
    Some(if pct < 22.0 {
        1
    } else if pct < 61.0 {
        0
    } else {
        -1
    })
}

/// #14 AnchorURL: share of anchors pointing at fragments, scripts, mail
/// handlers, or foreign domains.
pub(crate) fn anchor_url(ctx: &UrlContext) -> Option<Score> {
    let document = ctx.document.as_ref()?;
    let domain = ctx.target.domain.to_lowercase();
    let hrefs = attr_values(document, "a[href]", "href");
    let unsafe_count = hrefs
        .iter()
        .map(|href| href.to_lowercase())
        .filter(|href| {
            href.contains('#')
                || href.contains("javascript")
                || href.contains("mailto")
                || !href.contains(&domain)
        })
        .count();
    let pct = percentage(unsafe_count, hrefs.len());
    Some(if pct < 31.0 {
        1
    } else if pct < 67.0 {
        0
    } else {
        -1
    })
}

/// #15 LinksInScriptTags: share of `link`/`script` resources that are
/// self-referencing.
pub(crate) fn links_in_script_tags(ctx: &UrlContext) -> Option<Score> {
    let document = ctx.document.as_ref()?;
    let mut references = attr_values(document, "link[href]", "href");
    references.extend(attr_values(document, "script[src]", "src"));
    let own = references
        .iter()
        .filter(|value| value.contains(&ctx.target.domain) || value.contains(&ctx.target.raw))
        .count();
    let pct = percentage(own, references.len());
    Some(if pct < 17.0 {
        1
    } else if pct < 81.0 {
        0
    } else {
        -1
    })
}

/// #16 ServerFormHandler: where forms submit to. Checked in document order,
/// matching the behavior the classifier was trained against: the first
/// empty/blank action decides -1, otherwise the first foreign action
/// decides 0.
pub(crate) fn server_form_handler(ctx: &UrlContext) -> Option<Score> {
    let document = ctx.document.as_ref()?;
    let actions = attr_values(document, "form[action]", "action");
    if actions.is_empty() {
        return Some(1);
    }
    for action in actions {
        if action.is_empty() || action == "about:blank" {
            return Some(-1);
        } else if !action.contains(&ctx.target.domain) {
            return Some(0);
        }
    }
    Some(1)
}

/// #17 InfoEmail: mail handlers in the raw body.
pub(crate) fn info_email(ctx: &UrlContext) -> Option<Score> {
    let body = &ctx.fetch.as_ref()?.body;
    let pattern = Regex::new(r"mailto:|mail\(").ok()?;
    Some(if pattern.is_match(body) { -1 } else { 1 })
}

/// #19 WebsiteForwarding: redirect hops seen by the fetcher.
pub(crate) fn website_forwarding(ctx: &UrlContext) -> Option<Score> {
    let hops = ctx.fetch.as_ref()?.redirect_count;
    Some(if hops <= 1 {
        1
    } else if hops <= 4 {
        0
    } else {
        -1
    })
}

/// #20 StatusBarCust: onmouseover handlers customizing the status bar.
pub(crate) fn status_bar_cust(ctx: &UrlContext) -> Option<Score> {
    let body = &ctx.fetch.as_ref()?.body;
    Some(if body.contains("onmouseover") { -1 } else { 1 })
}

/// #21 DisableRightClick.
pub(crate) fn disable_right_click(ctx: &UrlContext) -> Option<Score> {
    let body = &ctx.fetch.as_ref()?.body;
    let pattern = Regex::new("event.button ?== ?2").ok()?;
    Some(if pattern.is_match(body) { -1 } else { 1 })
}

/// #22 UsingPopupWindow: alert() calls anywhere in the body.
pub(crate) fn popup_window(ctx: &UrlContext) -> Option<Score> {
    let body = &ctx.fetch.as_ref()?.body;
    let pattern = Regex::new(r"alert\(").ok()?;
    Some(if pattern.is_match(body) { -1 } else { 1 })
}

/// #23 IframeRedirection.
pub(crate) fn iframe_redirection(ctx: &UrlContext) -> Option<Score> {
    let body = &ctx.fetch.as_ref()?.body;
    let pattern = Regex::new(r"(?i)<iframe|frameborder").ok()?;
    Some(if pattern.is_match(body) { -1 } else { 1 })
}
