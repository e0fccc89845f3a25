//! Scorers over the WHOIS record. A failed lookup degrades all of these to
//! -1 through the registry defaults.

use crate::context::UrlContext;
use crate::features::Score;
use chrono::{Datelike, NaiveDate, Utc};

/// Whole calendar months between two dates, on year/month fields only.
fn months_between(from: NaiveDate, to: NaiveDate) -> i32 {
    (to.year() - from.year()) * 12 + (to.month() as i32 - from.month() as i32)
}

/// #9 DomainRegLen: registration period length.
pub(crate) fn domain_reg_len(ctx: &UrlContext) -> Option<Score> {
    let record = ctx.whois.as_ref()?;
    let creation = record.creation_date?;
    let expiration = record.expiration_date?;
    let months = months_between(creation, expiration);
    Some(if months >= 12 {
        1
    } else if months >= 6 {
        0
    } else {
        -1
    })
}

/// #18 AbnormalURL: the domain's first label should appear somewhere in the
/// registrar's response for a legitimately-registered site.
pub(crate) fn abnormal_url(ctx: &UrlContext) -> Option<Score> {
    let record = ctx.whois.as_ref()?;
    let label = ctx.target.first_label().to_lowercase();
    Some(if record.raw_text.to_lowercase().contains(&label) {
        1
    } else {
        -1
    })
}

/// #24 AgeofDomain: months since registration.
pub(crate) fn age_of_domain(ctx: &UrlContext) -> Option<Score> {
    let creation = ctx.whois.as_ref()?.creation_date?;
    let months = months_between(creation, Utc::now().date_naive());
    Some(if months >= 6 {
        1
    } else if months >= 3 {
        0
    } else {
        -1
    })
}

/// #25 DNSRecording: whether the registration lookup succeeded at all.
pub(crate) fn dns_recording(ctx: &UrlContext) -> Option<Score> {
    Some(if ctx.whois.is_some() { 1 } else { -1 })
}
