use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use regex::Regex;
use std::collections::HashMap;
use std::net::IpAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;

/// Registration data for a domain. When a registrar emits several candidate
/// dates for the same field, the first parseable one wins.
#[derive(Debug, Clone)]
pub struct WhoisRecord {
    pub creation_date: Option<NaiveDate>,
    pub expiration_date: Option<NaiveDate>,
    pub raw_text: String,
}

/// Best-effort WHOIS client. One lookup per request domain, one attempt per
/// server, no retries; any failure (unsupported TLD, rate limit, timeout)
/// yields `None`.
pub struct WhoisClient {
    timeout: Duration,
}

impl WhoisClient {
    pub fn new(timeout_seconds: u64) -> Self {
        Self {
            timeout: Duration::from_secs(timeout_seconds),
        }
    }

    /// One attempt against one server, bounded by a single timeout. No
    /// retries, no fallback servers; any failure is `None`.
    pub async fn lookup(&self, domain: &str) -> Option<WhoisRecord> {
        if domain.is_empty() || !domain.contains('.') {
            log::debug!("Not a queryable domain: {domain:?}");
            return None;
        }
        if domain.parse::<IpAddr>().is_ok() {
            log::debug!("IP literal has no registration record: {domain}");
            return None;
        }

        let server = server_for(domain);
        match timeout(self.timeout, self.query_server(&format!("{server}:43"), domain)).await {
            Ok(Ok(text)) => Some(parse_record(&text)),
            Ok(Err(e)) => {
                log::debug!("WHOIS query to {server} failed for {domain}: {e}");
                None
            }
            Err(_) => {
                log::debug!("WHOIS query to {server} timed out for {domain}");
                None
            }
        }
    }

    /// Query a WHOIS server over TCP. The caller bounds the whole exchange
    /// with one timeout.
    async fn query_server(&self, addr: &str, domain: &str) -> Result<String> {
        log::debug!("Connecting to WHOIS server: {addr}");

        let mut stream = TcpStream::connect(addr).await?;

        let query = format!("{domain}\r\n");
        stream.write_all(query.as_bytes()).await?;

        let mut response = String::new();
        stream.read_to_string(&mut response).await?;

        if response.is_empty() {
            return Err(anyhow!("Empty WHOIS response"));
        }

        Ok(response)
    }
}

/// Pick the registry WHOIS server for a domain's TLD, defaulting to IANA
/// for anything unrecognized.
fn server_for(domain: &str) -> &'static str {
    let tld = domain.split('.').next_back().unwrap_or(domain);

    let servers = HashMap::from([
        ("com", "whois.verisign-grs.com"),
        ("net", "whois.verisign-grs.com"),
        ("org", "whois.pir.org"),
        ("info", "whois.afilias.net"),
        ("biz", "whois.neulevel.biz"),
        ("us", "whois.nic.us"),
        ("uk", "whois.nic.uk"),
        ("de", "whois.denic.de"),
        ("fr", "whois.afnic.fr"),
        ("it", "whois.nic.it"),
        ("nl", "whois.domain-registry.nl"),
        ("au", "whois.auda.org.au"),
        ("ca", "whois.cira.ca"),
        ("jp", "whois.jprs.jp"),
        ("cn", "whois.cnnic.cn"),
        ("ru", "whois.tcinet.ru"),
        ("br", "whois.registro.br"),
        ("mx", "whois.mx"),
        ("tk", "whois.dot.tk"),
        ("ml", "whois.dot.ml"),
        ("ga", "whois.dot.ga"),
        ("cf", "whois.dot.cf"),
    ]);

    servers.get(tld).copied().unwrap_or("whois.iana.org")
}

/// Parse a raw WHOIS response into a record. Unparseable dates leave the
/// corresponding fields empty; the raw text is always kept.
pub fn parse_record(text: &str) -> WhoisRecord {
    let creation_patterns = [
        r"(?i)creation\s*date[:\s]+([^\r\n]+)",
        r"(?i)created[:\s]+([^\r\n]+)",
        r"(?i)registered[:\s]+([^\r\n]+)",
        r"(?i)domain\s*created[:\s]+([^\r\n]+)",
        r"(?i)registration\s*date[:\s]+([^\r\n]+)",
        r"(?i)created\s*on[:\s]+([^\r\n]+)",
        r"(?i)registered\s*on[:\s]+([^\r\n]+)",
        r"(?i)create_date[:\s]+([^\r\n]+)",
        r"(?i)created_date[:\s]+([^\r\n]+)",
        r"(?i)registration_time[:\s]+([^\r\n]+)",
    ];
    let expiration_patterns = [
        r"(?i)registry\s*expiry\s*date[:\s]+([^\r\n]+)",
        r"(?i)expiration\s*date[:\s]+([^\r\n]+)",
        r"(?i)expiry\s*date[:\s]+([^\r\n]+)",
        r"(?i)expires\s*on[:\s]+([^\r\n]+)",
        r"(?i)expires[:\s]+([^\r\n]+)",
        r"(?i)paid-till[:\s]+([^\r\n]+)",
    ];

    let creation_date = find_date(text, &creation_patterns);
    let expiration_date = find_date(text, &expiration_patterns);

    if creation_date.is_none() {
        log::debug!("No parseable creation date in WHOIS response ({} chars)", text.len());
    }

    WhoisRecord {
        creation_date,
        expiration_date,
        raw_text: text.to_string(),
    }
}

fn find_date(text: &str, patterns: &[&str]) -> Option<NaiveDate> {
    for pattern in patterns {
        let Ok(regex) = Regex::new(pattern) else {
            continue;
        };
        if let Some(captures) = regex.captures(text) {
            if let Some(date_match) = captures.get(1) {
                if let Some(date) = parse_date(date_match.as_str().trim()) {
                    return Some(date);
                }
            }
        }
    }
    None
}

/// Parse the date formats registrars actually emit.
fn parse_date(date_str: &str) -> Option<NaiveDate> {
    // ISO dates, possibly with a time suffix (2024-10-10T12:00:00Z).
    if let Ok(iso) = Regex::new(r"(\d{4})-(\d{2})-(\d{2})") {
        if let Some(captures) = iso.captures(date_str) {
            let year: i32 = captures[1].parse().ok()?;
            let month: u32 = captures[2].parse().ok()?;
            let day: u32 = captures[3].parse().ok()?;
            return NaiveDate::from_ymd_opt(year, month, day);
        }
    }

    for format in ["%d-%b-%Y", "%d.%m.%Y", "%m/%d/%Y", "%Y/%m/%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(date_str, format) {
            return Some(date);
        }
    }

    None
}
