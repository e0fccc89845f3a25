use url::Url;

/// Decomposed view of a request URL.
///
/// Construction never fails: a string that does not parse as an absolute URL
/// yields empty `scheme`/`domain` fields, and the lexical scorers degrade on
/// their own terms from there.
#[derive(Debug, Clone)]
pub struct UrlTarget {
    pub raw: String,
    pub scheme: String,
    /// Authority as it appeared in the URL, including an explicit port.
    pub domain: String,
    pub path: String,
}

impl UrlTarget {
    pub fn decompose(raw: &str) -> Self {
        match Url::parse(raw) {
            Ok(parsed) => {
                let host = parsed.host_str().unwrap_or("").to_string();
                let domain = match parsed.port() {
                    Some(port) => format!("{host}:{port}"),
                    None => host,
                };
                Self {
                    raw: raw.to_string(),
                    scheme: parsed.scheme().to_string(),
                    domain,
                    path: parsed.path().to_string(),
                }
            }
            Err(e) => {
                log::debug!("URL does not parse, continuing with empty components: {e}");
                Self {
                    raw: raw.to_string(),
                    scheme: String::new(),
                    domain: String::new(),
                    path: String::new(),
                }
            }
        }
    }

    /// Host with any explicit port stripped, for DNS and IP-literal checks.
    pub fn host_without_port(&self) -> &str {
        self.domain.split(':').next().unwrap_or("")
    }

    /// Last two dot-separated labels, lowercased. This is the lookup key for
    /// the popularity index and the WHOIS query target. An IP-literal host
    /// has no registrable domain and is returned whole.
    pub fn registrable_domain(&self) -> String {
        let host = self.host_without_port().to_lowercase();
        if host.parse::<std::net::IpAddr>().is_ok() {
            return host;
        }
        let parts: Vec<&str> = host.split('.').collect();
        if parts.len() > 2 {
            format!("{}.{}", parts[parts.len() - 2], parts[parts.len() - 1])
        } else {
            host
        }
    }

    /// First dot-separated label of the domain (e.g. "mail" in
    /// "mail.example.com").
    pub fn first_label(&self) -> &str {
        self.domain.split('.').next().unwrap_or("")
    }
}
