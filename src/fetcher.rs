use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::{Client, StatusCode};
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

/// Final response of the single per-request page fetch.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub status: u16,
    pub final_url: String,
    /// Number of redirect hops followed before the final response.
    pub redirect_count: u32,
    pub body: String,
    pub headers: HashMap<String, String>,
}

/// Best-effort page fetcher. Issues exactly one GET per request (plus
/// redirect hops), with TLS verification on and a bounded timeout. Any
/// network error, timeout, or non-200 final status yields `None` - absence
/// of a page is a normal state for the scorers, not an error.
pub struct PageFetcher {
    client: Client,
    max_redirects: u32,
}

impl PageFetcher {
    pub fn new(
        timeout_seconds: u64,
        user_agent: &str,
        max_redirects: u32,
    ) -> Result<Self, reqwest::Error> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));

        // Redirects are followed by hand so the hop count stays observable.
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .user_agent(user_agent)
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        Ok(Self {
            client,
            max_redirects,
        })
    }

    pub async fn fetch(&self, url: &str) -> Option<FetchResult> {
        let mut current_url = url.to_string();
        let mut redirect_count = 0u32;

        loop {
            let response = match self.client.get(&current_url).send().await {
                Ok(response) => response,
                Err(e) => {
                    log::debug!("Fetch failed for {current_url}: {e}");
                    return None;
                }
            };

            if response.status().is_redirection() && redirect_count < self.max_redirects {
                let Some(location) = response
                    .headers()
                    .get("location")
                    .and_then(|v| v.to_str().ok())
                else {
                    log::debug!("Redirect without Location header from {current_url}");
                    return None;
                };

                // Resolve relative Location values against the current URL.
                current_url = if location.starts_with("http") {
                    location.to_string()
                } else {
                    let base = Url::parse(&current_url).ok()?;
                    base.join(location).ok()?.to_string()
                };
                redirect_count += 1;
                continue;
            }

            if response.status() != StatusCode::OK {
                log::debug!(
                    "Skipping {current_url}: final status {}",
                    response.status()
                );
                return None;
            }

            let final_url = response.url().to_string();
            let status = response.status().as_u16();
            let headers = response
                .headers()
                .iter()
                .filter_map(|(name, value)| {
                    value
                        .to_str()
                        .ok()
                        .map(|v| (name.as_str().to_string(), v.to_string()))
                })
                .collect();
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    log::debug!("Failed to read body from {current_url}: {e}");
                    return None;
                }
            };

            log::debug!(
                "Fetched {url} ({} bytes, {redirect_count} redirects)",
                body.len()
            );
            return Some(FetchResult {
                status,
                final_url,
                redirect_count,
                body,
                headers,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fetcher() -> PageFetcher {
        PageFetcher::new(5, "phishvec-test/0.1", 10).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_ok() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>hi</html>"))
            .mount(&server)
            .await;

        let result = fetcher().fetch(&server.uri()).await.unwrap();
        assert_eq!(result.status, 200);
        assert_eq!(result.redirect_count, 0);
        assert_eq!(result.body, "<html>hi</html>");
    }

    #[tokio::test]
    async fn test_fetch_counts_redirects() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/start"))
            .respond_with(ResponseTemplate::new(302).insert_header("location", "/middle"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/middle"))
            .respond_with(ResponseTemplate::new(301).insert_header("location", "/end"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/end"))
            .respond_with(ResponseTemplate::new(200).set_body_string("done"))
            .mount(&server)
            .await;

        let result = fetcher()
            .fetch(&format!("{}/start", server.uri()))
            .await
            .unwrap();
        assert_eq!(result.redirect_count, 2);
        assert_eq!(result.body, "done");
        assert!(result.final_url.ends_with("/end"));
    }

    #[tokio::test]
    async fn test_fetch_non_200_is_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        assert!(fetcher().fetch(&server.uri()).await.is_none());
    }

    #[tokio::test]
    async fn test_fetch_connection_error_is_unavailable() {
        // Nothing listens on this port.
        assert!(fetcher().fetch("http://127.0.0.1:1/").await.is_none());
    }
}
