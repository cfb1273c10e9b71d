//! Content store HTTP client.

use std::collections::HashSet;

use reqwest::Url;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tracing::debug;

use super::error::CatalogError;
use super::record::{AttractionRecord, parse_page};

/// Default endpoint listing attraction records.
const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api/tourism/attractions/";

/// Most pages followed in one fetch.
const MAX_PAGES: usize = 1000;

/// Configuration for the content store client.
#[derive(Debug, Clone)]
pub struct CatalogClientConfig {
    /// Optional API key for x-apikey header authentication
    pub api_key: Option<String>,
    /// URL of the attraction listing
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl CatalogClientConfig {
    /// Create a config for the given listing URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            api_key: None,
            base_url: base_url.into(),
            timeout_secs: 30,
        }
    }

    /// Authenticate with an API key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }
}

impl Default for CatalogClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Client for the attraction content store.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    /// Create a new content store client.
    pub fn new(config: CatalogClientConfig) -> Result<Self, CatalogError> {
        let mut headers = HeaderMap::new();

        if let Some(key) = &config.api_key {
            let value = HeaderValue::from_str(key).map_err(|_| CatalogError::Api {
                status: 0,
                message: "Invalid API key format".to_string(),
            })?;
            headers.insert(HeaderName::from_static("x-apikey"), value);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// The listing URL this client reads from.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch every attraction record.
    ///
    /// Paginated listings are followed through their `next` links, which
    /// may be absolute or relative to the current page, and the pages are
    /// concatenated in order.
    pub async fn fetch_all(&self) -> Result<Vec<AttractionRecord>, CatalogError> {
        let mut url = Url::parse(&self.base_url).map_err(|e| CatalogError::Pagination {
            message: format!("invalid listing URL {:?}: {e}", self.base_url),
        })?;
        let mut visited = HashSet::new();
        let mut records = Vec::new();

        loop {
            if visited.len() == MAX_PAGES {
                return Err(CatalogError::Pagination {
                    message: format!("listing has more than {MAX_PAGES} pages"),
                });
            }
            if !visited.insert(url.clone()) {
                return Err(CatalogError::Pagination {
                    message: format!("page {url} links back to an earlier page"),
                });
            }

            let page = parse_page(&self.fetch_page(url.clone()).await?)?;
            records.extend(page.records);

            match page.next {
                Some(next) => {
                    url = url.join(&next).map_err(|e| CatalogError::Pagination {
                        message: format!("invalid next page link {next:?}: {e}"),
                    })?;
                }
                None => break,
            }
        }

        debug!(pages = visited.len(), count = records.len(), "fetched attraction listing");
        Ok(records)
    }

    async fn fetch_page(&self, url: Url) -> Result<String, CatalogError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(CatalogError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use axum::extract::Query;
    use axum::{Router, http::StatusCode, routing::get};

    /// Serve `router` on an ephemeral local port and return its base URL.
    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[test]
    fn config_defaults() {
        let config = CatalogClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 30);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn config_with_api_key() {
        let config = CatalogClientConfig::new("http://localhost:8080").with_api_key("secret");
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.api_key.as_deref(), Some("secret"));
    }

    #[test]
    fn rejects_unprintable_api_key() {
        let config = CatalogClientConfig::default().with_api_key("bad\nkey");
        assert!(matches!(
            CatalogClient::new(config),
            Err(CatalogError::Api { status: 0, .. })
        ));
    }

    #[tokio::test]
    async fn fetches_records() {
        let router = Router::new().route(
            "/attractions",
            get(|| async {
                r#"[{"id": 1, "name": "White Desert", "attraction_type": "natural",
                     "ticket_price": "50.00", "visit_duration_minutes": 180}]"#
            }),
        );
        let base = serve(router).await;

        let client =
            CatalogClient::new(CatalogClientConfig::new(format!("{base}/attractions"))).unwrap();
        let records = client.fetch_all().await.unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "White Desert");
    }

    #[tokio::test]
    async fn sends_api_key_header() {
        let router = Router::new().route(
            "/attractions",
            get(|headers: axum::http::HeaderMap| async move {
                match headers.get("x-apikey").and_then(|v| v.to_str().ok()) {
                    Some("secret") => (StatusCode::OK, "[]"),
                    _ => (StatusCode::UNAUTHORIZED, ""),
                }
            }),
        );
        let base = serve(router).await;
        let url = format!("{base}/attractions");

        let anonymous = CatalogClient::new(CatalogClientConfig::new(url.clone())).unwrap();
        assert!(matches!(
            anonymous.fetch_all().await,
            Err(CatalogError::Unauthorized)
        ));

        let keyed =
            CatalogClient::new(CatalogClientConfig::new(url).with_api_key("secret")).unwrap();
        assert!(keyed.fetch_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn reports_server_errors() {
        let router = Router::new().route(
            "/attractions",
            get(|| async { (StatusCode::BAD_GATEWAY, "upstream down") }),
        );
        let base = serve(router).await;

        let client =
            CatalogClient::new(CatalogClientConfig::new(format!("{base}/attractions"))).unwrap();
        match client.fetch_all().await {
            Err(CatalogError::Api { status, message }) => {
                assert_eq!(status, 502);
                assert_eq!(message, "upstream down");
            }
            other => panic!("expected API error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn follows_next_links_across_pages() {
        let router = Router::new().route(
            "/attractions",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                match params.get("page").map(String::as_str) {
                    None => r#"{"count": 3, "next": "?page=2", "results": [
                        {"id": 1, "name": "Siwa Oasis", "category": "natural",
                         "visit_duration_minutes": 240},
                        {"id": 2, "name": "Shali Fortress", "category": "historical",
                         "visit_duration_minutes": 60}
                    ]}"#,
                    Some("2") => r#"{"count": 3, "next": null, "results": [
                        {"id": 3, "name": "Cleopatra Spring", "category": "natural",
                         "visit_duration_minutes": 45}
                    ]}"#,
                    Some(_) => "[]",
                }
            }),
        );
        let base = serve(router).await;

        let client =
            CatalogClient::new(CatalogClientConfig::new(format!("{base}/attractions"))).unwrap();
        let records = client.fetch_all().await.unwrap();

        let ids: Vec<u64> = records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn rejects_circular_pagination() {
        let router = Router::new().route(
            "/attractions",
            get(|| async { r#"{"next": "/attractions", "results": []}"# }),
        );
        let base = serve(router).await;

        let client =
            CatalogClient::new(CatalogClientConfig::new(format!("{base}/attractions"))).unwrap();
        assert!(matches!(
            client.fetch_all().await,
            Err(CatalogError::Pagination { .. })
        ));
    }
}
