use crate::domain::model::Page;
use crate::domain::ports::PageSource;
use crate::utils::error::{EtlError, Result};
use async_trait::async_trait;
use reqwest::Client;
use url::Url;

/// Fetches `<endpoint>?page=N` with a plain unauthenticated GET.
pub struct HttpPageFetcher {
    client: Client,
    endpoint: Url,
}

impl HttpPageFetcher {
    pub fn new(endpoint: &str) -> Result<Self> {
        let endpoint = Url::parse(endpoint).map_err(|e| EtlError::ConfigError {
            message: format!("invalid API endpoint '{}': {}", endpoint, e),
        })?;

        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, endpoint })
    }

    pub fn page_url(&self, page: u32) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("page", &page.to_string());
        url
    }
}

#[async_trait]
impl PageSource for HttpPageFetcher {
    async fn fetch_page(&self, page: u32) -> Result<Page> {
        let url = self.page_url(page);
        tracing::info!("Fetching page {}...", page);
        tracing::debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            return Err(EtlError::HttpStatusError {
                page,
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let document: serde_json::Value =
            serde_json::from_slice(&body).map_err(|e| EtlError::MalformedPageError {
                page,
                message: e.to_string(),
            })?;

        Ok(Page::from_document(document))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[test]
    fn test_page_url_appends_query() {
        let fetcher = HttpPageFetcher::new("https://api.jikan.moe/v4/top/anime").unwrap();
        assert_eq!(
            fetcher.page_url(3).as_str(),
            "https://api.jikan.moe/v4/top/anime?page=3"
        );

        let filtered = HttpPageFetcher::new("https://api.jikan.moe/v4/top/anime?type=tv").unwrap();
        assert_eq!(
            filtered.page_url(1).as_str(),
            "https://api.jikan.moe/v4/top/anime?type=tv&page=1"
        );
    }

    #[test]
    fn test_invalid_endpoint_is_config_error() {
        let err = HttpPageFetcher::new("not a url").err().unwrap();
        assert!(matches!(err, EtlError::ConfigError { .. }));
    }

    #[tokio::test]
    async fn test_fetch_page_success() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/top/anime").query_param("page", "2");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "pagination": {"last_visible_page": 3, "has_next_page": true},
                    "data": [{"mal_id": 1, "title": "A"}, {"mal_id": 2, "title": "B"}]
                }));
        });

        let fetcher = HttpPageFetcher::new(&server.url("/top/anime")).unwrap();
        let page = fetcher.fetch_page(2).await.unwrap();

        api_mock.assert();
        assert_eq!(page.items.len(), 2);
        assert!(page.has_next_page);
    }

    #[tokio::test]
    async fn test_fetch_page_server_error() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/top/anime");
            then.status(500);
        });

        let fetcher = HttpPageFetcher::new(&server.url("/top/anime")).unwrap();
        let err = fetcher.fetch_page(1).await.unwrap_err();

        api_mock.assert();
        assert!(matches!(err, EtlError::HttpStatusError { page: 1, status: 500 }));
    }

    #[tokio::test]
    async fn test_fetch_page_malformed_body() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/top/anime");
            then.status(200)
                .header("Content-Type", "application/json")
                .body("{\"data\": [");
        });

        let fetcher = HttpPageFetcher::new(&server.url("/top/anime")).unwrap();
        let err = fetcher.fetch_page(1).await.unwrap_err();

        api_mock.assert();
        assert!(matches!(err, EtlError::MalformedPageError { page: 1, .. }));
    }

    #[tokio::test]
    async fn test_fetch_page_connection_refused() {
        // 先綁定一個空的埠再釋放，確保沒有人在聽
        let url = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            format!("http://{}/top/anime", listener.local_addr().unwrap())
        };

        let fetcher = HttpPageFetcher::new(&url).unwrap();
        let err = fetcher.fetch_page(1).await.unwrap_err();
        assert!(matches!(err, EtlError::ApiError(_)));
    }
}
