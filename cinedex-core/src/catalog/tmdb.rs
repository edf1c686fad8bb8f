use async_trait::async_trait;
use cinedex_model::{CatalogPage, MovieDetail, MovieId};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use super::{CatalogClient, CatalogError};

/// Default base URL of the catalog REST API.
pub const TMDB_API_BASE: &str = "https://api.themoviedb.org/3";

/// [`CatalogClient`] backed by the TMDB v3 REST API.
///
/// The API key is a static credential appended to every request as the
/// `api_key` query parameter. Request timeouts are owned by the underlying
/// `reqwest` client.
#[derive(Clone)]
pub struct TmdbCatalogClient {
    api_key: Arc<str>,
    base_url: Arc<str>,
    client: Client,
}

impl fmt::Debug for TmdbCatalogClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TmdbCatalogClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl TmdbCatalogClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Arc::from(api_key.into()),
            base_url: Arc::from(TMDB_API_BASE),
            client: Client::new(),
        }
    }

    /// Build a client with an explicit transport timeout.
    pub fn with_timeout(
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, CatalogError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_http_client(api_key, client))
    }

    /// Use a preconfigured `reqwest` client (proxies, TLS roots, timeouts).
    pub fn with_http_client(api_key: impl Into<String>, client: Client) -> Self {
        Self {
            api_key: Arc::from(api_key.into()),
            base_url: Arc::from(TMDB_API_BASE),
            client,
        }
    }

    /// Point the client at a different API root (mirrors, local fixtures).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Arc::from(base_url.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn endpoint_url(
        &self,
        segments: &[&str],
        query: &[(&str, &str)],
    ) -> Result<Url, CatalogError> {
        let mut url = Url::parse(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|_| {
                CatalogError::InvalidRequest(format!(
                    "{} cannot be used as an API base",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);

        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("api_key", &self.api_key);
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }

        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        url: Url,
    ) -> Result<T, CatalogError> {
        tracing::debug!(endpoint, "catalog request");

        let response = self.client.get(url).send().await.map_err(|e| {
            tracing::warn!(endpoint, error = %e, "catalog transport failure");
            CatalogError::from(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(endpoint, status = status.as_u16(), "catalog returned non-success status");
            return Err(CatalogError::BadStatus(status.as_u16()));
        }

        let body = response.bytes().await.map_err(|e| {
            tracing::warn!(endpoint, error = %e, "failed reading catalog response body");
            CatalogError::Transport(e.to_string())
        })?;

        serde_json::from_slice(&body).map_err(|e| {
            tracing::warn!(endpoint, error = %e, "catalog payload did not match expected shape");
            CatalogError::Decode(e.to_string())
        })
    }
}

#[async_trait]
impl CatalogClient for TmdbCatalogClient {
    async fn fetch_popular(&self) -> Result<CatalogPage, CatalogError> {
        let url = self.endpoint_url(&["discover", "movie"], &[])?;
        let page: CatalogPage = self.get_json("discover/movie", url).await?;
        tracing::info!("discover returned {} movies", page.items.len());
        Ok(page)
    }

    async fn search(&self, query: &str) -> Result<CatalogPage, CatalogError> {
        let url = self.endpoint_url(&["search", "movie"], &[("query", query)])?;
        let page: CatalogPage = self.get_json("search/movie", url).await?;
        tracing::info!("search for {:?} returned {} movies", query, page.items.len());
        Ok(page)
    }

    async fn fetch_detail(&self, id: MovieId) -> Result<MovieDetail, CatalogError> {
        let id = id.to_string();
        let url = self.endpoint_url(&["movie", id.as_str()], &[])?;
        self.get_json("movie/{id}", url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_url_keeps_api_version_segment() {
        let client = TmdbCatalogClient::new("secret");
        let url = client
            .endpoint_url(&["search", "movie"], &[("query", "the matrix")])
            .unwrap();
        assert_eq!(url.path(), "/3/search/movie");
        assert_eq!(url.query(), Some("api_key=secret&query=the+matrix"));
    }

    #[test]
    fn trailing_slash_in_base_is_tolerated() {
        let client =
            TmdbCatalogClient::new("k").with_base_url("http://localhost:8080/v3/");
        let url = client.endpoint_url(&["movie", "42"], &[]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/v3/movie/42?api_key=k");
    }

    #[test]
    fn malformed_base_is_an_invalid_request() {
        let client = TmdbCatalogClient::new("k").with_base_url("::not a url::");
        let err = client.endpoint_url(&["discover", "movie"], &[]).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidRequest(_)));

        let client = TmdbCatalogClient::new("k").with_base_url("mailto:someone@example.com");
        let err = client.endpoint_url(&["discover", "movie"], &[]).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidRequest(_)));
    }

    #[test]
    fn debug_output_redacts_key() {
        let client = TmdbCatalogClient::new("super-secret");
        assert!(!format!("{client:?}").contains("super-secret"));
    }
}
