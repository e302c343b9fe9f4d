use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::config::OembedConfig;

#[derive(Debug, Error)]
pub enum OembedError {
    #[error("oEmbed request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("oEmbed endpoint returned status {0}")]
    Status(u16),
}

/// Display metadata resolved for a video URL. Fields the endpoint omits
/// stay empty strings rather than becoming nulls downstream.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OembedMetadata {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author_name: String,
    #[serde(default)]
    pub thumbnail_url: String,
}

/// Client for an oEmbed-style metadata endpoint.
#[derive(Clone)]
pub struct OembedClient {
    http: reqwest::Client,
    endpoint: String,
}

impl OembedClient {
    pub fn new(config: &OembedConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
        })
    }

    /// Resolve `video_url` into display metadata.
    ///
    /// A non-success status or transport failure is an error and nothing is
    /// returned. A success response with an empty or unparseable body is not:
    /// it degrades to all-empty metadata.
    pub async fn resolve(&self, video_url: &str) -> Result<OembedMetadata, OembedError> {
        debug!(url = video_url, "fetching oembed metadata");
        let resp = self
            .http
            .get(&self.endpoint)
            .query(&[("url", video_url), ("format", "json")])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(OembedError::Status(status.as_u16()));
        }

        let body = resp.text().await?;
        Ok(serde_json::from_str(&body).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> OembedClient {
        OembedClient::new(&OembedConfig {
            endpoint: format!("{}/oembed", server.uri()),
            timeout_secs: 5,
        })
        .expect("client builds")
    }

    #[tokio::test]
    async fn resolves_full_metadata() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/oembed"))
            .and(query_param("url", "https://youtube.com/watch?v=abc"))
            .and(query_param("format", "json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "title": "T",
                "author_name": "A",
                "thumbnail_url": "th",
                "provider_name": "YouTube"
            })))
            .mount(&server)
            .await;

        let meta = client_for(&server)
            .resolve("https://youtube.com/watch?v=abc")
            .await
            .expect("resolve succeeds");
        assert_eq!(meta.title, "T");
        assert_eq!(meta.author_name, "A");
        assert_eq!(meta.thumbnail_url, "th");
    }

    #[tokio::test]
    async fn missing_fields_default_to_empty_strings() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/oembed"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"title": "only"})),
            )
            .mount(&server)
            .await;

        let meta = client_for(&server)
            .resolve("https://youtube.com/watch?v=abc")
            .await
            .expect("resolve succeeds");
        assert_eq!(meta.title, "only");
        assert_eq!(meta.author_name, "");
        assert_eq!(meta.thumbnail_url, "");
    }

    #[tokio::test]
    async fn malformed_body_degrades_to_defaults() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/oembed"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
            .mount(&server)
            .await;

        let meta = client_for(&server)
            .resolve("https://youtube.com/watch?v=abc")
            .await
            .expect("resolve succeeds");
        assert_eq!(meta.title, "");
        assert_eq!(meta.author_name, "");
        assert_eq!(meta.thumbnail_url, "");
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/oembed"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .resolve("https://youtube.com/watch?v=does-not-exist")
            .await
            .unwrap_err();
        match err {
            OembedError::Status(code) => assert_eq!(code, 404),
            other => panic!("expected status error, got {other:?}"),
        }
    }
}
