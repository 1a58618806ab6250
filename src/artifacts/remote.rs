//! Remote artifact download
//!
//! Large-file hosts (Google Drive in particular) answer the first request for a
//! big file with an HTML interstitial instead of the file. The page carries a
//! confirmation token, either in a `download_warning` cookie or embedded in the
//! markup, and repeating the request with `confirm=<token>` yields the bytes.

use regex::Regex;
use reqwest::{header, Client as HttpClient, Response};
use std::sync::OnceLock;

use crate::{
    artifacts::ArtifactSource,
    error::{AppResult, ArtifactKind, LoadError},
};

const DOWNLOAD_WARNING_COOKIE: &str = "download_warning";

fn confirm_link_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"confirm=([0-9A-Za-z_-]+)").expect("valid regex"))
}

fn confirm_field_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"name="confirm"\s+value="([^"]+)""#).expect("valid regex")
    })
}

/// Downloads artifacts over HTTP
#[derive(Clone)]
pub struct RemoteSource {
    http_client: HttpClient,
    movies_url: String,
    similarity_url: String,
}

impl RemoteSource {
    pub fn new(movies_url: String, similarity_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            movies_url,
            similarity_url,
        }
    }

    fn url(&self, kind: ArtifactKind) -> &str {
        match kind {
            ArtifactKind::Catalog => &self.movies_url,
            ArtifactKind::SimilarityMatrix => &self.similarity_url,
        }
    }

    async fn get(
        &self,
        kind: ArtifactKind,
        confirm: Option<&str>,
    ) -> Result<Response, LoadError> {
        let url = self.url(kind);
        let mut request = self.http_client.get(url);
        if let Some(token) = confirm {
            request = request.query(&[("confirm", token)]);
        }

        let response = request.send().await.map_err(|e| LoadError::Unavailable {
            kind,
            location: url.to_string(),
            reason: e.to_string(),
        })?;

        if !response.status().is_success() {
            return Err(LoadError::Unavailable {
                kind,
                location: url.to_string(),
                reason: format!("server returned status {}", response.status()),
            });
        }

        Ok(response)
    }

    async fn read_body(&self, kind: ArtifactKind, response: Response) -> Result<Vec<u8>, LoadError> {
        response
            .bytes()
            .await
            .map(|bytes| bytes.to_vec())
            .map_err(|e| LoadError::Unavailable {
                kind,
                location: self.url(kind).to_string(),
                reason: format!("failed to read response body: {}", e),
            })
    }
}

fn is_html(response: &Response) -> bool {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("text/html"))
}

/// Token from a `download_warning*=<token>` cookie
fn token_from_cookies(response: &Response) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|cookie| cookie.split(';').next())
        .filter_map(|pair| pair.split_once('='))
        .find(|(name, _)| name.trim().starts_with(DOWNLOAD_WARNING_COOKIE))
        .map(|(_, token)| token.trim().to_string())
}

/// Token embedded in the interstitial page, as a link or a form field
fn token_from_body(body: &str) -> Option<String> {
    confirm_link_pattern()
        .captures(body)
        .or_else(|| confirm_field_pattern().captures(body))
        .map(|captures| captures[1].to_string())
}

#[async_trait::async_trait]
impl ArtifactSource for RemoteSource {
    async fn fetch(&self, kind: ArtifactKind) -> AppResult<Vec<u8>> {
        let response = self.get(kind, None).await?;

        if !is_html(&response) {
            let bytes = self.read_body(kind, response).await?;
            tracing::info!(kind = %kind, bytes = bytes.len(), "Downloaded artifact");
            return Ok(bytes);
        }

        let cookie_token = token_from_cookies(&response);
        let body = self.read_body(kind, response).await?;
        let token = cookie_token.or_else(|| token_from_body(&String::from_utf8_lossy(&body)));

        let Some(token) = token else {
            // Let the decoder report the markup verdict
            tracing::warn!(
                kind = %kind,
                bytes = body.len(),
                "Download returned HTML without a confirmation token"
            );
            return Ok(body);
        };

        tracing::info!(kind = %kind, "Confirming large-file download");

        let response = self.get(kind, Some(&token)).await?;
        let bytes = self.read_body(kind, response).await?;
        tracing::info!(kind = %kind, bytes = bytes.len(), "Downloaded artifact after confirmation");

        Ok(bytes)
    }

    fn location(&self, kind: ArtifactKind) -> String {
        self.url(kind).to_string()
    }

    fn name(&self) -> &'static str {
        "remote"
    }
}
