//! Thin client for the two read-only Figma REST endpoints the tool needs.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use crate::error::{F2cError, Result};
use crate::types::FigmaNode;

pub const FIGMA_API_BASE: &str = "https://api.figma.com/v1";
pub const FIGMA_TOKEN_ENV: &str = "FIGMA_TOKEN";
pub const FIGMA_OAUTH_TOKEN_ENV: &str = "FIGMA_OAUTH_TOKEN";

/// Credentials sent with every Figma request.
#[derive(Clone)]
pub enum FigmaAuth {
    /// Personal access token, sent as `X-Figma-Token`
    PersonalToken(String),
    /// OAuth access token, sent as `Authorization: Bearer`
    OAuthToken(String),
}

impl std::fmt::Debug for FigmaAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FigmaAuth::PersonalToken(_) => f.write_str("PersonalToken(***)"),
            FigmaAuth::OAuthToken(_) => f.write_str("OAuthToken(***)"),
        }
    }
}

impl FigmaAuth {
    /// Reads `FIGMA_TOKEN`, then `FIGMA_OAUTH_TOKEN`.
    ///
    /// A missing token is not an error here: requests go out with an empty
    /// token and the API answers with its own authentication error.
    pub fn from_env() -> Self {
        let read = |key: &str| {
            std::env::var(key)
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        if let Some(token) = read(FIGMA_TOKEN_ENV) {
            return FigmaAuth::PersonalToken(token);
        }
        if let Some(token) = read(FIGMA_OAUTH_TOKEN_ENV) {
            return FigmaAuth::OAuthToken(token);
        }
        warn!("neither {FIGMA_TOKEN_ENV} nor {FIGMA_OAUTH_TOKEN_ENV} is set; Figma requests will be unauthenticated");
        FigmaAuth::PersonalToken(String::new())
    }

    fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            FigmaAuth::PersonalToken(token) => request.header("X-Figma-Token", token),
            FigmaAuth::OAuthToken(token) => request.bearer_auth(token),
        }
    }
}

/// Response of `GET /v1/files/:key`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FigmaFileResponse {
    #[serde(default)]
    pub name: String,
    pub document: FigmaNode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}

/// Response of `GET /v1/images/:key`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FigmaImageResponse {
    #[serde(default)]
    pub err: Option<String>,
    /// Node id to rendered image URL; `null` when rendering failed
    #[serde(default)]
    pub images: HashMap<String, Option<String>>,
}

impl FigmaImageResponse {
    pub fn image_for(&self, node_id: &str) -> Option<&str> {
        self.images.get(node_id).and_then(|url| url.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct FigmaErrorBody {
    #[serde(default)]
    err: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct FigmaApiClient {
    http: Client,
    base_url: Url,
    auth: FigmaAuth,
}

impl FigmaApiClient {
    /// Builds a client with its own HTTP connection pool.
    ///
    /// `timeout` of `None` waits indefinitely for each request.
    pub fn new(auth: FigmaAuth, base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Self::with_http_client(auth, base_url, builder.build()?)
    }

    pub fn with_http_client(auth: FigmaAuth, base_url: &str, http: Client) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(F2cError::Config(format!(
                "Figma API base URL cannot be a base: {base_url}"
            )));
        }
        Ok(Self {
            http,
            base_url,
            auth,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetches the full document tree of a file.
    pub async fn get_file(&self, file_key: &str) -> Result<FigmaFileResponse> {
        let url = self.endpoint(&["files", file_key])?;
        debug!(%url, "requesting Figma file");
        let response = self.auth.apply(self.http.get(url)).send().await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    /// Requests rendered images for `ids` at `scale`.
    pub async fn get_images(
        &self,
        file_key: &str,
        ids: &[&str],
        scale: f32,
    ) -> Result<FigmaImageResponse> {
        let mut url = self.endpoint(&["images", file_key])?;
        url.query_pairs_mut()
            .append_pair("ids", &ids.join(","))
            .append_pair("scale", &scale.to_string());
        debug!(%url, "requesting Figma image render");
        let response = self.auth.apply(self.http.get(url)).send().await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| F2cError::Config(format!("invalid Figma API base: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<FigmaErrorBody>(&body)
        .ok()
        .and_then(|b| b.err.or(b.message))
        .unwrap_or(body);
    Err(F2cError::figma_api(Some(status), message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_appends_segments_to_base_path() {
        let client = FigmaApiClient::new(
            FigmaAuth::PersonalToken("t".into()),
            "https://api.figma.com/v1",
            None,
        )
        .unwrap();
        let url = client.endpoint(&["files", "abc123"]).unwrap();
        assert_eq!(url.as_str(), "https://api.figma.com/v1/files/abc123");

        let trailing = FigmaApiClient::new(
            FigmaAuth::PersonalToken("t".into()),
            "http://127.0.0.1:9000/v1/",
            None,
        )
        .unwrap();
        let url = trailing.endpoint(&["images", "abc123"]).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:9000/v1/images/abc123");
    }

    #[test]
    fn rejects_unparsable_base() {
        let err = FigmaApiClient::new(FigmaAuth::PersonalToken(String::new()), "not a url", None)
            .unwrap_err();
        assert!(matches!(err, F2cError::InvalidUrl(_)));
    }

    #[test]
    fn auth_debug_hides_token() {
        let auth = FigmaAuth::OAuthToken("secret-value".into());
        assert_eq!(format!("{auth:?}"), "OAuthToken(***)");
    }

    #[test]
    fn image_response_tolerates_null_urls() {
        let resp: FigmaImageResponse = serde_json::from_str(
            r#"{"err":null,"images":{"0:0":null,"1:2":"https://cdn.example/1.png"}}"#,
        )
        .unwrap();
        assert_eq!(resp.image_for("0:0"), None);
        assert_eq!(resp.image_for("1:2"), Some("https://cdn.example/1.png"));
        assert_eq!(resp.image_for("9:9"), None);
    }

    #[test]
    fn file_response_parses_minimal_document() {
        let resp: FigmaFileResponse = serde_json::from_str(
            r#"{"name":"Landing","lastModified":"2024-01-01T00:00:00Z","document":{"id":"0:0","name":"Document","type":"DOCUMENT","children":[]}}"#,
        )
        .unwrap();
        assert_eq!(resp.name, "Landing");
        assert_eq!(resp.document.id, "0:0");
        assert!(resp.document.children.is_empty());
    }
}
