//! Design fetching: file identifier in, document tree and preview URL out.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{F2cError, Result};
use crate::figma_client::{FigmaApiClient, FigmaFileResponse, FigmaImageResponse};
use crate::types::FigmaNode;

/// Render scale used for the preview image of the document root.
pub const DEFAULT_IMAGE_SCALE: f32 = 2.0;

const EMPTY_KEY_MESSAGE: &str = "Please enter a valid Figma file key.";

/// Read access to a design-file API.
#[async_trait]
pub trait DesignApi: Send + Sync {
    async fn file(&self, file_key: &str) -> Result<FigmaFileResponse>;

    async fn images(&self, file_key: &str, ids: &[&str], scale: f32)
        -> Result<FigmaImageResponse>;
}

#[async_trait]
impl DesignApi for FigmaApiClient {
    async fn file(&self, file_key: &str) -> Result<FigmaFileResponse> {
        self.get_file(file_key).await
    }

    async fn images(
        &self,
        file_key: &str,
        ids: &[&str],
        scale: f32,
    ) -> Result<FigmaImageResponse> {
        self.get_images(file_key, ids, scale).await
    }
}

/// A design as retrieved from the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchedDesign {
    pub file_key: String,
    pub name: String,
    pub document: FigmaNode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_image_url: Option<String>,
}

/// Reduces user input to a bare file key.
///
/// Accepts a raw key or a figma.com link (`/file/`, `/design/`, `/proto/`).
/// Empty input is a validation error.
pub fn parse_file_key(input: &str) -> Result<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(F2cError::validation(EMPTY_KEY_MESSAGE));
    }

    let link = url::Url::parse(trimmed)
        .ok()
        .filter(|url| matches!(url.scheme(), "http" | "https"));
    if let Some(url) = link {
        let mut segments = url.path_segments().into_iter().flatten();
        while let Some(segment) = segments.next() {
            if matches!(segment, "file" | "design" | "proto") {
                if let Some(key) = segments.next().filter(|k| !k.is_empty()) {
                    return Ok(key.to_string());
                }
            }
        }
        return Err(F2cError::validation(format!(
            "Could not find a Figma file key in {trimmed}"
        )));
    }

    Ok(trimmed.to_string())
}

/// Embeddable preview URL for a file key.
pub fn embed_url(file_key: &str) -> String {
    format!(
        "https://www.figma.com/embed?embed_host=share&url=https://www.figma.com/file/{file_key}"
    )
}

/// Fetches the document tree and a rendered preview of its root node.
///
/// Errors from either request fail the fetch. A render response without an
/// image for the root leaves `preview_image_url` empty.
pub async fn fetch_design(api: &dyn DesignApi, file_key: &str, scale: f32) -> Result<FetchedDesign> {
    if file_key.trim().is_empty() {
        return Err(F2cError::validation(EMPTY_KEY_MESSAGE));
    }

    let file = api.file(file_key).await?;
    let root_id = file.document.id.clone();
    debug!(file_key, root_id = %root_id, name = %file.name, "fetched Figma document");

    let images = api.images(file_key, &[root_id.as_str()], scale).await?;
    if let Some(err) = &images.err {
        warn!(file_key, error = %err, "Figma could not render a preview image");
    }
    let preview_image_url = images.image_for(&root_id).map(str::to_string);
    if preview_image_url.is_none() {
        warn!(file_key, "no preview image returned for the document root");
    }

    Ok(FetchedDesign {
        file_key: file_key.to_string(),
        name: file.name,
        document: file.document,
        preview_image_url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingApi {
        calls: Mutex<Vec<String>>,
        image_url: Option<String>,
        fail_images: bool,
    }

    #[async_trait]
    impl DesignApi for RecordingApi {
        async fn file(&self, file_key: &str) -> Result<FigmaFileResponse> {
            self.calls.lock().unwrap().push(format!("file:{file_key}"));
            Ok(FigmaFileResponse {
                name: "Landing".into(),
                document: FigmaNode {
                    id: "0:0".into(),
                    name: Some("Document".into()),
                    ..FigmaNode::default()
                },
                last_modified: None,
                version: None,
                thumbnail_url: None,
            })
        }

        async fn images(
            &self,
            file_key: &str,
            ids: &[&str],
            scale: f32,
        ) -> Result<FigmaImageResponse> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("images:{file_key}:{}:{scale}", ids.join(",")));
            if self.fail_images {
                return Err(F2cError::figma_api(None, "render timeout"));
            }
            let mut images = HashMap::new();
            images.insert("0:0".to_string(), self.image_url.clone());
            Ok(FigmaImageResponse { err: None, images })
        }
    }

    #[test]
    fn parse_file_key_accepts_raw_keys_and_links() {
        assert_eq!(parse_file_key("  abc123 ").unwrap(), "abc123");
        assert_eq!(
            parse_file_key("https://www.figma.com/file/AbC123/Landing-Page?node-id=1%3A2").unwrap(),
            "AbC123"
        );
        assert_eq!(
            parse_file_key("https://www.figma.com/design/XyZ789/Site").unwrap(),
            "XyZ789"
        );
    }

    #[test]
    fn parse_file_key_rejects_empty_input() {
        let err = parse_file_key("   ").unwrap_err();
        assert!(matches!(err, F2cError::Validation(_)));
        assert_eq!(err.to_string(), EMPTY_KEY_MESSAGE);
    }

    #[test]
    fn parse_file_key_rejects_links_without_key() {
        assert!(parse_file_key("https://www.figma.com/community").is_err());
    }

    #[test]
    fn embed_url_wraps_file_link() {
        assert_eq!(
            embed_url("abc"),
            "https://www.figma.com/embed?embed_host=share&url=https://www.figma.com/file/abc"
        );
    }

    #[tokio::test]
    async fn fetch_requests_file_then_root_render() {
        let api = RecordingApi {
            image_url: Some("https://cdn.example/root.png".into()),
            ..RecordingApi::default()
        };
        let design = fetch_design(&api, "abc", DEFAULT_IMAGE_SCALE).await.unwrap();
        assert_eq!(design.name, "Landing");
        assert_eq!(
            design.preview_image_url.as_deref(),
            Some("https://cdn.example/root.png")
        );
        assert_eq!(
            *api.calls.lock().unwrap(),
            vec!["file:abc".to_string(), "images:abc:0:0:2".to_string()]
        );
    }

    #[tokio::test]
    async fn missing_render_leaves_preview_empty() {
        let api = RecordingApi::default();
        let design = fetch_design(&api, "abc", 1.0).await.unwrap();
        assert!(design.preview_image_url.is_none());
    }

    #[tokio::test]
    async fn render_request_failure_fails_fetch() {
        let api = RecordingApi {
            fail_images: true,
            ..RecordingApi::default()
        };
        let err = fetch_design(&api, "abc", 1.0).await.unwrap_err();
        assert!(err.to_string().contains("render timeout"));
    }

    #[tokio::test]
    async fn empty_key_makes_no_requests() {
        let api = RecordingApi::default();
        let err = fetch_design(&api, "", 1.0).await.unwrap_err();
        assert!(matches!(err, F2cError::Validation(_)));
        assert!(api.calls.lock().unwrap().is_empty());
    }
}
