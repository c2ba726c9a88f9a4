//! Per-session state for the load → generate workflow.
//!
//! A [`Session`] is owned by its caller and mutated only through `&mut self`,
//! so two operations on the same session can never overlap. Every operation
//! returns a `Result`; failures are also kept as the session's single
//! user-visible error message until the next operation starts.

use serde::Serialize;
use tracing::info;

use crate::error::{F2cError, Result};
use crate::extract::extract_tokens;
use crate::figma::{embed_url, fetch_design, parse_file_key, DesignApi, DEFAULT_IMAGE_SCALE};
use crate::framework::Framework;
use crate::gemini::TextModel;
use crate::generator::generate_code;
use crate::types::TokenSet;

/// A design whose tokens have been extracted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadedDesign {
    pub file_key: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_image_url: Option<String>,
    pub tokens: TokenSet,
}

#[derive(Debug, Clone)]
pub struct Session {
    framework: Framework,
    image_scale: f32,
    embed_url: Option<String>,
    design: Option<LoadedDesign>,
    generated_code: Option<String>,
    last_error: Option<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Framework::default())
    }
}

impl Session {
    pub fn new(framework: Framework) -> Self {
        Self {
            framework,
            image_scale: DEFAULT_IMAGE_SCALE,
            embed_url: None,
            design: None,
            generated_code: None,
            last_error: None,
        }
    }

    pub fn with_image_scale(mut self, scale: f32) -> Self {
        self.image_scale = scale;
        self
    }

    pub fn framework(&self) -> Framework {
        self.framework
    }

    pub fn set_framework(&mut self, framework: Framework) {
        self.framework = framework;
    }

    pub fn embed_url(&self) -> Option<&str> {
        self.embed_url.as_deref()
    }

    pub fn design(&self) -> Option<&LoadedDesign> {
        self.design.as_ref()
    }

    pub fn tokens(&self) -> Option<&TokenSet> {
        self.design.as_ref().map(|d| &d.tokens)
    }

    pub fn code(&self) -> Option<&str> {
        self.generated_code.as_deref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Loads a design and extracts its tokens.
    ///
    /// `input` may be a file key or a figma.com link. Empty input fails
    /// without any request. The embed URL is updated before fetching and
    /// stays set even if the fetch fails; a failed fetch keeps the
    /// previously loaded design.
    pub async fn load_design(&mut self, api: &dyn DesignApi, input: &str) -> Result<&LoadedDesign> {
        self.last_error = None;
        let file_key = match parse_file_key(input) {
            Ok(key) => key,
            Err(err) => return Err(self.record(err)),
        };
        self.embed_url = Some(embed_url(&file_key));

        let fetched = match fetch_design(api, &file_key, self.image_scale).await {
            Ok(fetched) => fetched,
            Err(err) => return Err(self.record(err)),
        };
        let tokens = extract_tokens(&fetched.document);
        info!(file_key = %fetched.file_key, name = %fetched.name, "design loaded");

        Ok(self.design.insert(LoadedDesign {
            file_key: fetched.file_key,
            name: fetched.name,
            preview_image_url: fetched.preview_image_url,
            tokens,
        }))
    }

    /// Generates code for the loaded design in the selected framework.
    ///
    /// On failure the previous code is cleared.
    pub async fn generate(&mut self, model: &dyn TextModel) -> Result<&str> {
        self.last_error = None;
        let (tokens, preview) = match &self.design {
            Some(design) => (Some(&design.tokens), design.preview_image_url.as_deref()),
            None => (None, None),
        };

        match generate_code(model, tokens, preview, self.framework).await {
            Ok(code) => Ok(self.generated_code.insert(code).as_str()),
            Err(err) => {
                self.generated_code = None;
                Err(self.record(err))
            }
        }
    }

    /// Runs generation again with the same design and framework.
    pub async fn regenerate(&mut self, model: &dyn TextModel) -> Result<&str> {
        self.generate(model).await
    }

    pub fn clear_code(&mut self) {
        self.generated_code = None;
    }

    fn record(&mut self, err: F2cError) -> F2cError {
        self.last_error = Some(err.to_string());
        err
    }
}
