//! Client construction for the commands, including the test hooks.
//!
//! `F2C_MOCK_DESIGN` points at a saved `GET /v1/files/:key` response and
//! replaces the Figma client; `F2C_MOCK_CODE` replaces the Gemini client with
//! a fixed reply. Both exist so the binary can be exercised offline.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use f2c_lib::{
    embed_url, Config, DesignApi, DesignDescriptor, F2cError, FigmaApiClient, FigmaAuth,
    FigmaFileResponse, FigmaImageResponse, Framework, GeminiClient, LoadedDesign, Session,
    TextModel,
};
use tracing::info;

pub const MOCK_DESIGN_ENV: &str = "F2C_MOCK_DESIGN";
pub const MOCK_CODE_ENV: &str = "F2C_MOCK_CODE";

/// Preview URL reported by the mock design source.
const MOCK_PREVIEW_BASE: &str = "https://mock.invalid/preview";

pub fn design_api(config: &Config) -> Result<Box<dyn DesignApi>, F2cError> {
    if let Some(path) = mock_env(MOCK_DESIGN_ENV) {
        info!(path = %path, "using mock design source");
        return Ok(Box::new(MockDesignApi {
            path: PathBuf::from(path),
        }));
    }
    let client = FigmaApiClient::new(
        FigmaAuth::from_env(),
        &config.figma.api_base,
        config.figma.request_timeout,
    )?;
    Ok(Box::new(client))
}

pub fn text_model(config: &Config) -> Result<Box<dyn TextModel>, F2cError> {
    if let Some(reply) = mock_env(MOCK_CODE_ENV) {
        info!("using mock text model");
        return Ok(Box::new(MockTextModel { reply }));
    }
    let generator = &config.generator;
    let client = GeminiClient::new(
        GeminiClient::api_key_from_env(),
        &generator.api_base,
        generator.model.clone(),
        generator.sampling(),
        generator.request_timeout,
    )?;
    Ok(Box::new(client))
}

/// Builds a session for `framework` and loads `file` into it.
pub async fn load_session(
    config: &Config,
    framework: Framework,
    file: &str,
    verbose: bool,
) -> Result<Session, F2cError> {
    let api = design_api(config)?;
    let mut session = Session::new(framework).with_image_scale(config.figma.image_scale);
    if verbose {
        eprintln!("Fetching design {}…", file.trim());
    }
    let design = session.load_design(api.as_ref(), file).await?;
    if verbose {
        let s = design.tokens.summary();
        eprintln!(
            "Extracted {} colors, {} fonts, {} text styles, {} spacing values, {} components from \"{}\"",
            s.colors, s.fonts, s.text_styles, s.spacing, s.components, design.name
        );
    }
    Ok(session)
}

pub fn loaded(session: &Session) -> Result<&LoadedDesign, F2cError> {
    session
        .design()
        .ok_or_else(|| F2cError::validation("Please load a design first to extract elements."))
}

pub fn describe(design: &LoadedDesign) -> DesignDescriptor {
    DesignDescriptor {
        file_key: design.file_key.clone(),
        name: design.name.clone(),
        embed_url: embed_url(&design.file_key),
        preview_image_url: design.preview_image_url.clone(),
    }
}

fn mock_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

struct MockDesignApi {
    path: PathBuf,
}

#[async_trait]
impl DesignApi for MockDesignApi {
    async fn file(&self, _file_key: &str) -> Result<FigmaFileResponse, F2cError> {
        let raw = tokio::fs::read(&self.path).await?;
        Ok(serde_json::from_slice(&raw)?)
    }

    async fn images(
        &self,
        _file_key: &str,
        ids: &[&str],
        _scale: f32,
    ) -> Result<FigmaImageResponse, F2cError> {
        let images: HashMap<String, Option<String>> = ids
            .iter()
            .map(|id| {
                (
                    id.to_string(),
                    Some(format!("{MOCK_PREVIEW_BASE}/{}.png", id.replace(':', "-"))),
                )
            })
            .collect();
        Ok(FigmaImageResponse { err: None, images })
    }
}

struct MockTextModel {
    reply: String,
}

#[async_trait]
impl TextModel for MockTextModel {
    async fn generate(&self, _prompt: &str) -> Result<String, F2cError> {
        Ok(self.reply.clone())
    }
}
