use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ErrorPayload;
use crate::framework::Framework;
use crate::types::{TokenCounts, TokenSet};

pub const F2C_OUTPUT_VERSION: &str = "0.1.0";

/// Machine-readable result of one CLI invocation, tagged by `mode`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum F2cOutput {
    Tokens(TokensOutput),
    Prompt(PromptOutput),
    Generate(GenerateOutput),
    Error(ErrorOutput),
}

/// Identifies the design a command worked on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignDescriptor {
    pub file_key: String,
    pub name: String,
    pub embed_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokensOutput {
    pub version: String,
    pub design: DesignDescriptor,
    pub summary: TokenCounts,
    pub tokens: TokenSet,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptOutput {
    pub version: String,
    pub design: DesignDescriptor,
    pub framework: Framework,
    pub prompt: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateOutput {
    pub version: String,
    pub design: DesignDescriptor,
    pub framework: Framework,
    pub summary: TokenCounts,
    /// Number of generation requests made, including regenerations.
    pub attempts: u32,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorOutput {
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub error: ErrorPayload,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::F2cError;
    use serde_json::json;

    #[test]
    fn error_output_is_tagged_by_mode() {
        let payload = F2cError::validation("Please enter a valid Figma file key.").to_payload();
        let out = F2cOutput::Error(ErrorOutput {
            version: F2C_OUTPUT_VERSION.to_string(),
            message: Some(payload.message.clone()),
            error: payload,
        });
        let value = serde_json::to_value(&out).unwrap();
        assert_eq!(value["mode"], "error");
        assert_eq!(value["error"]["category"], "validation");
        assert_eq!(value["message"], "Please enter a valid Figma file key.");
    }

    #[test]
    fn generate_output_uses_camel_case_and_framework_slug() {
        let out = F2cOutput::Generate(GenerateOutput {
            version: F2C_OUTPUT_VERSION.to_string(),
            design: DesignDescriptor {
                file_key: "abc".into(),
                name: "Landing".into(),
                embed_url: "https://www.figma.com/embed?embed_host=share&url=x".into(),
                preview_image_url: None,
            },
            framework: Framework::HtmlCss,
            summary: TokenCounts::default(),
            attempts: 1,
            code: "<!DOCTYPE html>".into(),
            code_path: None,
        });
        let value = serde_json::to_value(&out).unwrap();
        assert_eq!(value["mode"], "generate");
        assert_eq!(value["framework"], "html-css");
        assert_eq!(value["design"]["fileKey"], "abc");
        assert!(value["design"].get("previewImageUrl").is_none());
        assert!(value.get("codePath").is_none());

        let back: F2cOutput = serde_json::from_value(value).unwrap();
        assert!(matches!(back, F2cOutput::Generate(g) if g.attempts == 1));
    }

    #[test]
    fn tokens_output_parses_from_json() {
        let value = json!({
            "mode": "tokens",
            "version": F2C_OUTPUT_VERSION,
            "design": { "fileKey": "k", "name": "n", "embedUrl": "e" },
            "summary": { "colors": 0, "fonts": 0, "textStyles": 0, "spacing": 0, "components": 0, "hasLayout": false },
            "tokens": {
                "colors": [], "fonts": [], "textStyles": [], "spacing": [],
                "components": [], "layout": null
            }
        });
        let out: F2cOutput = serde_json::from_value(value).unwrap();
        match out {
            F2cOutput::Tokens(t) => assert!(t.tokens.is_empty()),
            other => panic!("unexpected output: {other:?}"),
        }
    }
}
