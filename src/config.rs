//! Optional TOML configuration.
//!
//! Every key has a default, so an empty file (or no file) is valid. Secrets
//! never live here; they come from the environment.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{F2cError, Result};
use crate::figma::DEFAULT_IMAGE_SCALE;
use crate::figma_client::FIGMA_API_BASE;
use crate::framework::Framework;
use crate::gemini::{GenerationConfig, DEFAULT_MODEL, GEMINI_API_BASE};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub framework: Framework,
    pub figma: FigmaSettings,
    pub generator: GeneratorSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FigmaSettings {
    pub api_base: String,
    pub image_scale: f32,
    #[serde(with = "humantime_serde", skip_serializing_if = "Option::is_none")]
    pub request_timeout: Option<Duration>,
}

impl Default for FigmaSettings {
    fn default() -> Self {
        Self {
            api_base: FIGMA_API_BASE.to_string(),
            image_scale: DEFAULT_IMAGE_SCALE,
            request_timeout: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    pub api_base: String,
    pub model: String,
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub max_output_tokens: u32,
    #[serde(with = "humantime_serde", skip_serializing_if = "Option::is_none")]
    pub request_timeout: Option<Duration>,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        let sampling = GenerationConfig::default();
        Self {
            api_base: GEMINI_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: sampling.temperature,
            top_p: sampling.top_p,
            top_k: sampling.top_k,
            max_output_tokens: sampling.max_output_tokens,
            request_timeout: None,
        }
    }
}

impl GeneratorSettings {
    pub fn sampling(&self) -> GenerationConfig {
        GenerationConfig {
            temperature: self.temperature,
            top_p: self.top_p,
            top_k: self.top_k,
            max_output_tokens: self.max_output_tokens,
        }
    }
}

impl Config {
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|e| F2cError::Config(e.to_string()))
    }

    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    pub fn validate(&self) -> Result<()> {
        let scale = self.figma.image_scale;
        if !(0.01..=4.0).contains(&scale) {
            return Err(F2cError::Config(format!(
                "figma.image_scale must be between 0.01 and 4, got {scale}"
            )));
        }
        let generator = &self.generator;
        if !(0.0..=2.0).contains(&generator.temperature) {
            return Err(F2cError::Config(format!(
                "generator.temperature must be between 0 and 2, got {}",
                generator.temperature
            )));
        }
        if !(0.0..=1.0).contains(&generator.top_p) {
            return Err(F2cError::Config(format!(
                "generator.top_p must be between 0 and 1, got {}",
                generator.top_p
            )));
        }
        if generator.top_k == 0 {
            return Err(F2cError::Config("generator.top_k must be positive".into()));
        }
        if generator.max_output_tokens == 0 {
            return Err(F2cError::Config(
                "generator.max_output_tokens must be positive".into(),
            ));
        }
        if generator.model.trim().is_empty() {
            return Err(F2cError::Config("generator.model must not be empty".into()));
        }
        for (key, value) in [
            ("figma.api_base", &self.figma.api_base),
            ("generator.api_base", &generator.api_base),
        ] {
            url::Url::parse(value)
                .map_err(|e| F2cError::Config(format!("{key} is not a valid URL ({value}): {e}")))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let cfg = Config::from_toml_str("").unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.framework, Framework::HtmlCss);
        assert_eq!(cfg.figma.api_base, "https://api.figma.com/v1");
        assert_eq!(cfg.generator.model, "gemini-2.0-flash");
        assert_eq!(cfg.generator.sampling(), GenerationConfig::default());
        assert!(cfg.generator.request_timeout.is_none());
        cfg.validate().unwrap();
    }

    #[test]
    fn parses_partial_overrides() {
        let cfg = Config::from_toml_str(
            r#"
framework = "vue"
[figma]
image_scale = 1.0
[generator]
model = "gemini-1.5-pro"
top_k = 20
request_timeout = "90s"
"#,
        )
        .unwrap();
        assert_eq!(cfg.framework, Framework::Vue);
        assert_eq!(cfg.figma.image_scale, 1.0);
        assert_eq!(cfg.figma.api_base, FIGMA_API_BASE);
        assert_eq!(cfg.generator.model, "gemini-1.5-pro");
        assert_eq!(cfg.generator.top_k, 20);
        assert_eq!(cfg.generator.max_output_tokens, 8192);
        assert_eq!(
            cfg.generator.request_timeout,
            Some(Duration::from_secs(90))
        );
        cfg.validate().unwrap();
    }

    #[test]
    fn rejects_unknown_framework() {
        assert!(Config::from_toml_str(r#"framework = "svelte""#).is_err());
    }

    #[test]
    fn validate_rejects_out_of_range_values() {
        let mut cfg = Config::default();
        cfg.figma.image_scale = 10.0;
        assert!(cfg.validate().is_err());

        let mut cfg = Config::default();
        cfg.generator.top_p = 1.5;
        assert!(cfg.validate().is_err());

        let mut cfg = Config::default();
        cfg.generator.top_k = 0;
        assert!(cfg.validate().is_err());

        let mut cfg = Config::default();
        cfg.generator.api_base = "not a url".into();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn reads_config_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("f2c.toml");
        std::fs::write(&path, "framework = \"angular\"\n").unwrap();
        let cfg = Config::from_toml_file(&path).unwrap();
        assert_eq!(cfg.framework, Framework::Angular);
    }
}
