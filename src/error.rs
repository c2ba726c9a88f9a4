use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::ParseError;

/// Hint appended to every code generation failure.
pub const API_KEY_HINT: &str = "Make sure your API key is valid.";

#[derive(Debug, Error)]
pub enum F2cError {
    #[error("{0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] ParseError),

    #[error("Figma API error (status: {status:?}): {message}")]
    FigmaApi {
        status: Option<StatusCode>,
        message: String,
    },

    #[error("Gemini API error (status: {status:?}): {message}")]
    GeminiApi {
        status: Option<StatusCode>,
        message: String,
    },

    #[error("Error generating code: {0}")]
    Generation(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl F2cError {
    pub fn validation(message: impl Into<String>) -> Self {
        F2cError::Validation(message.into())
    }

    pub fn figma_api(status: Option<StatusCode>, message: impl Into<String>) -> Self {
        F2cError::FigmaApi {
            status,
            message: message.into(),
        }
    }

    pub fn gemini_api(status: Option<StatusCode>, message: impl Into<String>) -> Self {
        F2cError::GeminiApi {
            status,
            message: message.into(),
        }
    }

    /// Wraps a failure from the generative API with the credentials hint.
    pub fn generation(cause: &F2cError) -> Self {
        F2cError::Generation(format!("{cause}. {API_KEY_HINT}"))
    }

    pub fn to_payload(&self) -> ErrorPayload {
        match self {
            F2cError::Validation(msg) => ErrorPayload::new(
                ErrorCategory::Validation,
                msg.to_string(),
                "Pass a Figma file key (or file URL) with --file and load it before generating.",
            ),
            F2cError::Io(e) => ErrorPayload::new(
                ErrorCategory::Config,
                e.to_string(),
                "Check file paths/permissions.",
            ),
            F2cError::Network(e) => ErrorPayload::new(
                ErrorCategory::Network,
                e.to_string(),
                "Check connectivity/proxy/VPN and retry.",
            ),
            F2cError::InvalidUrl(e) => ErrorPayload::new(
                ErrorCategory::Config,
                e.to_string(),
                "Verify api_base URLs in the config file.",
            ),
            F2cError::FigmaApi { status, message } => ErrorPayload::new(
                ErrorCategory::Figma,
                format!("Error loading design (status {:?}): {}", status, message),
                "Check FIGMA_TOKEN and the file key; retry after waiting if rate limited.",
            ),
            F2cError::GeminiApi { status, message } => ErrorPayload::new(
                ErrorCategory::Generation,
                format!("Gemini API error (status {:?}): {}", status, message),
                "Check GEMINI_API_KEY and the configured model.",
            ),
            F2cError::Generation(msg) => ErrorPayload::new(
                ErrorCategory::Generation,
                format!("Error generating code: {msg}"),
                "Check GEMINI_API_KEY and retry; use `f2c prompt` to inspect the request.",
            ),
            F2cError::Serialization(e) => ErrorPayload::new(
                ErrorCategory::Config,
                e.to_string(),
                "Check JSON inputs; run with --verbose for details.",
            ),
            F2cError::Config(msg) => ErrorPayload::new(
                ErrorCategory::Config,
                msg.to_string(),
                "Check flags and the --config file.",
            ),
        }
    }
}

pub type Result<T> = std::result::Result<T, F2cError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    Validation,
    Config,
    Network,
    Figma,
    Generation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    pub category: ErrorCategory,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remediation: Option<String>,
}

impl ErrorPayload {
    pub fn new(category: ErrorCategory, message: String, remediation: impl Into<String>) -> Self {
        Self {
            category,
            message,
            remediation: Some(remediation.into()),
        }
    }
}
