pub mod color;
pub mod config;
pub mod error;
pub mod extract;
pub mod figma;
pub mod figma_client;
pub mod framework;
pub mod gemini;
pub mod generator;
pub mod output;
pub mod postprocess;
pub mod session;
pub mod types;

pub use color::{to_css_color, CssColor};
pub use config::{Config, FigmaSettings, GeneratorSettings};
pub use error::{ErrorCategory, ErrorPayload, F2cError, Result};
pub use extract::extract_tokens;
pub use figma::{embed_url, fetch_design, parse_file_key, DesignApi, FetchedDesign};
pub use figma_client::{FigmaApiClient, FigmaAuth, FigmaFileResponse, FigmaImageResponse};
pub use framework::Framework;
pub use gemini::{GeminiClient, GenerationConfig, TextModel};
pub use generator::{build_prompt, generate_code};
pub use output::{
    DesignDescriptor, ErrorOutput, F2cOutput, GenerateOutput, PromptOutput, TokensOutput,
};
pub use postprocess::finalize_code;
pub use session::{LoadedDesign, Session};
pub use types::{FigmaNode, TokenCounts, TokenSet};
