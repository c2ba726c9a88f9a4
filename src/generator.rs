//! Prompt construction and the generate-then-clean pipeline.

use std::fmt::Write as _;

use tracing::debug;

use crate::error::{F2cError, Result};
use crate::framework::Framework;
use crate::gemini::TextModel;
use crate::postprocess::finalize_code;
use crate::types::TokenSet;

const NO_DESIGN_MESSAGE: &str = "Please load a design first to extract elements.";
const NO_IMAGE: &str = "No image available";

/// Fixed requirements every generation request carries.
pub const REQUIREMENTS: [&str; 9] = [
    "Create responsive, pixel-perfect code that exactly matches the Figma design.",
    "Use all the extracted colors, fonts, text styles, and spacing values.",
    "Implement the exact same layout structure (flexbox/grid) as in the design.",
    "Include proper CSS with all styling details (shadows, borders, gradients, etc).",
    "For images, use placeholder divs with text \"Add your image here\".",
    "For links, use \"#\" with text showing the intended destination.",
    "Include any interactive elements like buttons, dropdowns, etc.",
    "Ensure the code is well-organized and commented.",
    "DO NOT include any placeholder text or skeleton instructions - provide COMPLETE, WORKING code.",
];

/// Builds the natural-language instruction sent to the model.
pub fn build_prompt(
    tokens: &TokenSet,
    preview_image_url: Option<&str>,
    framework: Framework,
) -> Result<String> {
    let design = serde_json::to_string(tokens)?;
    let label = framework.label();

    let mut prompt = String::new();
    let _ = writeln!(
        prompt,
        "Generate complete, production-ready {label} code that precisely matches the Figma design."
    );
    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "=== Design Elements ===");
    let _ = writeln!(prompt, "{design}");
    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "=== Design Image URL ===");
    let _ = writeln!(prompt, "{}", preview_image_url.unwrap_or(NO_IMAGE));
    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "=== Requirements ===");
    for (idx, requirement) in REQUIREMENTS.iter().enumerate() {
        let _ = writeln!(prompt, "{}. {requirement}", idx + 1);
    }
    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "=== Additional Instructions ===");
    let _ = writeln!(prompt, "- For {label}: {}", framework.instruction());

    Ok(prompt)
}

/// Generates code for `tokens` and cleans the model output.
///
/// Fails before any request when no tokens are loaded. Model failures are
/// wrapped with a hint to check the API key.
pub async fn generate_code(
    model: &dyn TextModel,
    tokens: Option<&TokenSet>,
    preview_image_url: Option<&str>,
    framework: Framework,
) -> Result<String> {
    let tokens = tokens.ok_or_else(|| F2cError::validation(NO_DESIGN_MESSAGE))?;
    let prompt = build_prompt(tokens, preview_image_url, framework)?;
    debug!(framework = framework.as_str(), prompt_chars = prompt.len(), "built generation prompt");

    let raw = model
        .generate(&prompt)
        .await
        .map_err(|err| F2cError::generation(&err))?;
    Ok(finalize_code(&raw, framework))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ColorToken;
    use async_trait::async_trait;
    use std::sync::Mutex;

    fn tokens() -> TokenSet {
        TokenSet {
            colors: vec![ColorToken {
                rgba: "rgba(255, 0, 0, 1)".into(),
                hex: "#ff0000".into(),
                path: "Document > Hero".into(),
            }],
            fonts: vec!["Inter".into()],
            ..TokenSet::default()
        }
    }

    struct ScriptedModel {
        reply: std::result::Result<String, String>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedModel {
        fn replying(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                reply: Err(message.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl TextModel for ScriptedModel {
        async fn generate(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(message) => Err(F2cError::gemini_api(None, message.clone())),
            }
        }
    }

    #[test]
    fn prompt_embeds_tokens_image_and_requirements() {
        let prompt =
            build_prompt(&tokens(), Some("https://cdn.example/p.png"), Framework::React).unwrap();
        assert!(prompt.starts_with("Generate complete, production-ready React code"));
        assert!(prompt.contains(r##""hex":"#ff0000""##));
        assert!(prompt.contains(r#""fonts":["Inter"]"#));
        assert!(prompt.contains("https://cdn.example/p.png"));
        for (idx, requirement) in REQUIREMENTS.iter().enumerate() {
            assert!(prompt.contains(&format!("{}. {requirement}", idx + 1)));
        }
    }

    #[test]
    fn prompt_carries_only_the_selected_framework_line() {
        let prompt = build_prompt(&tokens(), None, Framework::Vue).unwrap();
        assert!(prompt.contains("- For Vue.js: Use Vue 3 composition API with scoped styles."));
        for other in [Framework::HtmlCss, Framework::React, Framework::Angular] {
            assert!(!prompt.contains(other.instruction()));
        }
        assert!(prompt.contains(NO_IMAGE));
    }

    #[tokio::test]
    async fn generation_without_tokens_makes_no_request() {
        let model = ScriptedModel::replying("<div></div>");
        let err = generate_code(&model, None, None, Framework::HtmlCss)
            .await
            .unwrap_err();
        assert!(matches!(err, F2cError::Validation(_)));
        assert!(model.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn generated_html_is_cleaned_and_wrapped() {
        let model = ScriptedModel::replying("```html\n<div class=\"hero\">Hi</div>\n```");
        let tokens = tokens();
        let code = generate_code(&model, Some(&tokens), None, Framework::HtmlCss)
            .await
            .unwrap();
        assert!(code.starts_with("<!DOCTYPE html>"));
        assert!(code.contains("<div class=\"hero\">Hi</div>"));
        assert!(!code.contains("```"));
        assert_eq!(model.prompts.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn model_errors_carry_the_key_hint() {
        let model = ScriptedModel::failing("quota exceeded");
        let tokens = tokens();
        let err = generate_code(&model, Some(&tokens), None, Framework::Angular)
            .await
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("quota exceeded"));
        assert!(message.contains("Make sure your API key is valid."));
    }
}
