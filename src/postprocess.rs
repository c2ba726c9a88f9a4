//! Clean-up of model output into a usable source artifact.
//!
//! Everything here is pattern matching over text, not HTML or CSS parsing.
//! It is best effort: unusual model output can make the style/body sniffing
//! pick the wrong fragment, and the fallbacks are placeholder strings rather
//! than errors.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::framework::Framework;

pub const NO_CSS_PLACEHOLDER: &str = "/* No CSS extracted */";
pub const NO_HTML_PLACEHOLDER: &str = "<div>/* No HTML content extracted */</div>";
pub const DOCUMENT_TITLE: &str = "Figma Design Implementation";

static OPEN_FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"```(?:html|css|javascript|jsx|vue|typescript|tsx|js|ts|react|angular)?[ \t]*\r?\n",
    )
    .expect("valid regex")
});
static CLOSE_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"```[ \t]*(?:\r?\n|\z)").expect("valid regex"));
static DOCTYPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<!doctype\s+html").expect("valid regex"));
static STYLE_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<style[^>]*>(.*?)</style>").expect("valid regex"));
static CSS_RULE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)[.#][A-Za-z0-9_-]+\s*\{.*?\}").expect("valid regex"));
static BODY_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<body[^>]*>(.*?)</body>").expect("valid regex"));
static OPENING_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<[a-z][^>]*>").expect("valid regex"));
static CLOSING_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)</[a-z][^>]*>").expect("valid regex"));
static STYLE_OR_SCRIPT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<style[^>]*>.*?</style>|<script[^>]*>.*?</script>").expect("valid regex")
});

/// Strips fences and, for HTML & CSS, ensures a complete document.
pub fn finalize_code(raw: &str, framework: Framework) -> String {
    let code = strip_code_fences(raw);
    if framework == Framework::HtmlCss && !has_doctype(&code) {
        wrap_html_document(&code)
    } else {
        code
    }
}

/// Removes language-tagged opening fences and bare closing fences.
pub fn strip_code_fences(text: &str) -> String {
    let without_open = OPEN_FENCE.replace_all(text, "");
    let without_close = CLOSE_FENCE.replace_all(&without_open, "");
    without_close.trim().to_string()
}

pub fn has_doctype(code: &str) -> bool {
    DOCTYPE.is_match(code)
}

/// Builds a minimal HTML document from loosely structured markup and CSS.
pub fn wrap_html_document(code: &str) -> String {
    let css = extract_css(code);
    let body = extract_body(code);
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{DOCUMENT_TITLE}</title>
    <style>
        /* Extracted Styles */
        {css}
    </style>
</head>
<body>
    {body}
</body>
</html>"#
    )
}

/// First `<style>` block, else every CSS-rule-looking fragment, else a placeholder.
pub fn extract_css(text: &str) -> String {
    if let Some(content) = first_capture(&STYLE_BLOCK, text) {
        return content;
    }

    let rules: Vec<&str> = CSS_RULE
        .find_iter(text)
        .map(|m| m.as_str().trim())
        .collect();
    if !rules.is_empty() {
        return rules.join("\n");
    }

    NO_CSS_PLACEHOLDER.to_string()
}

/// First `<body>` contents, else markup minus style/script blocks, else a placeholder.
pub fn extract_body(text: &str) -> String {
    if let Some(content) = first_capture(&BODY_BLOCK, text) {
        return content;
    }

    if OPENING_TAG.is_match(text) && CLOSING_TAG.is_match(text) {
        return STYLE_OR_SCRIPT.replace_all(text, "").trim().to_string();
    }

    NO_HTML_PLACEHOLDER.to_string()
}

fn first_capture(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|content| !content.is_empty())
        .map(str::to_string)
}
