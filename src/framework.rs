use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Target language/framework for generated code.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Framework {
    #[default]
    #[serde(alias = "html")]
    HtmlCss,
    React,
    #[serde(alias = "vue.js")]
    Vue,
    Angular,
}

impl Framework {
    pub const ALL: [Framework; 4] = [
        Framework::HtmlCss,
        Framework::React,
        Framework::Vue,
        Framework::Angular,
    ];

    /// Human-readable name used in prompts and output.
    pub fn label(self) -> &'static str {
        match self {
            Framework::HtmlCss => "HTML & CSS",
            Framework::React => "React",
            Framework::Vue => "Vue.js",
            Framework::Angular => "Angular",
        }
    }

    /// The framework-specific line appended to the generation prompt.
    pub fn instruction(self) -> &'static str {
        match self {
            Framework::HtmlCss => "Provide complete HTML with embedded CSS.",
            Framework::React => {
                "Create functional components with styled-components or CSS modules."
            }
            Framework::Vue => "Use Vue 3 composition API with scoped styles.",
            Framework::Angular => "Create components with inline styles or separate style files.",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Framework::HtmlCss => "html-css",
            Framework::React => "react",
            Framework::Vue => "vue",
            Framework::Angular => "angular",
        }
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Framework {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "html" | "html-css" | "html+css" | "html & css" => Ok(Framework::HtmlCss),
            "react" => Ok(Framework::React),
            "vue" | "vue.js" | "vuejs" => Ok(Framework::Vue),
            "angular" => Ok(Framework::Angular),
            other => Err(format!(
                "unknown framework '{other}' (expected one of: html-css, react, vue, angular)"
            )),
        }
    }
}
