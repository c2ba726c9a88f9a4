mod generate;
mod prompt;
mod tokens;

pub use generate::run_generate;
pub use prompt::run_prompt;
pub use tokens::run_tokens;
