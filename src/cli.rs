use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, Subcommand, ValueEnum};
use f2c_lib::Framework;

#[derive(Parser, Debug)]
#[command(
    name = "f2c",
    version,
    about = "Extract design tokens from a Figma file and generate front-end code with Gemini"
)]
pub struct Cli {
    /// Optional TOML config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Progress on stderr and debug-level logs
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch a design and print its extracted tokens
    Tokens {
        /// Figma file key or figma.com file URL
        #[arg(long)]
        file: String,

        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Write the output to this path instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print the generation prompt without calling the model
    Prompt {
        #[arg(long)]
        file: String,

        /// html-css, react, vue or angular (defaults to the config value)
        #[arg(long, value_parser = parse_framework)]
        framework: Option<Framework>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Fetch a design, extract tokens and generate code
    Generate {
        #[arg(long)]
        file: String,

        #[arg(long, value_parser = parse_framework)]
        framework: Option<Framework>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        #[arg(long)]
        output: Option<PathBuf>,

        /// Also write the generated source to this path
        #[arg(long)]
        code_out: Option<PathBuf>,

        /// Regenerate this many extra times; the last result wins
        #[arg(long, default_value_t = 0)]
        regenerate: u32,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Pretty,
}

fn parse_framework(raw: &str) -> Result<Framework, String> {
    Framework::from_str(raw)
}

pub fn parse() -> Cli {
    Cli::parse()
}
