use std::fmt::Write as FmtWrite;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use f2c_lib::output::F2C_OUTPUT_VERSION;
use f2c_lib::{ErrorOutput, F2cError, F2cOutput};

use crate::cli::OutputFormat;

/// Colors listed in pretty output before eliding the rest.
const PRETTY_LIST_LIMIT: usize = 8;

pub fn write_output(
    body: &F2cOutput,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Json => write_json_output(body, output.as_deref())?,
        OutputFormat::Pretty => write_pretty_output(body, output.as_deref())?,
    };
    Ok(())
}

/// Prints the error envelope and returns the failure exit code.
pub fn render_error(err: F2cError, format: OutputFormat, output: Option<PathBuf>) -> ExitCode {
    tracing::debug!(error = ?err, "command failed");
    let error_payload = err.to_payload();
    let payload = F2cOutput::Error(ErrorOutput {
        version: F2C_OUTPUT_VERSION.to_string(),
        message: Some(err.to_string()),
        error: error_payload,
    });

    match format {
        OutputFormat::Json => {
            let content =
                serde_json::to_string(&payload).unwrap_or_else(|_| "{\"mode\":\"error\"}".into());
            if let Some(path) = output {
                if let Err(write_err) = std::fs::write(&path, &content) {
                    eprintln!("Failed to write error output: {}", write_err);
                    println!("{content}");
                }
            } else {
                println!("{content}");
            }
        }
        OutputFormat::Pretty => {
            if let Err(write_err) = write_pretty_output(&payload, output.as_deref()) {
                eprintln!("Failed to write error output: {}", write_err);
            }
        }
    };

    ExitCode::from(2)
}

fn write_json_output(
    body: &F2cOutput,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let content = serde_json::to_string(body)?;
    if let Some(path) = output {
        std::fs::write(path, content)?;
    } else {
        println!("{content}");
    }
    Ok(())
}

fn write_pretty_output(body: &F2cOutput, output: Option<&Path>) -> io::Result<()> {
    let use_human = output.is_none() && io::stdout().is_terminal();

    if use_human {
        println!("{}", format_pretty(body, true));
        return Ok(());
    }

    // Files and pipes keep the JSON shape.
    let content =
        serde_json::to_string_pretty(body).unwrap_or_else(|_| "{\"mode\":\"error\"}".to_string());
    if let Some(path) = output {
        std::fs::write(path, &content)?;
    } else {
        println!("{content}");
    }
    Ok(())
}

pub fn format_pretty(body: &F2cOutput, colorize: bool) -> String {
    let mut buf = String::new();
    match body {
        F2cOutput::Tokens(out) => {
            let header = color("[TOKENS]", "36", colorize);
            writeln!(buf, "{} {} ({})", header, out.design.name, out.design.file_key).ok();
            let s = &out.summary;
            writeln!(
                buf,
                "colors={} fonts={} textStyles={} spacing={} components={} layout={}",
                s.colors,
                s.fonts,
                s.text_styles,
                s.spacing,
                s.components,
                if s.has_layout { "yes" } else { "no" }
            )
            .ok();
            if !out.tokens.colors.is_empty() {
                writeln!(buf, "Colors:").ok();
                for c in out.tokens.colors.iter().take(PRETTY_LIST_LIMIT) {
                    writeln!(buf, "- {:10} {}", c.hex, c.path).ok();
                }
                let rest = out.tokens.colors.len().saturating_sub(PRETTY_LIST_LIMIT);
                if rest > 0 {
                    writeln!(buf, "  … {rest} more").ok();
                }
            }
            if !out.tokens.fonts.is_empty() {
                writeln!(buf, "Fonts: {}", out.tokens.fonts.join(", ")).ok();
            }
            if let Some(layout) = &out.tokens.layout {
                writeln!(buf, "Layout: {:?} at {}", layout.mode, layout.properties.path).ok();
            }
            writeln!(buf, "Preview: {}", out.design.embed_url).ok();
        }
        F2cOutput::Prompt(out) => {
            let header = color("[PROMPT]", "34", colorize);
            writeln!(buf, "{} {} for {}", header, out.framework, out.design.name).ok();
            writeln!(buf).ok();
            buf.push_str(&out.prompt);
        }
        F2cOutput::Generate(out) => {
            let header = color("[GENERATE]", "32", colorize);
            writeln!(
                buf,
                "{} {} code for {} ({} attempt{})",
                header,
                out.framework,
                out.design.name,
                out.attempts,
                if out.attempts == 1 { "" } else { "s" }
            )
            .ok();
            match &out.code_path {
                Some(path) => {
                    writeln!(buf, "Written to {}", path.display()).ok();
                }
                None => {
                    writeln!(buf).ok();
                    writeln!(buf, "{}", out.code).ok();
                }
            }
        }
        F2cOutput::Error(out) => {
            let header = color("[ERROR]", "31", colorize);
            let message = out
                .message
                .as_deref()
                .unwrap_or_else(|| out.error.message.as_str());
            writeln!(buf, "{} {}", header, message).ok();
            if let Some(remediation) = &out.error.remediation {
                writeln!(buf, "Hint: {}", remediation).ok();
            }
        }
    }
    buf
}

fn color(text: &str, code: &str, colorize: bool) -> String {
    if colorize {
        format!("\x1b[{}m{}\x1b[0m", code, text)
    } else {
        text.to_string()
    }
}
