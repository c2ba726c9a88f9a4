use std::path::{Path, PathBuf};
use std::process::ExitCode;

use f2c_lib::output::F2C_OUTPUT_VERSION;
use f2c_lib::{F2cError, F2cOutput, Framework, GenerateOutput, Session, TextModel};

use crate::cli::OutputFormat;
use crate::formatting::{render_error, write_output};
use crate::pipeline::{describe, load_session, loaded, text_model};
use crate::settings::{load_config, resolve_framework};

/// Run the generate command.
#[allow(clippy::too_many_arguments)]
pub async fn run_generate(
    config_path: Option<PathBuf>,
    verbose: bool,
    file: String,
    framework: Option<Framework>,
    format: OutputFormat,
    output: Option<PathBuf>,
    code_out: Option<PathBuf>,
    regenerate: u32,
) -> ExitCode {
    let config = match load_config(config_path.as_deref()) {
        Ok(cfg) => cfg,
        Err(err) => return render_error(err, format, output.clone()),
    };
    let framework = resolve_framework(framework, &config);
    let model = match text_model(&config) {
        Ok(model) => model,
        Err(err) => return render_error(err, format, output.clone()),
    };
    let mut session = match load_session(&config, framework, &file, verbose).await {
        Ok(session) => session,
        Err(err) => return render_error(err, format, output.clone()),
    };

    let attempts = regenerate.saturating_add(1);
    let code = match generate_attempts(&mut session, model.as_ref(), attempts, verbose).await {
        Ok(code) => code,
        Err(err) => return render_error(err, format, output.clone()),
    };
    if let Some(path) = code_out.as_deref() {
        if let Err(err) = write_code(path, &code) {
            return render_error(err, format, output.clone());
        }
        if verbose {
            eprintln!("Wrote {} code to {}", framework, path.display());
        }
    }

    let design = match loaded(&session) {
        Ok(design) => design,
        Err(err) => return render_error(err, format, output.clone()),
    };
    let body = F2cOutput::Generate(GenerateOutput {
        version: F2C_OUTPUT_VERSION.to_string(),
        design: describe(design),
        framework,
        summary: design.tokens.summary(),
        attempts,
        code,
        code_path: code_out,
    });
    if let Err(err) = write_output(&body, format, output.clone()) {
        return render_error(F2cError::Config(err.to_string()), format, output);
    }
    ExitCode::SUCCESS
}

/// Generates once, then regenerates until `attempts` requests were made.
async fn generate_attempts(
    session: &mut Session,
    model: &dyn TextModel,
    attempts: u32,
    verbose: bool,
) -> Result<String, F2cError> {
    if verbose {
        eprintln!("Generating {} code…", session.framework());
    }
    session.generate(model).await?;
    for attempt in 2..=attempts {
        if verbose {
            eprintln!("Regenerating ({attempt}/{attempts})…");
        }
        session.regenerate(model).await?;
    }
    session
        .code()
        .map(str::to_string)
        .ok_or_else(|| F2cError::Generation("no code was produced".into()))
}

fn write_code(path: &Path, code: &str) -> Result<(), F2cError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, code)?;
    Ok(())
}
