use std::path::PathBuf;
use std::process::ExitCode;

use f2c_lib::output::F2C_OUTPUT_VERSION;
use f2c_lib::{build_prompt, F2cError, F2cOutput, Framework, PromptOutput};

use crate::cli::OutputFormat;
use crate::formatting::{render_error, write_output};
use crate::pipeline::{describe, load_session, loaded};
use crate::settings::{load_config, resolve_framework};

/// Run the prompt command: everything `generate` does short of calling the model.
pub async fn run_prompt(
    config_path: Option<PathBuf>,
    verbose: bool,
    file: String,
    framework: Option<Framework>,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> ExitCode {
    let config = match load_config(config_path.as_deref()) {
        Ok(cfg) => cfg,
        Err(err) => return render_error(err, format, output.clone()),
    };
    let framework = resolve_framework(framework, &config);
    let session = match load_session(&config, framework, &file, verbose).await {
        Ok(session) => session,
        Err(err) => return render_error(err, format, output.clone()),
    };
    let design = match loaded(&session) {
        Ok(design) => design,
        Err(err) => return render_error(err, format, output.clone()),
    };
    let prompt = match build_prompt(
        &design.tokens,
        design.preview_image_url.as_deref(),
        framework,
    ) {
        Ok(prompt) => prompt,
        Err(err) => return render_error(err, format, output.clone()),
    };

    let body = F2cOutput::Prompt(PromptOutput {
        version: F2C_OUTPUT_VERSION.to_string(),
        design: describe(design),
        framework,
        prompt,
    });
    if let Err(err) = write_output(&body, format, output.clone()) {
        return render_error(F2cError::Config(err.to_string()), format, output);
    }
    ExitCode::SUCCESS
}
