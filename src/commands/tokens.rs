use std::path::PathBuf;
use std::process::ExitCode;

use f2c_lib::output::F2C_OUTPUT_VERSION;
use f2c_lib::{F2cError, F2cOutput, TokensOutput};

use crate::cli::OutputFormat;
use crate::formatting::{render_error, write_output};
use crate::pipeline::{describe, load_session, loaded};
use crate::settings::load_config;

/// Run the tokens command.
pub async fn run_tokens(
    config_path: Option<PathBuf>,
    verbose: bool,
    file: String,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> ExitCode {
    let config = match load_config(config_path.as_deref()) {
        Ok(cfg) => cfg,
        Err(err) => return render_error(err, format, output.clone()),
    };
    let session = match load_session(&config, config.framework, &file, verbose).await {
        Ok(session) => session,
        Err(err) => return render_error(err, format, output.clone()),
    };
    let design = match loaded(&session) {
        Ok(design) => design,
        Err(err) => return render_error(err, format, output.clone()),
    };

    let body = F2cOutput::Tokens(TokensOutput {
        version: F2C_OUTPUT_VERSION.to_string(),
        design: describe(design),
        summary: design.tokens.summary(),
        tokens: design.tokens.clone(),
    });
    if let Err(err) = write_output(&body, format, output.clone()) {
        return render_error(F2cError::Config(err.to_string()), format, output);
    }
    ExitCode::SUCCESS
}
