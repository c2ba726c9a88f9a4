mod cli;
mod commands;
mod formatting;
mod pipeline;
mod settings;

use std::process::ExitCode;

use cli::Commands;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = cli::parse();
    init_tracing(args.verbose);

    match args.command {
        Commands::Tokens {
            file,
            format,
            output,
        } => commands::run_tokens(args.config, args.verbose, file, format, output).await,
        Commands::Prompt {
            file,
            framework,
            format,
            output,
        } => {
            commands::run_prompt(args.config, args.verbose, file, framework, format, output).await
        }
        Commands::Generate {
            file,
            framework,
            format,
            output,
            code_out,
            regenerate,
        } => {
            commands::run_generate(
                args.config,
                args.verbose,
                file,
                framework,
                format,
                output,
                code_out,
                regenerate,
            )
            .await
        }
    }
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "f2c=debug,f2c_lib=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
