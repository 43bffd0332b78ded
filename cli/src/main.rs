use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use easy_options::{OptionsError, OptionsSetup, ParseOutcome, ParserConfig};
use easy_options_core::ParsedOptions;
use tracing_subscriber::{EnvFilter, fmt};

/// Exit status for setup, tokenizer and coercion failures.
const ERROR_EXIT: u8 = 2;

/// Output format for parsed options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Json,
    Yaml,
}

#[derive(Debug, Parser)]
#[command(name = "easy-opts")]
#[command(about = "Parse script arguments against a declarative option setup")]
#[command(version)]
struct Cli {
    /// YAML or JSON file declaring the options (`.json` is read as JSON).
    #[arg(long)]
    setup: PathBuf,
    /// Description printed above the usage line; overrides the setup file.
    #[arg(long)]
    description: Option<String>,
    /// Program name for the usage line; overrides the setup file.
    #[arg(long)]
    program: Option<String>,
    /// Output format for the parsed options.
    #[arg(long, default_value = "json")]
    format: CliOutputFormat,
    /// Arguments to parse.
    #[arg(last = true)]
    args: Vec<String>,
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(OptionsError::Arguments(err)) => {
            let _ = err.print();
            ExitCode::from(ERROR_EXIT)
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(ERROR_EXIT)
        }
    }
}

/// Logs go to stderr; stdout carries the parsed options.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();
}

fn run(cli: Cli) -> Result<ExitCode, OptionsError> {
    let mut setup = OptionsSetup::load(&cli.setup)?;
    if cli.description.is_some() {
        setup.description = cli.description;
    }
    if cli.program.is_some() {
        setup.program = cli.program;
    }

    let parser = setup.build(ParserConfig::default())?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match parser.parse_with_writer(&cli.args, &mut out)? {
        ParseOutcome::Completed(options) => {
            let rendered = format_options(&options, cli.format)?;
            out.write_all(rendered.as_bytes())?;
            if !rendered.ends_with('\n') {
                out.write_all(b"\n")?;
            }
            Ok(ExitCode::SUCCESS)
        }
        outcome => Ok(ExitCode::from(outcome.exit_code() as u8)),
    }
}

fn format_options(
    options: &ParsedOptions,
    format: CliOutputFormat,
) -> Result<String, OptionsError> {
    match format {
        CliOutputFormat::Json => Ok(serde_json::to_string_pretty(options)?),
        CliOutputFormat::Yaml => Ok(serde_yaml::to_string(options)?),
    }
}
