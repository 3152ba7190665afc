use clap::Parser;
use log::{ debug, info };
use std::process::ExitCode;

use mcftest::cli::{ self, Commands, McfTestCli };
use mcftest::config::HarnessConfig;

/// Every case matched
const EXIT_SUCCESS: u8 = 0;
/// A case failed or a file could not be loaded
const EXIT_FAILURE: u8 = 1;
/// Bad invocation or configuration
const EXIT_USAGE: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    // Parse the command line arguments
    let cli = McfTestCli::parse();

    // Setup logging
    setup_logging(&cli.log_level);

    match dotenv::dotenv() {
        Ok(path) => debug!("Loaded environment from {}", path.display()),
        Err(e) => debug!("No .env file loaded: {}", e),
    }

    match run(&cli).await {
        Ok(true) => ExitCode::from(EXIT_SUCCESS),
        Ok(false) => ExitCode::from(EXIT_FAILURE),
        Err(e) => {
            cli::ui::print_error(&format!("{:#}", e));
            ExitCode::from(EXIT_USAGE)
        }
    }
}

async fn run(cli: &McfTestCli) -> anyhow::Result<bool> {
    let format = cli::parse_output_format(&cli.output_format)?;
    let mut config = HarnessConfig::load(cli.config.as_deref())?;

    match &cli.command {
        Commands::Run { file, jobs, template, timeout, no_progress } => {
            if let Some(jobs) = jobs {
                config.jobs = Some(*jobs);
            }
            if let Some(template) = template {
                config.template = template.clone();
            }
            if let Some(timeout) = timeout {
                config.tools.timeout_secs = *timeout;
            }
            config.validate()?;

            cli::commands::run::execute(&config, file.as_deref(), format, !*no_progress).await
        }

        Commands::List { file } => cli::commands::list::execute(&config, file.as_deref(), format),

        Commands::Check => cli::commands::check::execute(&config).await,
    }
}

fn setup_logging(log_level: &str) {
    // Set up the logger based on the log level
    let level = match log_level.to_lowercase().as_str() {
        "trace" => log::LevelFilter::Trace,
        "debug" => log::LevelFilter::Debug,
        "info" => log::LevelFilter::Info,
        "warn" => log::LevelFilter::Warn,
        "error" => log::LevelFilter::Error,
        _ => log::LevelFilter::Warn,
    };

    env_logger::Builder::new().filter_level(level).init();

    info!("Logger initialized with level: {}", log_level);
}
