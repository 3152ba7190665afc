use clap::{ Parser, Subcommand };
use std::path::PathBuf;

pub mod commands;
pub mod report;
pub mod ui;

#[derive(Parser)]
#[command(
    name = "mcftest",
    about = "Test mu-calculus properties against annotated example traces using mCRL2",
    version,
    long_about = None
)]
pub struct McfTestCli {
    /// Sets the log level (error, warn, info, debug, trace)
    #[arg(short, long, global = true, default_value = "warn")]
    pub log_level: String,

    /// Path to configuration file (defaults to ./mcftest.yaml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(long, global = true, default_value = "text")]
    pub output_format: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the annotated tests
    Run {
        /// A single .mcf or .mcf-pc file; all files in the properties directory when omitted
        file: Option<PathBuf>,

        /// Maximum number of concurrent checker invocations
        #[arg(short, long)]
        jobs: Option<usize>,

        /// Behavioral template the traces are spliced into
        #[arg(short, long)]
        template: Option<PathBuf>,

        /// Timeout in seconds for each tool invocation
        #[arg(long)]
        timeout: Option<u64>,

        /// Do not show a progress bar
        #[arg(long, default_value = "false")]
        no_progress: bool,
    },

    /// List the test cases that would run, without running them
    List {
        /// A single .mcf or .mcf-pc file; all files in the properties directory when omitted
        file: Option<PathBuf>,
    },

    /// Check that the mCRL2 tools can be found and started
    Check,
}

/// How reports are written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

pub fn parse_output_format(format: &str) -> anyhow::Result<OutputFormat> {
    match format.to_lowercase().as_str() {
        "text" => Ok(OutputFormat::Text),
        "json" => Ok(OutputFormat::Json),
        _ => Err(anyhow::anyhow!("Unsupported output format: {}", format)),
    }
}
