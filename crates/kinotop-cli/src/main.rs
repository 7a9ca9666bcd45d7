use clap::{ArgAction, Parser};
use color_eyre::eyre::Report;
use commands::refresh::{run_refresh, RefreshArgs};
use exit::EXIT_PIPELINE_ERROR;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;

mod commands;
mod exit;
mod logging;

#[derive(Parser)]
#[command(name = "kinotop")]
#[command(about = "Rebuild the Kinopoisk top movies and series snapshot")]
#[command(long_about = "Fetch the Kinopoisk top 500 movies and top 250 series, fill in missing TMDB ids and posters, and write one JSON snapshot. Requires KINOPOISK_API_KEY and TMDB_API_TOKEN in the environment.")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,

    /// Config file (defaults to $KINOTOP_CONFIG, then the user config dir)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Where to write the snapshot (overrides output.path)
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Maximum TMDB requests in flight (overrides enrichment.concurrency)
    #[arg(long, value_name = "N")]
    concurrency: Option<usize>,

    /// Write logs to a daily-rotated file instead of stderr
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn refresh_args(&self) -> RefreshArgs {
        RefreshArgs {
            config: self.config.clone(),
            output: self.output.clone(),
            concurrency: self.concurrency,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = color_eyre::install() {
        eprintln!("Failed to install error reporter: {}", e);
    }

    let cli = Cli::parse();

    if let Err(e) = logging::init_logging(cli.verbose, cli.quiet, cli.log_file.clone()) {
        eprintln!("Failed to initialise logging: {:#}", e);
        return ExitCode::from(EXIT_PIPELINE_ERROR);
    }

    match run_refresh(&cli.refresh_args()).await {
        Ok(summary) => {
            summary.log();
            ExitCode::SUCCESS
        }
        Err(e) => {
            let code = e.exit_code();
            error!(exit_code = code, error = %e, "Refresh failed");
            eprintln!("Error: {:?}", Report::new(e));
            ExitCode::from(code)
        }
    }
}
