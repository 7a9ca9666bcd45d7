use anyhow::Context;
use kinotop_config::{resolve_config_path, Config, Credentials};
use kinotop_core::{PipelineOptions, RefreshPipeline, RefreshSummary, SnapshotWriter};
use kinotop_sources::create_sources;
use std::path::PathBuf;
use tracing::{debug, info};
use crate::exit::RunError;

/// Command-line overrides applied on top of the config file.
#[derive(Debug, Clone, Default)]
pub struct RefreshArgs {
    pub config: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub concurrency: Option<usize>,
}

pub async fn run_refresh(args: &RefreshArgs) -> Result<RefreshSummary, RunError> {
    run_refresh_with(args, |name| std::env::var(name).ok()).await
}

/// Credentials are resolved before anything else, so a missing key fails
/// the run before any config is read or any request is sent.
pub async fn run_refresh_with<F>(args: &RefreshArgs, lookup: F) -> Result<RefreshSummary, RunError>
where
    F: Fn(&str) -> Option<String>,
{
    let credentials = Credentials::from_lookup(lookup)?;
    debug!(credentials = ?credentials, "Credentials loaded");

    let config = load_config(args)?;
    let sources = create_sources(&config, &credentials).context("failed to create API clients")?;

    let writer = SnapshotWriter::new(config.output.path.clone());
    info!(output = %writer.path().display(), "Refreshing snapshot");

    let pipeline = RefreshPipeline::new(sources.listing, sources.artwork, PipelineOptions::from_config(&config));
    let summary = pipeline.run(&writer).await?;
    Ok(summary)
}

fn load_config(args: &RefreshArgs) -> Result<Config, RunError> {
    let path = resolve_config_path(args.config.as_deref());
    match &path {
        Some(path) => debug!(path = %path.display(), "Loading config file"),
        None => debug!("No config file, using defaults"),
    }

    let mut config = Config::load(path.as_deref())?;
    if let Some(output) = &args.output {
        config.output.path = output.clone();
    }
    if let Some(concurrency) = args.concurrency {
        config.enrichment.concurrency = concurrency;
    }
    config.validate()?;
    Ok(config)
}
