use std::process::ExitCode;

use clap::Parser;

mod config;
mod extract;
mod models;
mod pipeline;
mod snapshot;

use config::Config;
use extract::{FileSource, HttpSource};
use pipeline::{run_pipeline, PipelineError};
use snapshot::FileSink;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = Config::parse();

    match run(&config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, url = %config.url, "error scraping site");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: &Config) -> Result<(), PipelineError> {
    let sink = FileSink::new(&config.output);

    let snapshot = match &config.from_file {
        Some(path) => run_pipeline(&FileSource::new(path), &sink, &config.url).await?,
        None => {
            let source = HttpSource::new(&config.user_agent, config.timeout())?;
            run_pipeline(&source, &sink, &config.url).await?
        }
    };

    tracing::info!(
        path = %sink.path().display(),
        headings = snapshot.headings.len(),
        paragraphs = snapshot.paragraphs.len(),
        images = snapshot.images.len(),
        "content scraped and saved to {}",
        sink.path().display()
    );
    Ok(())
}
