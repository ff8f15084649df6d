mod classifier;
mod error;
mod fetcher;
mod models;
mod parser;
mod reporter;
mod user_agent;

#[cfg(test)]
mod test_support;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::fetcher::HttpFetcher;
use crate::user_agent::RandomUserAgent;

#[derive(Parser, Debug)]
#[command(version, about = "Check fake reviews on a Tokopedia product.")]
struct Cli {
    /// The link to the product
    link_product: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    match run(&cli.link_product) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(link_product: &str) -> Result<()> {
    let fetcher = HttpFetcher::new(RandomUserAgent).context("could not build HTTP client")?;

    let report = reporter::report_product(&fetcher, link_product)
        .context("could not read product info")?;
    print!("{}", report.info);

    let summary = classifier::classify_reviews(&fetcher, &report.product)
        .context("could not classify reviews")?;
    print!("{summary}");

    Ok(())
}
