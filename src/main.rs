// src/main.rs
mod extractors;
mod nla;
mod storage;
mod utils;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use extractors::{ListingMarkers, PaperExtractor};
use storage::StorageManager;
use utils::AppError;

/// Download the NLA staff papers listing as JSON
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The url to scrape
    #[arg(long, default_value = nla::DEFAULT_LISTING_URL)]
    url: String,

    /// Path to save JSON to: a directory (a timestamped file name is added) or a .json file
    #[arg(long, default_value = "./")]
    outpath: PathBuf,

    /// Do not echo the JSON to the console
    #[arg(long)]
    silent: bool,

    /// Site origin prepended to each paper's relative link
    #[arg(long, default_value = nla::SITE_ORIGIN)]
    origin: String,

    /// HTTP timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Debug-level logging for this crate (ignored when RUST_LOG is set)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    // 1. Parse CLI Arguments
    let args = Args::parse();

    // 2. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging(args.verbose);
    tracing::info!("Starting scrape with args: {:?}", args);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(AppError::Storage(e)) => {
            tracing::error!("{}", e);
            let target = e
                .path()
                .map(|p| p.display().to_string())
                .unwrap_or_default();
            eprintln!("Unable to write to provided file path {}", target);
            ExitCode::from(AppError::Storage(e).exit_code())
        }
        Err(e) => {
            tracing::error!("Scrape failed: {}", e);
            eprintln!("Error: {:?}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(args: Args) -> Result<(), AppError> {
    // 3. Resolve outpath up front so a bad path is reported before fetching
    let outpath = std::path::absolute(&args.outpath).map_err(|e| {
        AppError::Config(format!("Cannot resolve outpath {}: {}", args.outpath.display(), e))
    })?;

    // 4. Initialize extractor with the site's markers
    let extractor = PaperExtractor::new(&args.origin, ListingMarkers::default())?;

    // 5. Fetch and extract
    let html = nla::client::fetch_listing(&args.url, Duration::from_secs(args.timeout_secs)).await?;
    let papers = extractor.extract_from_html(&html)?;

    // 6. Save (timestamped name is taken now), then echo
    let storage = StorageManager::new(&outpath, chrono::Local::now());
    tracing::info!("Output file: {}", storage.target().display());
    let json = storage.save_papers(&papers)?;
    if !args.silent {
        println!("{}", json);
    }

    tracing::info!("Processing finished: {} papers", papers.len());
    Ok(())
}
