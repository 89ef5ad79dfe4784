mod render;

use anyhow::Result;
use clap::Parser;
use gps_exif_extractor::config::{self, OutputFormat};
use gps_exif_extractor::pipeline::Scanner;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "gps-exif-extractor",
    version,
    about = "Find JPEG images by content and print the GPS coordinates embedded in their EXIF data"
)]
struct Cli {
    /// Directory to search (default: current directory)
    #[arg(value_name = "DIR")]
    directory: Option<PathBuf>,

    /// Directory to search; takes precedence over the positional argument
    #[arg(short, long = "dir", value_name = "PATH")]
    dir: Option<PathBuf>,

    /// Abort on the first file that is not a JPEG or has no GPS data
    #[arg(short, long)]
    strict: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Worker threads (1 = sequential, 0 = one per CPU)
    #[arg(short, long, value_name = "N")]
    jobs: Option<usize>,

    /// Output results as JSON
    #[arg(long, conflicts_with = "html")]
    json: bool,

    /// Output results as an HTML table
    #[arg(long)]
    html: bool,

    /// Path to config file (default: config.json next to binary)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write a default config.json and exit
    #[arg(long)]
    init: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging before anything can emit a record. RUST_LOG overrides
    // the default; a config-file `verbose` only affects what the scanner emits.
    let log_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    let mut config = config::Config::load(cli.config.as_deref())?;
    if cli.strict {
        config.scan.strict = true;
    }
    if cli.verbose {
        config.scan.verbose = true;
    }
    if let Some(jobs) = cli.jobs {
        config.scan.jobs = jobs;
    }
    if cli.json {
        config.output.format = OutputFormat::Json;
    } else if cli.html {
        config.output.format = OutputFormat::Html;
    }

    // Handle --init
    if cli.init {
        let path = config::Config::default().save(cli.config.as_deref())?;
        println!("Default config written to {}", path.display());
        return Ok(());
    }

    let request = config.scan_request(cli.dir.or(cli.directory))?;
    log::info!("Started extraction with options: {request:?}");

    let scanner = Scanner::new(log::logger());
    let results = scanner.scan_all(&request)?;

    print!("{}", render::render(&results, config.output.format)?);
    log::info!("Done: {} image(s) with GPS data", results.len());

    Ok(())
}
