//! Title Finder main entry point
//!
//! This is the command-line interface: it reads the URL list, runs the batch
//! and writes one report line per URL.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use title_finder::config::{load_config_with_hash, validate, Config};
use title_finder::crawler::Coordinator;
use title_finder::input::read_url_list;
use title_finder::output::{log_statistics, open_output, write_report, BatchStatistics};
use tracing_subscriber::EnvFilter;

/// Title Finder: fetch the HTML title of every URL in a list
///
/// URLs are fetched concurrently; results are reported in input order as
/// `[+] <url>: <title>` or `[-] <url>: <error>`. TLS certificates are NOT
/// verified unless --verify-tls is given.
#[derive(Parser, Debug)]
#[command(name = "title-finder")]
#[command(version = "1.0.0")]
#[command(about = "Fetch page titles for a list of URLs", long_about = None)]
#[command(arg_required_else_help = true)]
struct Cli {
    /// Path to the input file containing URLs, one per line
    #[arg(short = 'l', long = "list", value_name = "FILE")]
    list: PathBuf,

    /// Path to the output file; results go to the console if omitted
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Proxy for all requests, [http://]host:port (http:// is assumed)
    #[arg(short, long, value_name = "PROXY")]
    proxy: Option<String>,

    /// Number of concurrent workers (default 10, max 100)
    #[arg(short, long, value_name = "N")]
    threads: Option<usize>,

    /// Path to a TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Verify TLS certificates instead of accepting any certificate
    #[arg(long)]
    verify_tls: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error log output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = load_configuration(&cli)?;

    let urls = read_url_list(&cli.list)
        .with_context(|| format!("Failed to open file: {}", cli.list.display()))?;
    tracing::info!("Loaded {} URLs from {}", urls.len(), cli.list.display());

    let coordinator = Coordinator::new(&config).context("Failed to set up the HTTP client")?;

    let mut output = open_output(cli.output.as_deref()).with_context(|| {
        let target = cli
            .output
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "stdout".to_string());
        format!("Failed to create output file: {}", target)
    })?;

    let results = coordinator.run(urls).await?;

    write_report(&mut output, &results).context("Failed to write results")?;
    if let Some(path) = &cli.output {
        tracing::info!("Results written to {}", path.display());
    }

    log_statistics(&BatchStatistics::from_results(&results));

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr; stdout is reserved for the report.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("title_finder=info,warn"),
            1 => EnvFilter::new("title_finder=debug,info"),
            2 => EnvFilter::new("title_finder=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the config file (if any), applies command-line overrides and
/// validates the result, proxy included
fn load_configuration(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path).with_context(|| {
                format!("Failed to load configuration from {}", path.display())
            })?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    apply_overrides(&mut config, cli);
    validate(&config).context("Invalid settings")?;

    Ok(config)
}

/// Command-line flags take precedence over the config file
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(proxy) = &cli.proxy {
        config.proxy = Some(proxy.clone());
    }

    if let Some(threads) = cli.threads {
        config.pool.workers = threads;
    }

    if let Some(timeout) = cli.timeout {
        config.fetcher.request_timeout = timeout;
        config.fetcher.connect_timeout = config.fetcher.connect_timeout.min(timeout);
    }

    if cli.verify_tls {
        config.fetcher.accept_invalid_certs = false;
    }
}
