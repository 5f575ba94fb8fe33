//! Media Archiver CLI
//!
//! Local execution entry point.

use std::path::PathBuf;

use archiver::{
    error::Result,
    models::Config,
    pipeline,
    services::HttpFetcher,
    storage::Ledger,
    utils::{Logger, http},
};
use clap::{Parser, Subcommand};

/// Media Archiver - incremental image archive for a media-search API
#[derive(Parser, Debug)]
#[command(name = "archiver", version, about = "Incremental media search archiver")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "archiver.toml", global = true)]
    config: PathBuf,

    /// Archive root directory (overrides `archive.root`)
    #[arg(short, long, global = true)]
    root: Option<PathBuf>,

    /// Search term; repeat to sweep several (overrides `search.terms`)
    #[arg(short, long = "term", global = true)]
    terms: Vec<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sweep every term in base and keyword mode (default)
    Run,

    /// Validate configuration
    Validate,

    /// Show ledger statistics
    Info,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool, level: &str) {
    let level = if verbose { "debug" } else { level };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let (mut config, load_error) = match Config::load(&cli.config) {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };

    init_logging(cli.verbose, &config.logging.level);
    let log = Logger::default();

    if let Some(e) = load_error {
        log.warn(format!("{e}. Using defaults."));
    } else {
        log.info(format!("Loaded configuration from {}", cli.config.display()));
    }

    if let Some(root) = cli.root {
        config.archive.root = root;
    }
    if !cli.terms.is_empty() {
        config.search.terms = cli.terms;
    }

    match cli.command.unwrap_or(Command::Run) {
        Command::Run => {
            if let Err(e) = config.validate() {
                log.error(format!("Config validation failed: {e}"));
                return Err(e);
            }

            log.header("Media archiver starting");
            log.info(format!("Archive root: {}", config.archive.root.display()));

            let client = http::create_client(&config.crawler)?;
            let fetcher = HttpFetcher::new(client, log.scoped("http"));

            let stats = match pipeline::run_archiver(&config, &fetcher, &log).await {
                Ok(stats) => stats,
                Err(e) => {
                    log.error(format!("Run aborted: {e}"));
                    return Err(e);
                }
            };

            log.summary(
                "Archive run complete",
                &[
                    ("Pages", stats.pages.to_string()),
                    ("Archived", stats.archived.to_string()),
                    ("Failed", stats.failed.to_string()),
                    ("Skipped", stats.skipped.to_string()),
                ],
            );
        }

        Command::Validate => {
            log.info("Validating configuration...");

            if let Err(e) = config.validate() {
                log.error(format!("Config validation failed: {e}"));
                return Err(e);
            }
            log.info(format!(
                "✓ Config OK ({} terms, archive at {})",
                config.search.terms.len(),
                config.archive.root.display()
            ));
        }

        Command::Info => {
            let ledger = Ledger::new(config.ledger_path(), config.archive.match_mode);
            log.info(format!("Ledger: {}", ledger.path().display()));

            let stats = ledger.stats().await?;
            if stats.total == 0 {
                log.info("No downloads recorded yet.");
                return Ok(());
            }

            let mut items = vec![
                ("Records", stats.total.to_string()),
                ("Succeeded", stats.succeeded.to_string()),
                ("Failed", stats.failed.to_string()),
                ("No link", stats.without_link.to_string()),
            ];
            items.extend(
                stats
                    .by_kind
                    .iter()
                    .map(|(kind, count)| (kind.label(), count.to_string())),
            );
            log.summary("Ledger", &items);
        }
    }

    Ok(())
}
