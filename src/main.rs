use chrono::{DateTime, Utc};
use clap::Parser;
use url::Url;

use pushfeed::cli::{Cli, Commands};
use pushfeed::config::Config;
use pushfeed::domain::FeedConfig;
use pushfeed::errors::{FeederError, FeederResult};
use pushfeed::services::{CheckService, DryRunNotifier, NotificationService, Notifier};
use pushfeed::sources::RssAtomSource;
use pushfeed::storage::{CheckpointStore, JsonCheckpointStore};

fn main() {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> FeederResult<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env()?.with_data_path(cli.data);
    let store = JsonCheckpointStore::new(&config.data_path);

    match cli.command.unwrap_or(Commands::Run { dry_run: false }) {
        Commands::Run { dry_run } => cmd_run(&store, &config, dry_run),
        Commands::List => cmd_list(&store),
        Commands::Add { name, url, since } => cmd_add(&store, name, url, since),
    }
}

fn cmd_add(
    store: &JsonCheckpointStore,
    name: String,
    url: String,
    since: Option<String>,
) -> FeederResult<()> {
    Url::parse(&url).map_err(|e| FeederError::InvalidUrl(format!("{}: {}", url, e)))?;

    let last_seen = match since {
        Some(s) => DateTime::parse_from_rfc3339(&s)
            .map_err(|e| FeederError::InvalidInput(format!("--since {}: {}", s, e)))?
            .with_timezone(&Utc),
        None => Utc::now(),
    };

    let mut checkpoints = store.load_or_default()?;

    if checkpoints.contains_url(&url) {
        println!("Feed already exists: {}", url);
        return Ok(());
    }

    checkpoints.push(FeedConfig::new(name.clone(), url, last_seen));
    store.save(&checkpoints)?;

    println!("Feed added successfully!");
    println!("  Name: {}", name);
    println!("  Last seen: {}", last_seen.to_rfc3339());

    Ok(())
}

fn cmd_list(store: &JsonCheckpointStore) -> FeederResult<()> {
    let checkpoints = store.load()?;

    if checkpoints.is_empty() {
        println!("No feeds configured.");
        return Ok(());
    }

    println!("Configured feeds:\n");
    for feed in checkpoints.feeds() {
        println!("  {}", feed.name);
        println!("    URL: {}", feed.url);
        println!("    Last seen: {}", feed.last_seen.to_rfc3339());
        if !feed.pending.is_empty() {
            println!("    Pending retries: {}", feed.pending.len());
        }
        println!();
    }

    Ok(())
}

fn cmd_run(store: &JsonCheckpointStore, config: &Config, dry_run: bool) -> FeederResult<()> {
    let mut checkpoints = store.load()?;

    if checkpoints.is_empty() {
        println!("No feeds configured.");
        return Ok(());
    }

    let notifier: Box<dyn Notifier> = if dry_run {
        Box::new(DryRunNotifier)
    } else {
        Box::new(NotificationService::new(config)?)
    };

    println!("Checking {} feeds...\n", checkpoints.len());

    let service = CheckService::new(RssAtomSource::new(), notifier);
    let summary = service.check_all(&mut checkpoints);

    if dry_run {
        println!(
            "\nDry run complete. Would notify {} items.",
            summary.notified
        );
        return Ok(());
    }

    store.save(&checkpoints)?;

    println!(
        "\nChecked {} feeds. Notified {} items ({} failed, {} skipped without date, {} feeds unreachable).",
        summary.feeds_checked,
        summary.notified,
        summary.failed_deliveries,
        summary.skipped_items,
        summary.feeds_failed
    );

    Ok(())
}
