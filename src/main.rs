//! hnsearch CLI
//!
//! Command-line interface for searching Hacker News stories.
//! Runs the terminal UI by default; `search` does a single fetch and prints.

use clap::{Parser, Subcommand};
use console::style;
use hnsearch::logging::{self, LogConfig};
use hnsearch::{AppConfig, FileStore, HnSearchError, KeyValueStore, SearchSession, Story};
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// hnsearch - Hacker News story search
///
/// Queries the Algolia HN search API and remembers the last search term
/// between runs.
#[derive(Parser)]
#[command(name = "hnsearch")]
#[command(version)]
#[command(about = "Hacker News story search", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Key/value file holding the last search term
    #[arg(long, env = "HNSEARCH_STORE", global = true)]
    store: Option<PathBuf>,

    /// Query URL prefix; the search term is appended verbatim
    #[arg(long, env = "HNSEARCH_ENDPOINT", global = true)]
    endpoint: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive terminal UI (default)
    Tui,

    /// Run one search and print the results
    Search {
        /// Search term; uses the stored term when omitted
        #[arg(allow_hyphen_values = true)]
        term: Option<String>,

        /// Print the stories as JSON
        #[arg(long)]
        json: bool,

        /// Maximum results to print
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Inspect or change the persisted search term
    Store {
        #[command(subcommand)]
        action: StoreAction,
    },
}

#[derive(Subcommand)]
enum StoreAction {
    /// Print the stored term
    Get,
    /// Replace the stored term
    Set {
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Forget the stored term
    Clear,
}

impl Cli {
    fn config(&self) -> AppConfig {
        let mut config = AppConfig::from_env();
        if let Some(store) = &self.store {
            config.store_path = store.clone();
        }
        if let Some(endpoint) = &self.endpoint {
            config.endpoint = endpoint.clone();
        }
        if let Some(secs) = self.timeout {
            config.request_timeout = Duration::from_secs(secs);
        }
        config
    }
}

fn main() {
    let cli = Cli::parse();
    let config = cli.config();

    let log_config = match cli.command {
        None | Some(Commands::Tui) => LogConfig::file(),
        Some(_) => LogConfig::stderr(),
    }
    .with_verbosity(cli.verbose);

    if let Err(e) = logging::init(&log_config) {
        eprintln!("{} {}", style("Warning:").yellow().bold(), e);
    }
    tracing::info!(version = hnsearch::VERSION, "hnsearch starting up");

    let result = match cli.command {
        None | Some(Commands::Tui) => hnsearch::tui::run(&config),

        Some(Commands::Search { term, json, limit }) => {
            cmd_search(&config, term.as_deref(), json, limit)
        }

        Some(Commands::Store { action }) => cmd_store(&config, action),
    };

    if let Err(e) = result {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }
}

/// Search command implementation
fn cmd_search(
    config: &AppConfig,
    term: Option<&str>,
    json: bool,
    limit: usize,
) -> hnsearch::Result<()> {
    let (store, client) = config.open()?;
    let mut session = SearchSession::new(store, config, client);

    let seq = match term {
        Some(term) => {
            session.set_term(term);
            session.submit()
        }
        None => session.start(),
    };
    if seq.is_none() {
        return Err(HnSearchError::EmptyTerm);
    }

    let start = Instant::now();
    let spinner = if json {
        ProgressBar::hidden()
    } else {
        ProgressBar::new_spinner()
    };
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!("Searching for '{}'", session.term()));
    spinner.enable_steady_tick(Duration::from_millis(80));

    let waited = session.wait(config.request_timeout + Duration::from_secs(5));
    spinner.finish_and_clear();
    waited?;

    let stories = session.stories();
    if stories.is_error {
        return Err(HnSearchError::FetchFailed);
    }

    let shown = &stories.data[..stories.data.len().min(limit)];

    if json {
        println!("{}", serde_json::to_string_pretty(shown)?);
        return Ok(());
    }

    println!(
        "{} {} stories for '{}' in {}",
        style("✓").green().bold(),
        style(stories.data.len()).green(),
        style(session.term()).yellow(),
        style(HumanDuration(start.elapsed())).cyan()
    );
    println!();

    let now = chrono::Utc::now();
    for (i, story) in shown.iter().enumerate() {
        print_story(i, story, now);
    }

    Ok(())
}

fn print_story(index: usize, story: &Story, now: chrono::DateTime<chrono::Utc>) {
    let domain = story
        .domain()
        .map(|d| format!(" ({})", d))
        .unwrap_or_default();
    println!(
        "  {} {}{}",
        style(format!("{:3}.", index + 1)).dim(),
        style(&story.title).bold(),
        style(domain).dim()
    );
    println!(
        "       {} points by {} {} ago | {} comments",
        style(hnsearch::format_count(story.points)).yellow(),
        style(&story.author).cyan(),
        hnsearch::format_age(story.created_at, now),
        hnsearch::format_count(story.num_comments)
    );
    println!("       {}", style(story.link()).underlined());
}

/// Store command implementation
fn cmd_store(config: &AppConfig, action: StoreAction) -> hnsearch::Result<()> {
    let store = FileStore::open(&config.store_path)?;
    let key = config.storage_key.as_str();

    match action {
        StoreAction::Get => match store.get(key) {
            Some(value) => println!("{}", value),
            None => println!(
                "{} (default: {})",
                style("not set").dim(),
                style(&config.default_term).yellow()
            ),
        },
        StoreAction::Set { value } => {
            store.set(key, &value);
            println!(
                "{} {} = '{}'",
                style("✓").green().bold(),
                key,
                style(&value).yellow()
            );
        }
        StoreAction::Clear => {
            store.remove(key);
            println!("{} {} cleared", style("✓").green().bold(), key);
        }
    }

    tracing::debug!(path = %store.path().display(), "store command done");
    Ok(())
}
