use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use client::SearchClient;
use config::Config;
use dispatch::{Dispatcher, MemorySink, Notifier, SearchForm, SearchOutcome};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "docsearch", about = "docsearch - client for the document retrieval service")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Html,
    Text,
}

impl From<Format> for render::Format {
    fn from(f: Format) -> Self {
        match f {
            Format::Html => render::Format::Html,
            Format::Text => render::Format::Text,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Search documents
    Search {
        /// Search query
        query: Vec<String>,
        /// Maximum number of results (blank uses the configured default)
        #[arg(short = 'k', long)]
        top_k: Option<String>,
        /// Score cutoff (blank uses the configured default)
        #[arg(short, long)]
        threshold: Option<String>,
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Html)]
        format: Format,
    },

    /// Check that the service is up
    Health,

    /// Ask the service to scrape and index fresh documents
    Scrape,

    /// Print the effective configuration
    Config,
}

struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn alert(&self, message: &str) {
        eprintln!("{}", message);
    }
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "docsearch=info,client=info,dispatch=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::load_with_env()?;
    tracing::debug!(base_url = %config.client.base_url, user_id = %config.client.user_id, "loaded configuration");

    match cli.command {
        Command::Search {
            query,
            top_k,
            threshold,
            format,
        } => cmd_search(&config, query, top_k, threshold, format),
        Command::Health => cmd_health(&config).map(|_| ExitCode::SUCCESS),
        Command::Scrape => cmd_scrape(&config).map(|_| ExitCode::SUCCESS),
        Command::Config => {
            print!("{}", config.to_toml()?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Rejected input exits with 2 (the alert is already on stderr), a failed
/// request with 1 (the error is already in the rendered output).
fn cmd_search(
    config: &Config,
    query: Vec<String>,
    top_k: Option<String>,
    threshold: Option<String>,
    format: Format,
) -> Result<ExitCode> {
    let form = SearchForm::new(
        query.join(" "),
        top_k.unwrap_or_default(),
        threshold.unwrap_or_default(),
    );
    let client = SearchClient::new(config.client.clone())?;
    let dispatcher = Dispatcher::new(client, config.search.clone()).with_format(format.into());
    let sink = MemorySink::new();

    let code = match dispatcher.perform_search(&form, &sink, &StderrNotifier) {
        SearchOutcome::Rejected { .. } => return Ok(ExitCode::from(2)),
        SearchOutcome::Failed { .. } => ExitCode::FAILURE,
        SearchOutcome::Rendered { .. } | SearchOutcome::Superseded => ExitCode::SUCCESS,
    };

    let output = sink.html();
    if output.ends_with('\n') {
        print!("{}", output);
    } else {
        println!("{}", output);
    }
    Ok(code)
}

fn cmd_health(config: &Config) -> Result<()> {
    let client = SearchClient::new(config.client.clone())?;
    let health = client.health()?;
    println!("{}: {}", config.client.base_url, health.status);
    if !health.is_healthy() {
        anyhow::bail!("service reported status {:?}", health.status);
    }
    Ok(())
}

fn cmd_scrape(config: &Config) -> Result<()> {
    let client = SearchClient::new(config.client.clone())?;
    let ack = client.trigger_scrape()?;
    println!("{}", ack.message);
    Ok(())
}
