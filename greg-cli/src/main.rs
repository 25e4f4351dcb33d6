//! Greg CLI - search the files of a remote git repository

mod args;
mod auth;
mod console;

use args::Cli;
use clap::Parser;
use colored::Colorize;
use console::Console;
use greg_core::{Config, Fetcher, FilteringMatcher, GraphQlClient, Matcher, QueryParams, TreeFetcher};
use std::path::Path;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red(), e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr) // stdout carries results only
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn load_config(path: Option<&Path>) -> greg_core::Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None => Ok(Config::default()),
    }
}

fn run(cli: Cli) -> greg_core::Result<()> {
    let config = load_config(cli.config.as_deref())?;

    let location = cli.location()?;
    location.ensure_supported()?;
    let pattern = cli.search_pattern()?;
    let token = auth::resolve_token(
        cli.access_token.as_deref(),
        cli.access_token_file.as_deref(),
        std::env::var(auth::TOKEN_ENV).ok(),
    )?;
    let filetypes = cli.filetypes(&config);
    let matcher = FilteringMatcher::new(filetypes, cli.ignore_case(&config));
    debug!(filetypes = ?matcher.filetypes(), "configured matcher");

    let client = GraphQlClient::from_config(&config, &token)?;
    let params = QueryParams::new(location.organisation.as_str(), location.repository.as_str())
        .with_commitish(cli.commit.clone().unwrap_or_default());
    let mut fetcher = TreeFetcher::with_config(client, params, &config.fetch);

    fetcher.start()?;
    eprintln!("Searching for {} in {}", pattern.bold(), location.uri());

    let stdout = std::io::stdout();
    let mut console = Console::new(stdout.lock(), !cli.no_colour);
    let mut files_searched = 0usize;
    let mut files_matched = 0usize;

    while let Some(file) = fetcher.next_file() {
        files_searched += 1;
        let Some(found) = matcher.find(&pattern, &file) else {
            continue;
        };
        files_matched += 1;

        if let Err(e) = console.write(&file, &found) {
            fetcher.stop()?;
            // Reader went away (e.g. piped into `head`)
            if e.kind() == std::io::ErrorKind::BrokenPipe {
                return Ok(());
            }
            return Err(e.into());
        }
    }

    fetcher.stop()?;
    info!(files_searched, files_matched, "search finished");
    Ok(())
}
