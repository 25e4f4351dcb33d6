//! Command-line arguments and their validation

use clap::{ArgAction, Parser};
use greg_core::location::GITHUB_HOST;
use greg_core::{Config, FileExtension, GregError, Location};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "greg")]
#[command(about = "Search the files of a remote git repository", long_about = None)]
pub struct Cli {
    /// Text to search for; wrap multiple words in quotes
    pub pattern: Option<String>,

    /// Git hostname
    #[arg(long, default_value = GITHUB_HOST)]
    pub host: String,

    /// Organisation name, e.g. agrski
    #[arg(long)]
    pub org: Option<String>,

    /// Repository name, e.g. greg
    #[arg(long)]
    pub repo: Option<String>,

    /// Full URL of the repository, e.g. https://github.com/agrski/greg
    #[arg(long)]
    pub url: Option<String>,

    /// Branch, tag or commit to search (default branch if omitted)
    #[arg(long)]
    pub commit: Option<String>,

    /// Comma-separated file extensions to search, e.g. md,go
    #[arg(long = "type", value_name = "EXTENSIONS")]
    pub filetype: Option<String>,

    /// Match case-insensitively
    #[arg(short, long)]
    pub ignore_case: bool,

    /// Raw access token (falls back to GITHUB_TOKEN)
    #[arg(long)]
    pub access_token: Option<String>,

    /// File containing an access token
    #[arg(long)]
    pub access_token_file: Option<PathBuf>,

    /// Disable coloured output
    #[arg(long)]
    pub no_colour: bool,

    /// Path to a TOML config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Either `--url`, or both `--org` and `--repo`, but never a mix.
    pub fn location(&self) -> greg_core::Result<Location> {
        let url = non_blank(self.url.as_deref());
        let org = non_blank(self.org.as_deref());
        let repo = non_blank(self.repo.as_deref());

        match (url, org, repo) {
            (Some(_), Some(_), _) | (Some(_), _, Some(_)) => Err(GregError::InvalidLocation(
                "cannot specify both url and org or repo".to_string(),
            )),
            (Some(url), None, None) => Location::from_url(url),
            (None, Some(org), Some(repo)) => Location::from_parts(&self.host, org, repo),
            (None, _, _) => Err(GregError::InvalidLocation(
                "must specify either url or both org and repo".to_string(),
            )),
        }
    }

    pub fn search_pattern(&self) -> greg_core::Result<String> {
        non_blank(self.pattern.as_deref())
            .map(str::to_string)
            .ok_or(GregError::MissingPattern)
    }

    /// `--type` if given, otherwise the configured list; empty means all.
    pub fn filetypes(&self, config: &Config) -> Vec<FileExtension> {
        match non_blank(self.filetype.as_deref()) {
            Some(raw) => parse_filetypes(raw),
            None => config
                .search
                .filetypes
                .iter()
                .map(|e| FileExtension::new(e))
                .filter(|e| !e.is_empty())
                .collect(),
        }
    }

    pub fn ignore_case(&self, config: &Config) -> bool {
        self.ignore_case || config.search.ignore_case
    }
}

fn parse_filetypes(raw: &str) -> Vec<FileExtension> {
    raw.split(',')
        .map(FileExtension::new)
        .filter(|e| !e.is_empty())
        .collect()
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.trim().is_empty())
}
