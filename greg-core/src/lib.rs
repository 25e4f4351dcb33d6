//! Greg Core - Search the file tree of a remote git repository
//!
//! This library walks a remote repository tree in the background and feeds
//! each discovered file through an exact-substring match engine.

pub mod config;
pub mod error;
pub mod fetch;
pub mod location;
pub mod matching;
pub mod types;

pub use config::Config;
pub use error::GregError;
pub use fetch::github::{GraphQlClient, TreeEntry, TreeSource};
pub use fetch::{Fetcher, FetcherState, TreeFetcher};
pub use location::{HostName, Location, OrganisationName, RepositoryName};
pub use matching::{
    filter_filetype, normalise_extension, ExactMatcher, FilteringMatcher, Match, MatchPosition,
    Matcher,
};
pub use types::{EntryKind, FileContents, FileExtension, FileInfo, FileMetadata, QueryParams};

/// Result type alias for greg operations
pub type Result<T> = std::result::Result<T, GregError>;
