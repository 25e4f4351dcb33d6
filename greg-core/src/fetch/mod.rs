//! Remote tree fetching: a background breadth-first walk streaming files to the caller.

pub mod github;
mod tree;

pub use tree::{FetcherState, TreeFetcher};

use crate::types::FileInfo;

/// Capacity of the pending-directory queue
pub const DEFAULT_WORK_QUEUE_CAPACITY: usize = 50_000;
/// Capacity of the fetched-file queue between worker and consumer
pub const DEFAULT_RESULT_QUEUE_CAPACITY: usize = 100;

/// A single-use source of files.
///
/// `start` may be called once. `next_file` blocks until a file is available
/// and returns `None` once the stream has ended, whether it was exhausted,
/// failed or was stopped. `stop` is safe to call at any time.
pub trait Fetcher {
    fn start(&mut self) -> crate::Result<()>;
    fn stop(&mut self) -> crate::Result<()>;
    fn next_file(&mut self) -> Option<FileInfo>;
}
