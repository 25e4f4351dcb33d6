//! Breadth-first tree fetcher driven by a single worker thread.

use super::github::{TreeEntry, TreeSource};
use super::{Fetcher, DEFAULT_RESULT_QUEUE_CAPACITY, DEFAULT_WORK_QUEUE_CAPACITY};
use crate::config::FetchConfig;
use crate::error::GregError;
use crate::types::{EntryKind, FileInfo, QueryParams};
use crossbeam_channel::{select, Receiver, Sender, TryRecvError, TrySendError};
use std::thread::JoinHandle;
use tracing::{debug, error, warn};

/// Lifecycle of a [`TreeFetcher`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetcherState {
    Created,
    Started,
    Stopped,
}

enum State<S> {
    Created {
        source: S,
        params: QueryParams,
    },
    Started {
        results: Receiver<FileInfo>,
        // Dropping this sender is the cancellation signal
        cancel: Sender<()>,
        worker: JoinHandle<()>,
    },
    Stopped,
}

/// Streams every file reachable from the repository root at one commitish.
pub struct TreeFetcher<S: TreeSource> {
    state: State<S>,
    work_queue_capacity: usize,
    result_queue_capacity: usize,
}

impl<S: TreeSource> TreeFetcher<S> {
    pub fn new(source: S, params: QueryParams) -> Self {
        Self {
            state: State::Created { source, params },
            work_queue_capacity: DEFAULT_WORK_QUEUE_CAPACITY,
            result_queue_capacity: DEFAULT_RESULT_QUEUE_CAPACITY,
        }
    }

    pub fn with_config(source: S, params: QueryParams, config: &FetchConfig) -> Self {
        Self::new(source, params)
            .with_capacities(config.work_queue_capacity, config.result_queue_capacity)
    }

    /// Override queue capacities; zero is raised to one.
    pub fn with_capacities(mut self, work_queue: usize, result_queue: usize) -> Self {
        self.work_queue_capacity = work_queue.max(1);
        self.result_queue_capacity = result_queue.max(1);
        self
    }

    pub fn state(&self) -> FetcherState {
        match self.state {
            State::Created { .. } => FetcherState::Created,
            State::Started { .. } => FetcherState::Started,
            State::Stopped => FetcherState::Stopped,
        }
    }

    /// Cancels and joins the worker. Never fails, so `Drop` can use it.
    fn shutdown(&mut self) {
        if let State::Started {
            results,
            cancel,
            worker,
        } = std::mem::replace(&mut self.state, State::Stopped)
        {
            drop(cancel);
            // Unblocks a worker waiting on a full result queue
            drop(results);
            if worker.join().is_err() {
                warn!("fetch worker panicked");
            }
        }
    }
}

impl<S: TreeSource> Fetcher for TreeFetcher<S> {
    fn start(&mut self) -> crate::Result<()> {
        let (source, mut params) = match std::mem::replace(&mut self.state, State::Stopped) {
            State::Created { source, params } => (source, params),
            started @ State::Started { .. } => {
                self.state = started;
                return Err(GregError::AlreadyStarted);
            }
            State::Stopped => return Err(GregError::AlreadyStopped),
        };

        if !params.has_commitish() {
            params.commitish = source.default_branch(&params.repo_owner, &params.repo_name)?;
            debug!(
                owner = %params.repo_owner,
                repo = %params.repo_name,
                branch = %params.commitish,
                "resolved default branch"
            );
        }

        let (pending_tx, pending_rx) = crossbeam_channel::bounded(self.work_queue_capacity);
        let (results_tx, results_rx) = crossbeam_channel::bounded(self.result_queue_capacity);
        let (cancel_tx, cancel_rx) = crossbeam_channel::bounded(0);

        pending_tx
            .try_send(params.path_prefix.clone())
            .map_err(|_| GregError::WorkQueueFull {
                capacity: self.work_queue_capacity,
                path: params.path_prefix.clone(),
            })?;

        let worker = Worker {
            source,
            params,
            pending_tx,
            pending_rx,
            results: results_tx,
            cancel: cancel_rx,
        };
        let handle = std::thread::Builder::new()
            .name("greg-fetch".to_string())
            .spawn(move || worker.run())?;

        self.state = State::Started {
            results: results_rx,
            cancel: cancel_tx,
            worker: handle,
        };
        Ok(())
    }

    fn stop(&mut self) -> crate::Result<()> {
        self.shutdown();
        Ok(())
    }

    fn next_file(&mut self) -> Option<FileInfo> {
        match &self.state {
            State::Started { results, .. } => results.recv().ok(),
            State::Created { .. } | State::Stopped => None,
        }
    }
}

impl<S: TreeSource> Drop for TreeFetcher<S> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Whether the worker should keep expanding directories
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Flow {
    Continue,
    Cancelled,
}

struct Worker<S> {
    source: S,
    params: QueryParams,
    pending_tx: Sender<String>,
    pending_rx: Receiver<String>,
    results: Sender<FileInfo>,
    cancel: Receiver<()>,
}

impl<S: TreeSource> Worker<S> {
    /// Runs until the pending queue drains, a query fails or cancellation fires.
    /// Returning drops the queues, which ends the consumer's stream.
    fn run(mut self) {
        loop {
            if is_cancelled(&self.cancel) {
                debug!("fetch cancelled");
                return;
            }

            // Only this worker enqueues directories, so empty means done
            let path = match self.pending_rx.try_recv() {
                Ok(path) => path,
                Err(_) => {
                    debug!("traversal exhausted");
                    return;
                }
            };

            self.params.path_prefix = path;
            let entries = match self.source.children(&self.params) {
                Ok(entries) => entries,
                Err(e) => {
                    error!(path = %self.params.path_prefix, error = %e, "tree query failed");
                    return;
                }
            };
            debug!(path = %self.params.path_prefix, entries = entries.len(), "expanded directory");

            match expand_entries(
                &self.params.path_prefix,
                entries,
                &self.results,
                &self.pending_tx,
                &self.cancel,
            ) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Cancelled) => {
                    debug!("fetch cancelled");
                    return;
                }
                Err(e) => {
                    error!(error = %e, "traversal aborted");
                    return;
                }
            }
        }
    }
}

fn is_cancelled(cancel: &Receiver<()>) -> bool {
    matches!(cancel.try_recv(), Err(TryRecvError::Disconnected))
}

/// A subdirectory must lie strictly below its parent, which keeps the walk finite.
fn descends_from(path: &str, parent: &str) -> bool {
    let parent = parent.trim_end_matches('/');
    if parent.is_empty() {
        return !path.is_empty();
    }
    path.strip_prefix(parent)
        .and_then(|rest| rest.strip_prefix('/'))
        .is_some_and(|rest| !rest.is_empty())
}

/// Route the children of `parent`: files to `results`, subdirectories to `pending`.
///
/// Blocks while `results` is full, waking early if `cancel` fires.
pub(crate) fn expand_entries(
    parent: &str,
    entries: Vec<TreeEntry>,
    results: &Sender<FileInfo>,
    pending: &Sender<String>,
    cancel: &Receiver<()>,
) -> crate::Result<Flow> {
    for entry in entries {
        if is_cancelled(cancel) {
            return Ok(Flow::Cancelled);
        }

        let TreeEntry { metadata, contents } = entry;
        match metadata.kind {
            EntryKind::Directory if !descends_from(&metadata.path, parent) => {
                warn!(parent, path = %metadata.path, "skipping directory outside its parent");
            }
            EntryKind::Directory => match pending.try_send(metadata.path) {
                Ok(()) => {}
                Err(TrySendError::Full(path)) => {
                    return Err(GregError::WorkQueueFull {
                        capacity: pending.capacity().unwrap_or_default(),
                        path,
                    });
                }
                Err(TrySendError::Disconnected(_)) => return Ok(Flow::Cancelled),
            },
            EntryKind::File => {
                let file = FileInfo {
                    metadata,
                    contents: contents.unwrap_or_default(),
                };
                select! {
                    send(results, file) -> sent => {
                        if sent.is_err() {
                            return Ok(Flow::Cancelled);
                        }
                    }
                    recv(cancel) -> _ => return Ok(Flow::Cancelled),
                }
            }
            EntryKind::Unknown(ref kind) => {
                warn!(kind = %kind, path = %metadata.path, "skipping tree entry of unknown kind");
            }
        }
    }

    Ok(Flow::Continue)
}
