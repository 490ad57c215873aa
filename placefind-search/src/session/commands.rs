//! Command definitions for the search session actor.

use placefind_core::Notice;
use tokio::sync::oneshot;

use crate::pagination::SearchSession;
use crate::types::DisplayBatch;

/// Commands that can be sent to the search session actor.
///
/// Each command carries a response channel the actor answers on once the
/// operation has finished.
#[derive(Debug)]
pub enum SearchSessionCommand {
    /// Serve a specific page for the keyword the user typed.
    RequestPage {
        /// Keyword as typed, trimmed by the cache
        keyword: String,
        /// 1-based page number, 0 means "before the first page"
        page: u32,
        /// Receives the batch to display
        responder: oneshot::Sender<DisplayBatch>,
    },
    /// Serve the page after the current one.
    NextPage {
        /// Keyword as typed
        keyword: String,
        /// Receives the batch to display
        responder: oneshot::Sender<DisplayBatch>,
    },
    /// Serve the page before the current one.
    PreviousPage {
        /// Keyword as typed
        keyword: String,
        /// Receives the batch to display
        responder: oneshot::Sender<DisplayBatch>,
    },
    /// Export every cached row.
    Export {
        /// Receives the outcome notice
        responder: oneshot::Sender<Notice>,
    },
    /// Copy of the current session state.
    Snapshot {
        /// Receives the snapshot
        responder: oneshot::Sender<SearchSession>,
    },
    /// Stop the actor after answering.
    Shutdown {
        /// Acknowledged once the actor stops accepting commands
        responder: oneshot::Sender<()>,
    },
}
