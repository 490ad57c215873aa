//! Handle for communicating with the search session actor.

use placefind_core::Notice;
use tokio::sync::{mpsc, oneshot};

use super::commands::SearchSessionCommand;
use crate::errors::PlaceSearchError;
use crate::pagination::SearchSession;
use crate::types::DisplayBatch;

/// Handle for communicating with the search session actor.
///
/// Cheap to clone. Every method waits for the actor to finish the request.
#[derive(Debug, Clone)]
pub struct SearchSessionHandle {
    sender: mpsc::Sender<SearchSessionCommand>,
}

impl SearchSessionHandle {
    /// Creates a new handle with the given command sender.
    pub fn new(sender: mpsc::Sender<SearchSessionCommand>) -> Self {
        Self { sender }
    }

    /// Requests a specific page.
    ///
    /// # Errors
    /// - `PlaceSearchError::SessionClosed` - The actor has stopped
    pub async fn request_page(
        &self,
        keyword: &str,
        page: u32,
    ) -> Result<DisplayBatch, PlaceSearchError> {
        let (responder, rx) = oneshot::channel();
        self.send(SearchSessionCommand::RequestPage {
            keyword: keyword.to_string(),
            page,
            responder,
        })
        .await?;

        rx.await.map_err(|_| PlaceSearchError::SessionClosed)
    }

    /// Requests the page after the current one.
    ///
    /// # Errors
    /// - `PlaceSearchError::SessionClosed` - The actor has stopped
    pub async fn next_page(&self, keyword: &str) -> Result<DisplayBatch, PlaceSearchError> {
        let (responder, rx) = oneshot::channel();
        self.send(SearchSessionCommand::NextPage {
            keyword: keyword.to_string(),
            responder,
        })
        .await?;

        rx.await.map_err(|_| PlaceSearchError::SessionClosed)
    }

    /// Requests the page before the current one.
    ///
    /// # Errors
    /// - `PlaceSearchError::SessionClosed` - The actor has stopped
    pub async fn previous_page(&self, keyword: &str) -> Result<DisplayBatch, PlaceSearchError> {
        let (responder, rx) = oneshot::channel();
        self.send(SearchSessionCommand::PreviousPage {
            keyword: keyword.to_string(),
            responder,
        })
        .await?;

        rx.await.map_err(|_| PlaceSearchError::SessionClosed)
    }

    /// Exports every cached row.
    ///
    /// # Errors
    /// - `PlaceSearchError::SessionClosed` - The actor has stopped
    pub async fn export(&self) -> Result<Notice, PlaceSearchError> {
        let (responder, rx) = oneshot::channel();
        self.send(SearchSessionCommand::Export { responder }).await?;

        rx.await.map_err(|_| PlaceSearchError::SessionClosed)
    }

    /// Returns a copy of the current session state.
    ///
    /// # Errors
    /// - `PlaceSearchError::SessionClosed` - The actor has stopped
    pub async fn snapshot(&self) -> Result<SearchSession, PlaceSearchError> {
        let (responder, rx) = oneshot::channel();
        self.send(SearchSessionCommand::Snapshot { responder })
            .await?;

        rx.await.map_err(|_| PlaceSearchError::SessionClosed)
    }

    /// Stops the actor.
    ///
    /// # Errors
    /// - `PlaceSearchError::SessionClosed` - The actor had already stopped
    pub async fn shutdown(&self) -> Result<(), PlaceSearchError> {
        let (responder, rx) = oneshot::channel();
        self.send(SearchSessionCommand::Shutdown { responder })
            .await?;

        rx.await.map_err(|_| PlaceSearchError::SessionClosed)
    }

    async fn send(&self, command: SearchSessionCommand) -> Result<(), PlaceSearchError> {
        self.sender
            .send(command)
            .await
            .map_err(|_| PlaceSearchError::SessionClosed)
    }
}
