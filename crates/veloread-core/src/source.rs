//! Collaborator seams: document processing and progress persistence.

use crate::document::{DocumentId, ProcessingStatus, TokenBundle};
use crate::progress::Checkpoint;

/// Document-processing collaborator.
///
/// Implementations own ingestion end to end (upload, parsing,
/// tokenization); the engine only polls for the terminal `Completed`
/// status and then asks for the finished token bundle. Errors are
/// expected to be transient and are retried on the next poll cycle.
pub trait DocumentProvider {
    type Error;

    /// Latest processing status for a submitted document.
    fn poll_status(&mut self, id: &DocumentId) -> Result<ProcessingStatus, Self::Error>;

    /// Token bundle for a completed document, `None` while it is not
    /// yet available.
    fn fetch_bundle(&mut self, id: &DocumentId) -> Result<Option<TokenBundle>, Self::Error>;
}

/// Durable checkpoint sink.
///
/// Writes are fire-and-forget, idempotent, and last-write-wins; a
/// failed write is dropped and superseded by the next debounce cycle.
pub trait ProgressStore {
    type Error;

    fn persist(&mut self, id: &DocumentId, checkpoint: Checkpoint) -> Result<(), Self::Error>;
}
