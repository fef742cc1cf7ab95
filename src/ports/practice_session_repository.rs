//! Practice session repository port.
//!
//! Defines the contract for persisting and retrieving PracticeSession
//! aggregates. Sessions are written whole; there is no partial update.

use crate::domain::foundation::{DomainError, SessionId};
use crate::domain::practice::PracticeSession;
use async_trait::async_trait;

/// Repository port for PracticeSession aggregate persistence.
#[async_trait]
pub trait PracticeSessionRepository: Send + Sync {
    /// Save a new session.
    ///
    /// # Errors
    ///
    /// - `StorageError` on persistence failure or duplicate id
    async fn save(&self, session: &PracticeSession) -> Result<(), DomainError>;

    /// Update an existing session.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if session doesn't exist
    /// - `StorageError` on persistence failure
    async fn update(&self, session: &PracticeSession) -> Result<(), DomainError>;

    /// Find a session by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &SessionId) -> Result<Option<PracticeSession>, DomainError>;
}
