//! In-Memory Practice Session Repository
//!
//! Keeps practice sessions in memory for the lifetime of the process.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, SessionId};
use crate::domain::practice::PracticeSession;
use crate::ports::PracticeSessionRepository;

/// In-memory storage for practice sessions
#[derive(Debug, Clone, Default)]
pub struct InMemoryPracticeSessionRepository {
    sessions: Arc<RwLock<HashMap<SessionId, PracticeSession>>>,
}

impl InMemoryPracticeSessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of stored sessions
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Clear all stored sessions (useful for tests)
    pub async fn clear(&self) {
        self.sessions.write().await.clear();
    }
}

#[async_trait]
impl PracticeSessionRepository for InMemoryPracticeSessionRepository {
    async fn save(&self, session: &PracticeSession) -> Result<(), DomainError> {
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(session.id()) {
            return Err(DomainError::new(
                ErrorCode::StorageError,
                "Practice session already exists",
            )
            .with_detail("session_id", session.id().to_string()));
        }
        sessions.insert(*session.id(), session.clone());
        Ok(())
    }

    async fn update(&self, session: &PracticeSession) -> Result<(), DomainError> {
        let mut sessions = self.sessions.write().await;
        match sessions.get_mut(session.id()) {
            Some(stored) => {
                *stored = session.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::SessionNotFound,
                "Practice session not found",
            )
            .with_detail("session_id", session.id().to_string())),
        }
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<PracticeSession>, DomainError> {
        Ok(self.sessions.read().await.get(id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::inspection::{QuestionBank, SessionSize};

    fn test_session() -> PracticeSession {
        PracticeSession::start(SessionId::new(), SessionSize::Six, &QuestionBank::standard())
    }

    #[tokio::test]
    async fn save_and_find_session() {
        let repo = InMemoryPracticeSessionRepository::new();
        let session = test_session();

        repo.save(&session).await.unwrap();
        let loaded = repo.find_by_id(session.id()).await.unwrap();

        assert_eq!(loaded, Some(session));
        assert_eq!(repo.session_count().await, 1);
    }

    #[tokio::test]
    async fn find_unknown_session_returns_none() {
        let repo = InMemoryPracticeSessionRepository::new();
        assert!(repo.find_by_id(&SessionId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_twice_fails() {
        let repo = InMemoryPracticeSessionRepository::new();
        let session = test_session();

        repo.save(&session).await.unwrap();
        let err = repo.save(&session).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::StorageError);
    }

    #[tokio::test]
    async fn update_replaces_stored_session() {
        let repo = InMemoryPracticeSessionRepository::new();
        let mut session = test_session();
        repo.save(&session).await.unwrap();

        session.complete().unwrap();
        repo.update(&session).await.unwrap();

        let loaded = repo.find_by_id(session.id()).await.unwrap().unwrap();
        assert!(loaded.is_completed());
    }

    #[tokio::test]
    async fn update_unknown_session_fails() {
        let repo = InMemoryPracticeSessionRepository::new();
        let err = repo.update(&test_session()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::SessionNotFound);
    }

    #[tokio::test]
    async fn clones_share_storage() {
        let repo = InMemoryPracticeSessionRepository::new();
        let clone = repo.clone();
        clone.save(&test_session()).await.unwrap();

        assert_eq!(repo.session_count().await, 1);
        repo.clear().await;
        assert_eq!(clone.session_count().await, 0);
    }
}
