//! GetPracticeSessionHandler - Query handler for one practice session.

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::domain::practice::{PracticeError, PracticeSession};
use crate::ports::PracticeSessionRepository;

/// Query to fetch a practice session.
#[derive(Debug, Clone)]
pub struct GetPracticeSessionQuery {
    pub session_id: SessionId,
}

/// Handler for fetching practice sessions.
pub struct GetPracticeSessionHandler {
    repository: Arc<dyn PracticeSessionRepository>,
}

impl GetPracticeSessionHandler {
    pub fn new(repository: Arc<dyn PracticeSessionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        query: GetPracticeSessionQuery,
    ) -> Result<PracticeSession, PracticeError> {
        load_session(self.repository.as_ref(), query.session_id).await
    }
}

/// Loads a session or fails with `NotFound`.
pub(crate) async fn load_session(
    repository: &dyn PracticeSessionRepository,
    session_id: SessionId,
) -> Result<PracticeSession, PracticeError> {
    repository
        .find_by_id(&session_id)
        .await?
        .ok_or(PracticeError::NotFound(session_id))
}
