//! GetSessionSummaryHandler - Query handler for the session report.

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::domain::inspection::SessionSummary;
use crate::domain::practice::PracticeError;
use crate::ports::PracticeSessionRepository;

use super::get_practice_session::load_session;

/// Query for a session's summary report.
#[derive(Debug, Clone)]
pub struct GetSessionSummaryQuery {
    pub session_id: SessionId,
}

/// Handler producing summary reports. Works on in-progress sessions too.
pub struct GetSessionSummaryHandler {
    repository: Arc<dyn PracticeSessionRepository>,
    priority_area_count: usize,
}

impl GetSessionSummaryHandler {
    pub fn new(repository: Arc<dyn PracticeSessionRepository>, priority_area_count: usize) -> Self {
        Self {
            repository,
            priority_area_count,
        }
    }

    pub async fn handle(&self, query: GetSessionSummaryQuery) -> Result<SessionSummary, PracticeError> {
        let session = load_session(self.repository.as_ref(), query.session_id).await?;
        Ok(session.summary(self.priority_area_count))
    }
}
