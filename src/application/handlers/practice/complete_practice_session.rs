//! CompletePracticeSessionHandler - Command handler for ending a session.

use std::sync::Arc;
use tracing::info;

use crate::domain::foundation::SessionId;
use crate::domain::inspection::SessionSummary;
use crate::domain::practice::PracticeError;
use crate::ports::PracticeSessionRepository;

use super::get_practice_session::load_session;

/// Command to complete a practice session.
#[derive(Debug, Clone)]
pub struct CompletePracticeSessionCommand {
    pub session_id: SessionId,
}

/// Handler for completing sessions; returns the final report.
pub struct CompletePracticeSessionHandler {
    repository: Arc<dyn PracticeSessionRepository>,
    priority_area_count: usize,
}

impl CompletePracticeSessionHandler {
    pub fn new(repository: Arc<dyn PracticeSessionRepository>, priority_area_count: usize) -> Self {
        Self {
            repository,
            priority_area_count,
        }
    }

    pub async fn handle(
        &self,
        cmd: CompletePracticeSessionCommand,
    ) -> Result<SessionSummary, PracticeError> {
        let mut session = load_session(self.repository.as_ref(), cmd.session_id).await?;
        session.complete()?;
        self.repository.update(&session).await?;

        let summary = session.summary(self.priority_area_count);
        info!(
            session_id = %cmd.session_id,
            band = %summary.session_band,
            readiness = summary.readiness_score.value(),
            answered = summary.answered_count,
            "Practice session completed"
        );
        Ok(summary)
    }
}
