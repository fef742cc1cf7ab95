//! StartPracticeSessionHandler - Command handler for starting practice sessions.

use std::sync::Arc;
use tracing::info;

use crate::domain::foundation::SessionId;
use crate::domain::inspection::{QuestionBank, SessionSize};
use crate::domain::practice::{PracticeError, PracticeSession};
use crate::ports::PracticeSessionRepository;

/// Command to start a new practice session.
#[derive(Debug, Clone, Default)]
pub struct StartPracticeSessionCommand {
    /// 5, 6 or 7; the configured default when absent.
    pub question_count: Option<u8>,
}

/// Handler for starting practice sessions.
pub struct StartPracticeSessionHandler {
    repository: Arc<dyn PracticeSessionRepository>,
    bank: Arc<QuestionBank>,
    default_size: SessionSize,
}

impl StartPracticeSessionHandler {
    pub fn new(
        repository: Arc<dyn PracticeSessionRepository>,
        bank: Arc<QuestionBank>,
        default_size: SessionSize,
    ) -> Self {
        Self {
            repository,
            bank,
            default_size,
        }
    }

    pub async fn handle(
        &self,
        cmd: StartPracticeSessionCommand,
    ) -> Result<PracticeSession, PracticeError> {
        let size = match cmd.question_count {
            Some(count) => SessionSize::try_from(count)?,
            None => self.default_size,
        };

        let session = PracticeSession::start(SessionId::new(), size, &self.bank);
        self.repository.save(&session).await?;

        info!(
            session_id = %session.id(),
            requested = %size,
            selected = session.questions().len(),
            "Practice session started"
        );
        Ok(session)
    }
}
