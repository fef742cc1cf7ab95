//! SubmitAnswerHandler - Command handler for answering a session question.
//!
//! Evaluates the answer, records it as an attempt, and returns the
//! follow-up decision so the client knows whether to ask again or move on.

use std::sync::Arc;
use tracing::{debug, error};

use crate::domain::foundation::SessionId;
use crate::domain::inspection::{AnswerEvaluation, BankQuestion, FollowUpDecision};
use crate::domain::practice::PracticeError;
use crate::ports::{AnswerEvaluator, EvaluationRequest, PracticeSessionRepository};

use super::get_practice_session::load_session;

/// Maximum transcript length in characters.
pub const MAX_TRANSCRIPT_LENGTH: usize = 20_000;

/// Command to submit one answer.
#[derive(Debug, Clone)]
pub struct SubmitAnswerCommand {
    pub session_id: SessionId,
    pub question_id: String,
    /// Typed answer or speech transcript. May be empty.
    pub transcript: String,
}

/// Result of a submitted answer.
#[derive(Debug, Clone)]
pub struct SubmitAnswerResult {
    pub question_id: String,
    /// Zero-based index of this attempt at the question.
    pub attempt_index: u32,
    pub evaluation: AnswerEvaluation,
    pub follow_up: FollowUpDecision,
    /// First question not yet answered, if any.
    pub next_question: Option<BankQuestion>,
}

/// Handler for submitting answers.
pub struct SubmitAnswerHandler {
    repository: Arc<dyn PracticeSessionRepository>,
    evaluator: Arc<dyn AnswerEvaluator>,
}

impl SubmitAnswerHandler {
    pub fn new(
        repository: Arc<dyn PracticeSessionRepository>,
        evaluator: Arc<dyn AnswerEvaluator>,
    ) -> Self {
        Self {
            repository,
            evaluator,
        }
    }

    pub async fn handle(&self, cmd: SubmitAnswerCommand) -> Result<SubmitAnswerResult, PracticeError> {
        if cmd.transcript.chars().count() > MAX_TRANSCRIPT_LENGTH {
            return Err(PracticeError::validation(
                "transcript",
                format!("Transcript must be {} characters or less", MAX_TRANSCRIPT_LENGTH),
            ));
        }

        let mut session = load_session(self.repository.as_ref(), cmd.session_id).await?;

        // Reject before paying for an evaluation.
        if session.is_completed() {
            return Err(PracticeError::AlreadyCompleted);
        }
        let question = session
            .question(&cmd.question_id)
            .cloned()
            .ok_or_else(|| PracticeError::question_not_in_session(&cmd.question_id))?;
        let attempt_index = u32::try_from(session.attempt_count(&cmd.question_id)).unwrap_or(u32::MAX);

        let evaluation = self
            .evaluator
            .evaluate(EvaluationRequest {
                session_id: cmd.session_id,
                question,
                transcript: cmd.transcript.clone(),
                attempt_index,
            })
            .await
            .map_err(|e| {
                error!(session_id = %cmd.session_id, error = %e, "Answer evaluation failed");
                PracticeError::evaluation(e.to_string())
            })?;

        let follow_up =
            session.record_attempt(&cmd.question_id, cmd.transcript, evaluation.clone())?;
        self.repository.update(&session).await?;

        debug!(
            session_id = %cmd.session_id,
            question_id = %cmd.question_id,
            attempt_index,
            reason = %follow_up.reason,
            should_follow_up = follow_up.should_follow_up,
            "Follow-up decided"
        );

        Ok(SubmitAnswerResult {
            question_id: cmd.question_id,
            attempt_index,
            evaluation,
            follow_up,
            next_question: session.next_question().cloned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::practice::test_support::{
        MockAnswerEvaluator, MockPracticeSessionRepository,
    };
    use crate::domain::inspection::{FollowUpReason, JudgementBand, QuestionBank, SessionSize};
    use crate::domain::practice::PracticeSession;

    fn stored_session() -> PracticeSession {
        PracticeSession::start(SessionId::new(), SessionSize::Six, &QuestionBank::standard())
    }

    fn command(session: &PracticeSession, transcript: &str) -> SubmitAnswerCommand {
        SubmitAnswerCommand {
            session_id: *session.id(),
            question_id: session.questions()[0].id.clone(),
            transcript: transcript.to_string(),
        }
    }

    #[tokio::test]
    async fn records_attempt_and_returns_follow_up() {
        let session = stored_session();
        let repo = Arc::new(MockPracticeSessionRepository::with_session(session.clone()));
        let evaluator = Arc::new(MockAnswerEvaluator::new());
        let handler = SubmitAnswerHandler::new(repo.clone(), evaluator.clone());

        let result = handler
            .handle(command(&session, "We do safeguarding well."))
            .await
            .unwrap();

        assert_eq!(result.attempt_index, 0);
        assert!(result.follow_up.should_follow_up);
        assert_eq!(result.follow_up.reason, FollowUpReason::NoExample);
        assert_eq!(
            result.next_question.map(|q| q.id),
            Some(session.questions()[1].id.clone())
        );

        let stored = repo.stored(session.id()).unwrap();
        assert_eq!(stored.attempt_count(&session.questions()[0].id), 1);
        assert_eq!(evaluator.requests()[0].transcript, "We do safeguarding well.");
    }

    #[tokio::test]
    async fn strong_answer_needs_no_follow_up() {
        let session = stored_session();
        let repo = Arc::new(MockPracticeSessionRepository::with_session(session.clone()));
        let evaluator = Arc::new(
            MockAnswerEvaluator::new().with_evaluation(AnswerEvaluation::for_band(JudgementBand::Outstanding)),
        );
        let handler = SubmitAnswerHandler::new(repo, evaluator);

        let result = handler.handle(command(&session, "Detailed answer")).await.unwrap();

        assert!(!result.follow_up.should_follow_up);
        assert_eq!(result.follow_up.reason, FollowUpReason::ScoreSufficient);
    }

    #[tokio::test]
    async fn attempt_index_counts_previous_answers() {
        let session = stored_session();
        let repo = Arc::new(MockPracticeSessionRepository::with_session(session.clone()));
        let evaluator = Arc::new(MockAnswerEvaluator::new());
        let handler = SubmitAnswerHandler::new(repo, evaluator.clone());

        for _ in 0..2 {
            handler.handle(command(&session, "")).await.unwrap();
        }
        let third = handler.handle(command(&session, "")).await.unwrap();

        assert_eq!(third.attempt_index, 2);
        assert_eq!(third.follow_up.reason, FollowUpReason::MaxAttempts);
        assert_eq!(evaluator.requests()[2].attempt_index, 2);
    }

    #[tokio::test]
    async fn unknown_question_is_rejected_before_evaluation() {
        let session = stored_session();
        let repo = Arc::new(MockPracticeSessionRepository::with_session(session.clone()));
        let evaluator = Arc::new(MockAnswerEvaluator::new());
        let handler = SubmitAnswerHandler::new(repo, evaluator.clone());

        let mut cmd = command(&session, "answer");
        cmd.question_id = "zz-99".to_string();
        let result = handler.handle(cmd).await;

        assert!(matches!(result, Err(PracticeError::QuestionNotInSession(_))));
        assert!(evaluator.requests().is_empty());
    }

    #[tokio::test]
    async fn completed_session_is_rejected() {
        let mut session = stored_session();
        session.complete().unwrap();
        let repo = Arc::new(MockPracticeSessionRepository::with_session(session.clone()));
        let handler = SubmitAnswerHandler::new(repo, Arc::new(MockAnswerEvaluator::new()));

        let result = handler.handle(command(&session, "answer")).await;

        assert!(matches!(result, Err(PracticeError::AlreadyCompleted)));
    }

    #[tokio::test]
    async fn missing_session_is_not_found() {
        let handler = SubmitAnswerHandler::new(
            Arc::new(MockPracticeSessionRepository::new()),
            Arc::new(MockAnswerEvaluator::new()),
        );
        let session = stored_session();

        let result = handler.handle(command(&session, "answer")).await;

        assert!(matches!(result, Err(PracticeError::NotFound(_))));
    }

    #[tokio::test]
    async fn evaluator_failure_leaves_session_unchanged() {
        let session = stored_session();
        let repo = Arc::new(MockPracticeSessionRepository::with_session(session.clone()));
        let handler =
            SubmitAnswerHandler::new(repo.clone(), Arc::new(MockAnswerEvaluator::new().failing()));

        let result = handler.handle(command(&session, "answer")).await;

        assert!(matches!(result, Err(PracticeError::Evaluation(_))));
        assert!(repo.stored(session.id()).unwrap().responses().is_empty());
    }

    #[tokio::test]
    async fn overlong_transcript_is_rejected() {
        let session = stored_session();
        let repo = Arc::new(MockPracticeSessionRepository::with_session(session.clone()));
        let handler = SubmitAnswerHandler::new(repo, Arc::new(MockAnswerEvaluator::new()));

        let long = "x".repeat(MAX_TRANSCRIPT_LENGTH + 1);
        let result = handler.handle(command(&session, &long)).await;

        assert!(matches!(result, Err(PracticeError::ValidationFailed { .. })));
    }
}
