//! Hand-written port mocks shared by the practice handler tests.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::domain::foundation::{DomainError, ErrorCode, SessionId};
use crate::domain::inspection::{AnswerEvaluation, JudgementBand};
use crate::domain::practice::PracticeSession;
use crate::ports::{
    AIError, AnswerEvaluator, EvaluationError, EvaluationRequest, PracticeSessionRepository,
};

/// Repository mock that records writes and can be told to fail them.
pub struct MockPracticeSessionRepository {
    sessions: Mutex<Vec<PracticeSession>>,
    fail_writes: bool,
}

impl MockPracticeSessionRepository {
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(Vec::new()),
            fail_writes: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            sessions: Mutex::new(Vec::new()),
            fail_writes: true,
        }
    }

    pub fn with_session(session: PracticeSession) -> Self {
        Self {
            sessions: Mutex::new(vec![session]),
            fail_writes: false,
        }
    }

    pub fn stored(&self, id: &SessionId) -> Option<PracticeSession> {
        self.sessions
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id() == id)
            .cloned()
    }

    pub fn count(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }

    fn write_failure() -> DomainError {
        DomainError::new(ErrorCode::StorageError, "Simulated write failure")
    }
}

#[async_trait]
impl PracticeSessionRepository for MockPracticeSessionRepository {
    async fn save(&self, session: &PracticeSession) -> Result<(), DomainError> {
        if self.fail_writes {
            return Err(Self::write_failure());
        }
        self.sessions.lock().unwrap().push(session.clone());
        Ok(())
    }

    async fn update(&self, session: &PracticeSession) -> Result<(), DomainError> {
        if self.fail_writes {
            return Err(Self::write_failure());
        }
        let mut sessions = self.sessions.lock().unwrap();
        match sessions.iter_mut().find(|s| s.id() == session.id()) {
            Some(stored) => {
                *stored = session.clone();
                Ok(())
            }
            None => Err(DomainError::new(ErrorCode::SessionNotFound, "not found")),
        }
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<PracticeSession>, DomainError> {
        Ok(self.stored(id))
    }
}

/// Evaluator mock returning queued evaluations, then a Requires improvement default.
pub struct MockAnswerEvaluator {
    evaluations: Mutex<VecDeque<Result<AnswerEvaluation, EvaluationError>>>,
    requests: Mutex<Vec<EvaluationRequest>>,
}

impl MockAnswerEvaluator {
    pub fn new() -> Self {
        Self {
            evaluations: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_evaluation(self, evaluation: AnswerEvaluation) -> Self {
        self.evaluations.lock().unwrap().push_back(Ok(evaluation));
        self
    }

    pub fn failing(self) -> Self {
        self.evaluations
            .lock()
            .unwrap()
            .push_back(Err(AIError::unavailable("evaluator down").into()));
        self
    }

    pub fn requests(&self) -> Vec<EvaluationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl AnswerEvaluator for MockAnswerEvaluator {
    async fn evaluate(
        &self,
        request: EvaluationRequest,
    ) -> Result<AnswerEvaluation, EvaluationError> {
        self.requests.lock().unwrap().push(request);
        self.evaluations
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(AnswerEvaluation::for_band(JudgementBand::RequiresImprovement)))
    }
}
