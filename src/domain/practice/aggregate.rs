//! Practice session aggregate.
//!
//! A practice session owns its selected questions and every answer given
//! to them. Each answer is an attempt; the follow-up engine decides after
//! each attempt whether the inspector would probe again.
//!
//! # Invariants
//!
//! - `questions` is fixed at start and never changes
//! - `responses` holds at most one entry per question, in first-answer order
//! - Completed sessions accept no further attempts

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{SessionId, Timestamp};
use crate::domain::inspection::{
    detect_follow_up_need, AnswerEvaluation, BankQuestion, FollowUpContext, FollowUpDecision,
    InspectionDomain, QuestionBank, QuestionSelector, SessionAreaResult, SessionSize,
    SessionSummary,
};

use super::errors::PracticeError;

/// Lifecycle of a practice session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PracticeStatus {
    InProgress,
    Completed,
}

/// One answer to one question, with its evaluation and follow-up decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerAttempt {
    pub transcript: String,
    pub evaluation: AnswerEvaluation,
    pub follow_up: FollowUpDecision,
    pub answered_at: Timestamp,
}

/// All attempts at one question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionResponse {
    pub question_id: String,
    pub domain: InspectionDomain,
    pub attempts: Vec<AnswerAttempt>,
}

impl QuestionResponse {
    pub fn latest(&self) -> Option<&AnswerAttempt> {
        self.attempts.last()
    }
}

/// Practice session aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PracticeSession {
    id: SessionId,
    question_count: SessionSize,
    questions: Vec<BankQuestion>,
    responses: Vec<QuestionResponse>,
    status: PracticeStatus,
    created_at: Timestamp,
    completed_at: Option<Timestamp>,
}

impl PracticeSession {
    /// Starts a session, drawing its questions with the id as seed.
    pub fn start(id: SessionId, size: SessionSize, bank: &QuestionBank) -> Self {
        let questions = QuestionSelector::new(bank).generate(&id.as_seed(), size);
        Self {
            id,
            question_count: size,
            questions,
            responses: Vec::new(),
            status: PracticeStatus::InProgress,
            created_at: Timestamp::now(),
            completed_at: None,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Size requested at start; `questions()` may be shorter on a thin bank.
    pub fn question_count(&self) -> SessionSize {
        self.question_count
    }

    pub fn questions(&self) -> &[BankQuestion] {
        &self.questions
    }

    pub fn responses(&self) -> &[QuestionResponse] {
        &self.responses
    }

    pub fn status(&self) -> PracticeStatus {
        self.status
    }

    pub fn is_completed(&self) -> bool {
        self.status == PracticeStatus::Completed
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn completed_at(&self) -> Option<&Timestamp> {
        self.completed_at.as_ref()
    }

    pub fn question(&self, question_id: &str) -> Option<&BankQuestion> {
        self.questions.iter().find(|q| q.id == question_id)
    }

    pub fn response(&self, question_id: &str) -> Option<&QuestionResponse> {
        self.responses.iter().find(|r| r.question_id == question_id)
    }

    /// Number of earlier attempts at a question.
    pub fn attempt_count(&self, question_id: &str) -> usize {
        self.response(question_id).map_or(0, |r| r.attempts.len())
    }

    /// First question in session order that has not been answered yet.
    pub fn next_question(&self) -> Option<&BankQuestion> {
        self.questions
            .iter()
            .find(|q| self.response(&q.id).is_none())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Records an evaluated answer and decides whether to follow up.
    ///
    /// # Errors
    ///
    /// - `AlreadyCompleted` if the session is completed
    /// - `QuestionNotInSession` if the question was not selected for it
    pub fn record_attempt(
        &mut self,
        question_id: &str,
        transcript: impl Into<String>,
        evaluation: AnswerEvaluation,
    ) -> Result<FollowUpDecision, PracticeError> {
        if self.is_completed() {
            return Err(PracticeError::AlreadyCompleted);
        }
        let domain = self
            .question(question_id)
            .map(|q| q.domain)
            .ok_or_else(|| PracticeError::question_not_in_session(question_id))?;

        let transcript = transcript.into();
        let attempt_index = u32::try_from(self.attempt_count(question_id)).unwrap_or(u32::MAX);
        let follow_up = detect_follow_up_need(&FollowUpContext {
            score: evaluation.score,
            transcript: &transcript,
            evaluation: &evaluation,
            domain: domain.label(),
            attempt_index,
        });

        let attempt = AnswerAttempt {
            transcript,
            evaluation,
            follow_up: follow_up.clone(),
            answered_at: Timestamp::now(),
        };

        match self
            .responses
            .iter_mut()
            .find(|r| r.question_id == question_id)
        {
            Some(response) => response.attempts.push(attempt),
            None => self.responses.push(QuestionResponse {
                question_id: question_id.to_string(),
                domain,
                attempts: vec![attempt],
            }),
        }

        Ok(follow_up)
    }

    /// Marks the session completed.
    ///
    /// # Errors
    ///
    /// - `AlreadyCompleted` if completed before
    pub fn complete(&mut self) -> Result<(), PracticeError> {
        if self.is_completed() {
            return Err(PracticeError::AlreadyCompleted);
        }
        self.status = PracticeStatus::Completed;
        self.completed_at = Some(Timestamp::now());
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Reporting
    // ─────────────────────────────────────────────────────────────────────────

    /// Latest result per answered question, in answer order.
    pub fn area_results(&self) -> Vec<SessionAreaResult> {
        self.latest_evaluations()
            .map(|(domain, eval)| {
                let result = SessionAreaResult::new(domain.label(), eval.band, eval.score4);
                match eval.confidence {
                    Some(confidence) => result.with_confidence(confidence),
                    None => result,
                }
            })
            .collect()
    }

    /// The 0-4 score of each answered question, in answer order.
    pub fn score_series(&self) -> Vec<f64> {
        self.latest_evaluations().map(|(_, eval)| eval.score4).collect()
    }

    /// Builds the session report with the given number of priority areas.
    pub fn summary(&self, priority_area_count: usize) -> SessionSummary {
        let evaluations: Vec<&AnswerEvaluation> =
            self.latest_evaluations().map(|(_, eval)| eval).collect();
        SessionSummary::compose(
            &self.area_results(),
            &evaluations,
            self.questions.len(),
            priority_area_count,
        )
    }

    fn latest_evaluations(&self) -> impl Iterator<Item = (InspectionDomain, &AnswerEvaluation)> {
        self.responses
            .iter()
            .filter_map(|r| r.latest().map(|a| (r.domain, &a.evaluation)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::inspection::{
        Confidence, FollowUpReason, JudgementBand, ReadinessScore, Trajectory,
    };

    fn test_session() -> PracticeSession {
        PracticeSession::start(SessionId::new(), SessionSize::Six, &QuestionBank::standard())
    }

    fn first_question_id(session: &PracticeSession) -> String {
        session.questions()[0].id.clone()
    }

    fn evaluation(band: JudgementBand) -> AnswerEvaluation {
        AnswerEvaluation::for_band(band)
    }

    // Start tests

    #[test]
    fn start_selects_one_question_per_domain() {
        let session = test_session();
        assert_eq!(session.questions().len(), 6);
        assert_eq!(session.status(), PracticeStatus::InProgress);
        assert!(session.responses().is_empty());
        assert!(session.completed_at().is_none());
    }

    #[test]
    fn same_id_selects_same_questions() {
        let id = SessionId::new();
        let bank = QuestionBank::standard();
        let a = PracticeSession::start(id, SessionSize::Seven, &bank);
        let b = PracticeSession::start(id, SessionSize::Seven, &bank);
        assert_eq!(a.questions(), b.questions());
    }

    #[test]
    fn start_uses_id_as_seed() {
        let id = SessionId::new();
        let bank = QuestionBank::standard();
        let session = PracticeSession::start(id, SessionSize::Five, &bank);
        let expected = QuestionSelector::new(&bank).generate(&id.as_seed(), SessionSize::Five);
        assert_eq!(session.questions(), expected.as_slice());
    }

    // Attempt tests

    #[test]
    fn record_attempt_rejects_unknown_question() {
        let mut session = test_session();
        let result = session.record_attempt("not-a-question", "answer", evaluation(JudgementBand::Good));
        assert_eq!(
            result,
            Err(PracticeError::QuestionNotInSession("not-a-question".to_string()))
        );
    }

    #[test]
    fn record_attempt_rejects_completed_session() {
        let mut session = test_session();
        let question_id = first_question_id(&session);
        session.complete().unwrap();
        let result = session.record_attempt(&question_id, "answer", evaluation(JudgementBand::Good));
        assert_eq!(result, Err(PracticeError::AlreadyCompleted));
    }

    #[test]
    fn weak_first_answer_asks_for_example() {
        let mut session = test_session();
        let question_id = first_question_id(&session);
        let decision = session
            .record_attempt(
                &question_id,
                "We do safeguarding well.",
                evaluation(JudgementBand::RequiresImprovement),
            )
            .unwrap();
        assert!(decision.should_follow_up);
        assert_eq!(decision.reason, FollowUpReason::NoExample);
        assert_eq!(session.attempt_count(&question_id), 1);
    }

    #[test]
    fn third_attempt_hits_follow_up_cap() {
        let mut session = test_session();
        let question_id = first_question_id(&session);
        for _ in 0..2 {
            let decision = session
                .record_attempt(&question_id, "", evaluation(JudgementBand::Inadequate))
                .unwrap();
            assert!(decision.should_follow_up);
        }
        let decision = session
            .record_attempt(&question_id, "", evaluation(JudgementBand::Inadequate))
            .unwrap();
        assert!(!decision.should_follow_up);
        assert_eq!(decision.reason, FollowUpReason::MaxAttempts);
        assert_eq!(session.responses().len(), 1);
        assert_eq!(session.responses()[0].attempts.len(), 3);
    }

    #[test]
    fn next_question_skips_answered_questions() {
        let mut session = test_session();
        let first = first_question_id(&session);
        let second = session.questions()[1].id.clone();
        assert_eq!(session.next_question().map(|q| q.id.as_str()), Some(first.as_str()));

        session
            .record_attempt(&first, "answer", evaluation(JudgementBand::Outstanding))
            .unwrap();
        assert_eq!(session.next_question().map(|q| q.id.as_str()), Some(second.as_str()));
    }

    // Complete tests

    #[test]
    fn complete_sets_status_and_time() {
        let mut session = test_session();
        session.complete().unwrap();
        assert!(session.is_completed());
        assert!(session.completed_at().is_some());
    }

    #[test]
    fn complete_twice_fails() {
        let mut session = test_session();
        session.complete().unwrap();
        assert_eq!(session.complete(), Err(PracticeError::AlreadyCompleted));
    }

    // Reporting tests

    #[test]
    fn area_results_use_latest_attempt_in_answer_order() {
        let mut session = test_session();
        let first = session.questions()[0].clone();
        let second = session.questions()[1].clone();

        session
            .record_attempt(&second.id, "", evaluation(JudgementBand::Good))
            .unwrap();
        session
            .record_attempt(&first.id, "", evaluation(JudgementBand::Inadequate))
            .unwrap();
        let mut improved = evaluation(JudgementBand::Outstanding);
        improved.confidence = Some(Confidence::Strong);
        session.record_attempt(&first.id, "", improved).unwrap();

        let results = session.area_results();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].area, second.domain.label());
        assert_eq!(results[0].band, JudgementBand::Good);
        assert_eq!(results[1].area, first.domain.label());
        assert_eq!(results[1].band, JudgementBand::Outstanding);
        assert_eq!(results[1].confidence, Some(Confidence::Strong));
        assert_eq!(session.score_series(), vec![3.0, 4.0]);
    }

    #[test]
    fn summary_of_unanswered_session_uses_defaults() {
        let session = test_session();
        let summary = session.summary(2);
        assert_eq!(summary.session_band, JudgementBand::RequiresImprovement);
        assert_eq!(summary.trajectory, Trajectory::InsufficientData);
        assert_eq!(summary.readiness_score, ReadinessScore::ZERO);
        assert_eq!(summary.answered_count, 0);
        assert_eq!(summary.question_count, 6);
    }

    #[test]
    fn summary_counts_answered_questions() {
        let mut session = test_session();
        let ids: Vec<String> = session.questions().iter().map(|q| q.id.clone()).collect();
        for (id, band) in ids.iter().zip([
            JudgementBand::RequiresImprovement,
            JudgementBand::Good,
            JudgementBand::Outstanding,
        ]) {
            session.record_attempt(id, "", evaluation(band)).unwrap();
        }

        let summary = session.summary(2);
        assert_eq!(summary.answered_count, 3);
        assert_eq!(summary.session_band, JudgementBand::Good);
        assert_eq!(summary.trajectory, Trajectory::Improving);
        assert_eq!(summary.priority_areas.len(), 2);
    }
}
