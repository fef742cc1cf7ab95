//! HTTP DTOs for practice session endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use serde::{Deserialize, Serialize};

use crate::application::handlers::practice::SubmitAnswerResult;
use crate::domain::foundation::ErrorCode;
use crate::domain::inspection::{
    AnswerEvaluation, BankQuestion, FollowUpDecision, JudgementBand, SessionSummary,
};
use crate::domain::practice::{PracticeSession, PracticeStatus, QuestionResponse};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to start a practice session.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StartPracticeSessionRequest {
    #[serde(default)]
    pub question_count: Option<u8>,
}

/// Request to submit an answer (or follow-up answer) to a question.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitAnswerRequest {
    pub question_id: String,
    #[serde(default)]
    pub transcript: String,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// A question as shown to the interviewee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionView {
    pub id: String,
    pub domain: String,
    pub area: String,
    pub text: String,
}

impl From<&BankQuestion> for QuestionView {
    fn from(question: &BankQuestion) -> Self {
        Self {
            id: question.id.clone(),
            domain: question.domain.key().to_string(),
            area: question.domain.label().to_string(),
            text: question.text.clone(),
        }
    }
}

/// Progress on one question of the session.
#[derive(Debug, Clone, Serialize)]
pub struct ResponseView {
    pub question_id: String,
    pub attempts: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_band: Option<JudgementBand>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_score4: Option<f64>,
    pub follow_up_pending: bool,
}

impl From<&QuestionResponse> for ResponseView {
    fn from(response: &QuestionResponse) -> Self {
        let latest = response.latest();
        Self {
            question_id: response.question_id.clone(),
            attempts: response.attempts.len(),
            latest_band: latest.map(|a| a.evaluation.band),
            latest_score4: latest.map(|a| a.evaluation.score4),
            follow_up_pending: latest.map_or(false, |a| a.follow_up.should_follow_up),
        }
    }
}

/// Detailed practice session view.
#[derive(Debug, Clone, Serialize)]
pub struct PracticeSessionResponse {
    pub id: String,
    pub status: PracticeStatus,
    pub question_count: u8,
    pub questions: Vec<QuestionView>,
    pub responses: Vec<ResponseView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_question: Option<QuestionView>,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
}

impl From<&PracticeSession> for PracticeSessionResponse {
    fn from(session: &PracticeSession) -> Self {
        Self {
            id: session.id().to_string(),
            status: session.status(),
            question_count: session.question_count().into(),
            questions: session.questions().iter().map(QuestionView::from).collect(),
            responses: session.responses().iter().map(ResponseView::from).collect(),
            next_question: session.next_question().map(QuestionView::from),
            created_at: session.created_at().to_rfc3339(),
            completed_at: session.completed_at().map(|t| t.to_rfc3339()),
        }
    }
}

/// Result of evaluating one answer.
#[derive(Debug, Clone, Serialize)]
pub struct SubmitAnswerResponse {
    pub question_id: String,
    pub attempt_index: u32,
    pub evaluation: AnswerEvaluation,
    pub follow_up: FollowUpDecision,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_question: Option<QuestionView>,
}

impl From<SubmitAnswerResult> for SubmitAnswerResponse {
    fn from(result: SubmitAnswerResult) -> Self {
        Self {
            question_id: result.question_id,
            attempt_index: result.attempt_index,
            evaluation: result.evaluation,
            follow_up: result.follow_up,
            next_question: result.next_question.as_ref().map(QuestionView::from),
        }
    }
}

/// Session-level feedback.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummaryResponse {
    pub session_id: String,
    #[serde(flatten)]
    pub summary: SessionSummary,
}

/// Service health probe.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}
