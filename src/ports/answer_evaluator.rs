//! AnswerEvaluator port - scores one answer against the inspection rubric.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::SessionId;
use crate::domain::inspection::{AnswerEvaluation, BankQuestion, EvaluationParseError};

use super::ai_provider::AIError;

/// Everything an evaluator needs to judge one answer.
#[derive(Debug, Clone)]
pub struct EvaluationRequest {
    pub session_id: SessionId,
    pub question: BankQuestion,
    pub transcript: String,
    /// Zero for the first answer to the question, then one per follow-up.
    pub attempt_index: u32,
}

/// Errors raised while evaluating an answer.
#[derive(Debug, Error)]
pub enum EvaluationError {
    #[error("evaluator provider failed: {0}")]
    Provider(#[from] AIError),

    #[error("evaluator reply was unusable: {0}")]
    UnusableReply(#[from] EvaluationParseError),
}

/// Scores answers; implementations may call an LLM.
#[async_trait]
pub trait AnswerEvaluator: Send + Sync {
    async fn evaluate(&self, request: EvaluationRequest) -> Result<AnswerEvaluation, EvaluationError>;
}
