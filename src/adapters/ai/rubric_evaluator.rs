//! LLM-backed AnswerEvaluator.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::inspection::{build_evaluation_prompt, parse_evaluation, AnswerEvaluation};
use crate::ports::{
    AIProvider, AnswerEvaluator, CompletionRequest, EvaluationError, EvaluationRequest,
    MessageRole, RequestMetadata,
};

/// Low temperature keeps repeated scoring of the same answer consistent.
const EVALUATION_TEMPERATURE: f32 = 0.2;

/// Scores answers by sending the rubric prompt to an AI provider.
pub struct RubricAnswerEvaluator {
    ai_provider: Arc<dyn AIProvider>,
    max_tokens: u32,
}

impl RubricAnswerEvaluator {
    pub fn new(ai_provider: Arc<dyn AIProvider>, max_tokens: u32) -> Self {
        Self {
            ai_provider,
            max_tokens,
        }
    }

    fn create_request(&self, request: &EvaluationRequest) -> CompletionRequest {
        let prompt =
            build_evaluation_prompt(&request.question, &request.transcript, request.attempt_index);
        let metadata = RequestMetadata::new(
            request.session_id,
            format!("answer-evaluation-{}", uuid::Uuid::new_v4()),
        );

        CompletionRequest::new(metadata)
            .with_system_prompt(prompt.system)
            .with_message(MessageRole::User, prompt.user)
            .with_max_tokens(self.max_tokens)
            .with_temperature(EVALUATION_TEMPERATURE)
    }
}

#[async_trait]
impl AnswerEvaluator for RubricAnswerEvaluator {
    async fn evaluate(
        &self,
        request: EvaluationRequest,
    ) -> Result<AnswerEvaluation, EvaluationError> {
        let completion = self.ai_provider.complete(self.create_request(&request)).await?;

        match parse_evaluation(&completion.content) {
            Ok(evaluation) => {
                debug!(
                    session_id = %request.session_id,
                    question_id = %request.question.id,
                    band = %evaluation.band,
                    score = evaluation.score,
                    "Answer evaluated"
                );
                Ok(evaluation)
            }
            Err(err) => {
                warn!(
                    session_id = %request.session_id,
                    question_id = %request.question.id,
                    error = %err,
                    "Evaluator reply could not be parsed"
                );
                Err(err.into())
            }
        }
    }
}
