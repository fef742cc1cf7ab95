//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `AIProvider` - LLM completions
//! - `AnswerEvaluator` - Rubric scoring of a single answer
//! - `PracticeSessionRepository` - Practice session persistence

mod ai_provider;
mod answer_evaluator;
mod practice_session_repository;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message,
    MessageRole, ProviderInfo, RequestMetadata, TokenUsage,
};
pub use answer_evaluator::{AnswerEvaluator, EvaluationError, EvaluationRequest};
pub use practice_session_repository::PracticeSessionRepository;
