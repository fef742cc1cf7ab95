//! AI Adapters.
//!
//! Implementations of the AIProvider and AnswerEvaluator ports.
//!
//! ## Available Adapters
//!
//! - `MockAIProvider` - Configurable mock for tests and offline runs
//! - `AnthropicProvider` - Anthropic Claude models
//! - `RubricAnswerEvaluator` - Scores answers through any AIProvider

mod anthropic_provider;
mod mock_provider;
mod rubric_evaluator;

pub use anthropic_provider::{AnthropicConfig, AnthropicProvider};
pub use mock_provider::{MockAIProvider, MockError, MockResponse, DEFAULT_EVALUATION_REPLY};
pub use rubric_evaluator::RubricAnswerEvaluator;
