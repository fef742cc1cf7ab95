//! Practice module - a single practice inspection and its answers.
//!
//! A practice session selects its questions when it starts, records each
//! evaluated answer as an attempt, and produces the end-of-session report.

mod aggregate;
mod errors;

pub use aggregate::{AnswerAttempt, PracticeSession, PracticeStatus, QuestionResponse};
pub use errors::PracticeError;
