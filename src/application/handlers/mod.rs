//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod practice;

pub use practice::{
    CompletePracticeSessionCommand, CompletePracticeSessionHandler, GetPracticeSessionHandler,
    GetPracticeSessionQuery, GetSessionSummaryHandler, GetSessionSummaryQuery,
    StartPracticeSessionCommand, StartPracticeSessionHandler, SubmitAnswerCommand,
    SubmitAnswerHandler, SubmitAnswerResult,
};
