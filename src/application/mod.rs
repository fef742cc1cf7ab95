//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;

pub use handlers::{
    CompletePracticeSessionCommand, CompletePracticeSessionHandler, GetPracticeSessionHandler,
    GetPracticeSessionQuery, GetSessionSummaryHandler, GetSessionSummaryQuery,
    StartPracticeSessionCommand, StartPracticeSessionHandler, SubmitAnswerCommand,
    SubmitAnswerHandler, SubmitAnswerResult,
};
