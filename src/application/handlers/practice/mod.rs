//! Practice session command and query handlers.

mod complete_practice_session;
mod get_practice_session;
mod get_session_summary;
mod start_practice_session;
mod submit_answer;

#[cfg(test)]
mod test_support;

pub use complete_practice_session::{
    CompletePracticeSessionCommand, CompletePracticeSessionHandler,
};
pub use get_practice_session::{GetPracticeSessionHandler, GetPracticeSessionQuery};
pub use get_session_summary::{GetSessionSummaryHandler, GetSessionSummaryQuery};
pub use start_practice_session::{StartPracticeSessionCommand, StartPracticeSessionHandler};
pub use submit_answer::{
    SubmitAnswerCommand, SubmitAnswerHandler, SubmitAnswerResult, MAX_TRANSCRIPT_LENGTH,
};
