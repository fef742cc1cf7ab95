//! HTTP adapter for practice session endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    ErrorResponse, HealthResponse, PracticeSessionResponse, QuestionView, ResponseView,
    SessionSummaryResponse, StartPracticeSessionRequest, SubmitAnswerRequest,
    SubmitAnswerResponse,
};
pub use handlers::PracticeHandlers;
pub use routes::practice_routes;
