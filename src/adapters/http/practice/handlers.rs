//! HTTP handlers for practice session endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use crate::application::handlers::practice::{
    CompletePracticeSessionCommand, CompletePracticeSessionHandler, GetPracticeSessionHandler,
    GetPracticeSessionQuery, GetSessionSummaryHandler, GetSessionSummaryQuery,
    StartPracticeSessionCommand, StartPracticeSessionHandler, SubmitAnswerCommand,
    SubmitAnswerHandler,
};
use crate::domain::foundation::{ErrorCode, SessionId};
use crate::domain::inspection::{QuestionBank, SessionSize, SessionSummary};
use crate::domain::practice::PracticeError;
use crate::ports::{AnswerEvaluator, PracticeSessionRepository};

use super::dto::{
    ErrorResponse, PracticeSessionResponse, SessionSummaryResponse, StartPracticeSessionRequest,
    SubmitAnswerRequest, SubmitAnswerResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct PracticeHandlers {
    start_handler: Arc<StartPracticeSessionHandler>,
    get_handler: Arc<GetPracticeSessionHandler>,
    submit_handler: Arc<SubmitAnswerHandler>,
    summary_handler: Arc<GetSessionSummaryHandler>,
    complete_handler: Arc<CompletePracticeSessionHandler>,
}

impl PracticeHandlers {
    pub fn new(
        start_handler: Arc<StartPracticeSessionHandler>,
        get_handler: Arc<GetPracticeSessionHandler>,
        submit_handler: Arc<SubmitAnswerHandler>,
        summary_handler: Arc<GetSessionSummaryHandler>,
        complete_handler: Arc<CompletePracticeSessionHandler>,
    ) -> Self {
        Self {
            start_handler,
            get_handler,
            submit_handler,
            summary_handler,
            complete_handler,
        }
    }

    /// Wires every practice handler over one repository and evaluator.
    pub fn from_ports(
        repository: Arc<dyn PracticeSessionRepository>,
        evaluator: Arc<dyn AnswerEvaluator>,
        bank: Arc<QuestionBank>,
        default_size: SessionSize,
        priority_area_count: usize,
    ) -> Self {
        Self::new(
            Arc::new(StartPracticeSessionHandler::new(
                repository.clone(),
                bank,
                default_size,
            )),
            Arc::new(GetPracticeSessionHandler::new(repository.clone())),
            Arc::new(SubmitAnswerHandler::new(repository.clone(), evaluator)),
            Arc::new(GetSessionSummaryHandler::new(
                repository.clone(),
                priority_area_count,
            )),
            Arc::new(CompletePracticeSessionHandler::new(
                repository,
                priority_area_count,
            )),
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/practice-sessions - Start a new practice session
pub async fn start_practice_session(
    State(handlers): State<PracticeHandlers>,
    Json(req): Json<StartPracticeSessionRequest>,
) -> Response {
    let cmd = StartPracticeSessionCommand {
        question_count: req.question_count,
    };

    match handlers.start_handler.handle(cmd).await {
        Ok(session) => {
            let response = PracticeSessionResponse::from(&session);
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_practice_error(e),
    }
}

/// GET /api/practice-sessions/:id - Get session progress
pub async fn get_practice_session(
    State(handlers): State<PracticeHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .get_handler
        .handle(GetPracticeSessionQuery { session_id })
        .await
    {
        Ok(session) => {
            let response = PracticeSessionResponse::from(&session);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_practice_error(e),
    }
}

/// POST /api/practice-sessions/:id/answers - Submit an answer for evaluation
pub async fn submit_answer(
    State(handlers): State<PracticeHandlers>,
    Path(session_id): Path<String>,
    Json(req): Json<SubmitAnswerRequest>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = SubmitAnswerCommand {
        session_id,
        question_id: req.question_id,
        transcript: req.transcript,
    };

    match handlers.submit_handler.handle(cmd).await {
        Ok(result) => {
            let response: SubmitAnswerResponse = result.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_practice_error(e),
    }
}

/// GET /api/practice-sessions/:id/summary - Feedback so far
pub async fn get_session_summary(
    State(handlers): State<PracticeHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .summary_handler
        .handle(GetSessionSummaryQuery { session_id })
        .await
    {
        Ok(summary) => summary_response(session_id, summary, StatusCode::OK),
        Err(e) => handle_practice_error(e),
    }
}

/// POST /api/practice-sessions/:id/complete - End the session and get the final report
pub async fn complete_practice_session(
    State(handlers): State<PracticeHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .complete_handler
        .handle(CompletePracticeSessionCommand { session_id })
        .await
    {
        Ok(summary) => summary_response(session_id, summary, StatusCode::OK),
        Err(e) => handle_practice_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helpers
// ════════════════════════════════════════════════════════════════════════════

fn parse_session_id(raw: &str) -> Result<SessionId, Response> {
    raw.parse::<SessionId>().map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("Invalid session ID")),
        )
            .into_response()
    })
}

fn summary_response(session_id: SessionId, summary: SessionSummary, status: StatusCode) -> Response {
    let response = SessionSummaryResponse {
        session_id: session_id.to_string(),
        summary,
    };
    (status, Json(response)).into_response()
}

fn handle_practice_error(error: PracticeError) -> Response {
    let status = match &error {
        PracticeError::NotFound(_) | PracticeError::QuestionNotInSession(_) => {
            StatusCode::NOT_FOUND
        }
        PracticeError::AlreadyCompleted => StatusCode::CONFLICT,
        PracticeError::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
        PracticeError::Evaluation(_) => StatusCode::BAD_GATEWAY,
        PracticeError::Infrastructure(msg) => {
            error!(error = %msg, "Practice session storage failure");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(
                    ErrorCode::InternalError,
                    "An internal error occurred",
                )),
            )
                .into_response();
        }
    };

    let mut body = ErrorResponse::new(error.code(), error.message());
    if let PracticeError::ValidationFailed { field, .. } = &error {
        body = body.with_details(serde_json::json!({ "field": field }));
    }
    (status, Json(body)).into_response()
}
