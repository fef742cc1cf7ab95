//! Practice-session error types.

use crate::domain::foundation::{DomainError, ErrorCode, SessionId, ValidationError};

/// Errors raised by the practice session aggregate and its handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PracticeError {
    /// Session was not found.
    NotFound(SessionId),
    /// Answer refers to a question that is not part of the session.
    QuestionNotInSession(String),
    /// Session is completed and accepts no more answers.
    AlreadyCompleted,
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// The answer could not be evaluated.
    Evaluation(String),
    /// Infrastructure error.
    Infrastructure(String),
}

impl PracticeError {
    pub fn not_found(id: SessionId) -> Self {
        PracticeError::NotFound(id)
    }
    pub fn question_not_in_session(question_id: impl Into<String>) -> Self {
        PracticeError::QuestionNotInSession(question_id.into())
    }
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        PracticeError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn evaluation(message: impl Into<String>) -> Self {
        PracticeError::Evaluation(message.into())
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        PracticeError::Infrastructure(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            PracticeError::NotFound(_) => ErrorCode::SessionNotFound,
            PracticeError::QuestionNotInSession(_) => ErrorCode::QuestionNotFound,
            PracticeError::AlreadyCompleted => ErrorCode::SessionCompleted,
            PracticeError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            PracticeError::Evaluation(_) => ErrorCode::AIProviderError,
            PracticeError::Infrastructure(_) => ErrorCode::StorageError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            PracticeError::NotFound(id) => format!("Practice session not found: {}", id),
            PracticeError::QuestionNotInSession(id) => {
                format!("Question '{}' is not part of this session", id)
            }
            PracticeError::AlreadyCompleted => {
                "Practice session is already completed".to_string()
            }
            PracticeError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            PracticeError::Evaluation(msg) => format!("Answer evaluation failed: {}", msg),
            PracticeError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for PracticeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for PracticeError {}

impl From<ValidationError> for PracticeError {
    fn from(err: ValidationError) -> Self {
        PracticeError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for PracticeError {
    fn from(err: DomainError) -> Self {
        PracticeError::Infrastructure(err.to_string())
    }
}
