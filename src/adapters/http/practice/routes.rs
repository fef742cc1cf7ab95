//! Route configuration for practice session endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{
    complete_practice_session, get_practice_session, get_session_summary, start_practice_session,
    submit_answer, PracticeHandlers,
};

/// Creates the practice session router, to be nested under `/api/practice-sessions`.
///
/// Routes:
/// - `POST /` - Start a session
/// - `GET /:id` - Session progress
/// - `POST /:id/answers` - Submit an answer
/// - `GET /:id/summary` - Feedback so far
/// - `POST /:id/complete` - Complete and get the final report
pub fn practice_routes(handlers: PracticeHandlers) -> Router {
    Router::new()
        .route("/", post(start_practice_session))
        .route("/:id", get(get_practice_session))
        .route("/:id/answers", post(submit_answer))
        .route("/:id/summary", get(get_session_summary))
        .route("/:id/complete", post(complete_practice_session))
        .with_state(handlers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError, RubricAnswerEvaluator};
    use crate::adapters::storage::InMemoryPracticeSessionRepository;
    use crate::domain::inspection::{QuestionBank, SessionSize};
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_router(provider: MockAIProvider) -> Router {
        let handlers = PracticeHandlers::from_ports(
            Arc::new(InMemoryPracticeSessionRepository::new()),
            Arc::new(RubricAnswerEvaluator::new(Arc::new(provider), 600)),
            Arc::new(QuestionBank::standard()),
            SessionSize::Six,
            2,
        );
        practice_routes(handlers)
    }

    fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn start(app: &Router, body: serde_json::Value) -> serde_json::Value {
        let response = app.clone().oneshot(json_request("POST", "/", body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        body_json(response).await
    }

    #[tokio::test]
    async fn start_uses_default_size() {
        let app = test_router(MockAIProvider::new());

        let session = start(&app, serde_json::json!({})).await;

        assert_eq!(session["question_count"], 6);
        assert_eq!(session["status"], "in_progress");
        assert_eq!(session["questions"].as_array().unwrap().len(), 6);
        assert_eq!(session["next_question"]["id"], session["questions"][0]["id"]);
    }

    #[tokio::test]
    async fn start_rejects_unsupported_size() {
        let app = test_router(MockAIProvider::new());

        let response = app
            .oneshot(json_request("POST", "/", serde_json::json!({"question_count": 9})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], "VALIDATION_FAILED");
    }

    #[tokio::test]
    async fn get_returns_404_for_unknown_session() {
        let app = test_router(MockAIProvider::new());

        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("/{}", uuid::Uuid::new_v4()))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn get_returns_400_for_malformed_id() {
        let app = test_router(MockAIProvider::new());

        let response = app
            .oneshot(Request::builder().uri("/not-a-uuid").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn answer_is_evaluated_and_follow_up_decided() {
        let app = test_router(MockAIProvider::new());
        let session = start(&app, serde_json::json!({"question_count": 5})).await;
        let id = session["id"].as_str().unwrap();
        let question_id = session["questions"][0]["id"].as_str().unwrap();

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                &format!("/{}/answers", id),
                serde_json::json!({
                    "question_id": question_id,
                    "transcript": "We follow our policies and procedures."
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["attempt_index"], 0);
        assert_eq!(body["evaluation"]["band"], "Requires improvement to be good");
        assert_eq!(body["follow_up"]["should_follow_up"], true);
        assert_eq!(body["follow_up"]["reason"], "no_example");
    }

    #[tokio::test]
    async fn answer_to_foreign_question_is_404() {
        let app = test_router(MockAIProvider::new());
        let session = start(&app, serde_json::json!({})).await;
        let id = session["id"].as_str().unwrap();

        let response = app
            .oneshot(json_request(
                "POST",
                &format!("/{}/answers", id),
                serde_json::json!({"question_id": "does-not-exist", "transcript": "x"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["code"], "QUESTION_NOT_FOUND");
    }

    #[tokio::test]
    async fn provider_failure_is_bad_gateway() {
        let app = test_router(MockAIProvider::new().with_error(MockError::AuthenticationFailed));
        let session = start(&app, serde_json::json!({})).await;
        let id = session["id"].as_str().unwrap();
        let question_id = session["questions"][0]["id"].as_str().unwrap();

        let response = app
            .oneshot(json_request(
                "POST",
                &format!("/{}/answers", id),
                serde_json::json!({"question_id": question_id, "transcript": "An answer"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn complete_then_answer_is_conflict() {
        let app = test_router(MockAIProvider::new());
        let session = start(&app, serde_json::json!({})).await;
        let id = session["id"].as_str().unwrap();
        let question_id = session["questions"][0]["id"].as_str().unwrap();

        let response = app
            .clone()
            .oneshot(json_request("POST", &format!("/{}/complete", id), serde_json::json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let summary = body_json(response).await;
        assert_eq!(summary["session_id"], id);
        assert_eq!(summary["answered_count"], 0);

        let response = app
            .oneshot(json_request(
                "POST",
                &format!("/{}/answers", id),
                serde_json::json!({"question_id": question_id, "transcript": "Late"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn summary_available_mid_session() {
        let app = test_router(MockAIProvider::new());
        let session = start(&app, serde_json::json!({})).await;
        let id = session["id"].as_str().unwrap();

        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("/{}/summary", id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["question_count"], 6);
        assert!(body["conclusion"].is_string());
    }
}
