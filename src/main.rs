//! Inspection Coach API server.

use std::sync::Arc;

use axum::{http::HeaderValue, Router};
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use inspection_coach::adapters::ai::{
    AnthropicConfig, AnthropicProvider, MockAIProvider, RubricAnswerEvaluator,
};
use inspection_coach::adapters::http::{api_router, PracticeHandlers};
use inspection_coach::adapters::storage::InMemoryPracticeSessionRepository;
use inspection_coach::config::{
    AiConfig, AiProvider, AppConfig, ConfigError, ServerConfig,
    ValidationError as ConfigValidationError,
};
use inspection_coach::domain::inspection::{QuestionBank, QuestionBankError};
use inspection_coach::ports::{AIError, AIProvider as CompletionProvider};

#[derive(Debug, Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(#[from] ConfigValidationError),

    #[error(transparent)]
    QuestionBank(#[from] QuestionBankError),

    #[error("question bank contains no questions")]
    EmptyQuestionBank,

    #[error("AI provider setup failed: {0}")]
    Provider(#[from] AIError),

    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    let bank = Arc::new(load_question_bank(&config)?);
    let provider = build_provider(&config.ai)?;
    let evaluator = Arc::new(RubricAnswerEvaluator::new(provider, config.ai.max_tokens));
    let repository = Arc::new(InMemoryPracticeSessionRepository::new());

    let handlers = PracticeHandlers::from_ports(
        repository,
        evaluator,
        bank,
        config.practice.default_size()?,
        config.practice.priority_area_count,
    );
    let app = with_middleware(api_router(handlers), &config.server);

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, environment = ?config.server.environment, "Inspection coach listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().compact())
            .init();
    }
}

fn load_question_bank(config: &AppConfig) -> Result<QuestionBank, StartupError> {
    let bank = match &config.practice.question_bank_path {
        Some(path) => {
            let bank = QuestionBank::from_yaml_file(path)?;
            info!(path = %path.display(), questions = bank.len(), "Loaded question bank");
            bank
        }
        None => QuestionBank::standard(),
    };

    if bank.is_empty() {
        return Err(StartupError::EmptyQuestionBank);
    }
    Ok(bank)
}

fn build_provider(ai: &AiConfig) -> Result<Arc<dyn CompletionProvider>, StartupError> {
    match ai.provider {
        AiProvider::Mock => {
            warn!("Using mock AI provider; answers receive canned evaluations");
            Ok(Arc::new(MockAIProvider::new()))
        }
        AiProvider::Anthropic => {
            let api_key = ai
                .anthropic_api_key
                .clone()
                .ok_or(ConfigValidationError::MissingRequired("ANTHROPIC_API_KEY"))?;

            let mut anthropic = AnthropicConfig::new(api_key)
                .with_timeout(ai.timeout())
                .with_max_retries(ai.max_retries)
                .with_default_max_tokens(ai.max_tokens);
            if let Some(model) = &ai.model {
                anthropic = anthropic.with_model(model.clone());
            }
            if let Some(base_url) = &ai.base_url {
                anthropic = anthropic.with_base_url(base_url.clone());
            }

            info!(model = %anthropic.model, "Using Anthropic provider");
            Ok(Arc::new(AnthropicProvider::new(anthropic)?))
        }
    }
}

fn with_middleware(app: Router, server: &ServerConfig) -> Router {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = if origins.is_empty() {
        CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
    } else {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    app.layer(TimeoutLayer::new(std::time::Duration::from_secs(
        server.request_timeout_secs,
    )))
    .layer(cors)
    .layer(TraceLayer::new_for_http())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = tokio::signal::ctrl_c() => {}
                }
            }
            Err(_) => {
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
    info!("Shutdown signal received");
}
