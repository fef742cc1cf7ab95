//! Inspection module - the deterministic core of a practice inspection.
//!
//! Question selection is seeded from the session so a session always sees
//! the same questions. Scoring, follow-up and summary rules are pure
//! functions over answer results; nothing in here performs I/O except
//! loading a question bank from YAML.

mod area;
mod band;
mod evaluation;
mod follow_up;
mod question_bank;
mod rng;
mod scoring;
mod selector;
mod summary;

pub use area::{is_leadership_area, is_safeguarding_area, Confidence, InspectionDomain};
pub use band::JudgementBand;
pub use evaluation::{
    build_evaluation_prompt, parse_evaluation, AnswerEvaluation, EvaluationParseError,
    EvaluationPrompt, MAX_RUBRIC_SCORE,
};
pub use follow_up::{
    detect_follow_up_need, FollowUpContext, FollowUpDecision, FollowUpReason,
    MAX_FOLLOW_UP_ATTEMPTS,
};
pub use question_bank::{BankQuestion, QuestionBank, QuestionBankError};
pub use rng::{hash_seed, shuffle, SessionRng};
pub use scoring::{
    clamp_score4, ReadinessScore, SessionAreaResult, SessionBand, SessionScoring, Trajectory,
    DEFAULT_PRIORITY_AREA_COUNT,
};
pub use selector::{QuestionSelector, SessionSize, FALLBACK_SEED};
pub use summary::SessionSummary;
