//! Follow-up decision engine.
//!
//! Decides whether the "inspector" should probe an answer further. Weak
//! answers are checked for the evidence inspectors look for (a concrete
//! example, monitoring, impact, and for safeguarding the named roles and
//! referral routes); the first missing piece picks the follow-up question.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::area::is_safeguarding_area;
use super::evaluation::AnswerEvaluation;

/// Attempt index at which no further follow-up is asked.
pub const MAX_FOLLOW_UP_ATTEMPTS: u32 = 2;

/// Scores at or below this get the evidence checks.
const PROBE_SCORE_THRESHOLD: f64 = 3.0;

/// Scores at or below this get a follow-up when the evaluator found gaps.
const GAP_SCORE_THRESHOLD: f64 = 4.0;

static EXAMPLE_MARKERS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\be\.g\.|\b(for example|for instance|recently|last (week|month|year|term)|yesterday|one child|a young person|on one occasion|a time when)\b",
    )
    .expect("example marker pattern is valid")
});

static MONITORING_MARKERS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(monitor\w*|audit\w*|supervision|oversight|quality assur\w*|spot[- ]check\w*|track\w*)\b")
        .expect("monitoring marker pattern is valid")
});

static IMPACT_MARKERS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(impact\w*|outcome\w*|improv\w*|difference|progress\w*|as a result)\b")
        .expect("impact marker pattern is valid")
});

static SAFEGUARDING_MARKERS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(designated|dsl|lado|referral\w*|refer(red)?|strategy (meeting|discussion)|multi[- ]agency|section 47|local authority)\b",
    )
    .expect("safeguarding marker pattern is valid")
});

const NO_EXAMPLE_QUESTION: &str =
    "Can you give me a specific, recent example of when that happened in your home?";
const NO_MONITORING_QUESTION: &str =
    "How do you know that is happening consistently? What monitoring or oversight do you have in place?";
const NO_IMPACT_QUESTION: &str =
    "What difference has that made for the children? How do you know it has had an impact?";
const SAFEGUARDING_VAGUE_QUESTION: &str =
    "Talk me through exactly who you would contact and when. Who is your designated safeguarding lead, and when would you involve the LADO?";
const LOW_SCORE_FALLBACK_QUESTION: &str =
    "Can you tell me more about how that works in practice in your home?";

/// Why a follow-up was or was not asked. Serializes to its reason code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FollowUpReason {
    MaxAttempts,
    NoExample,
    NoMonitoring,
    NoImpact,
    SafeguardingVague,
    LowScore,
    HasGaps,
    ScoreSufficient,
}

impl FollowUpReason {
    pub fn code(&self) -> &'static str {
        match self {
            FollowUpReason::MaxAttempts => "max_attempts",
            FollowUpReason::NoExample => "no_example",
            FollowUpReason::NoMonitoring => "no_monitoring",
            FollowUpReason::NoImpact => "no_impact",
            FollowUpReason::SafeguardingVague => "safeguarding_vague",
            FollowUpReason::LowScore => "low_score",
            FollowUpReason::HasGaps => "has_gaps",
            FollowUpReason::ScoreSufficient => "score_sufficient",
        }
    }
}

impl fmt::Display for FollowUpReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Inputs to a follow-up decision.
#[derive(Debug, Clone, Copy)]
pub struct FollowUpContext<'a> {
    /// Rubric score (0-5) of the answer just given.
    pub score: f64,
    pub transcript: &'a str,
    pub evaluation: &'a AnswerEvaluation,
    /// Domain or area name; only its "safeguard" substring matters.
    pub domain: &'a str,
    /// Zero for the first answer, one for the first follow-up answer, ...
    pub attempt_index: u32,
}

/// Outcome of a follow-up decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowUpDecision {
    pub should_follow_up: bool,
    pub reason: FollowUpReason,
    /// Question to ask next; empty when no follow-up is needed.
    pub question: String,
}

impl FollowUpDecision {
    fn ask(reason: FollowUpReason, question: impl Into<String>) -> Self {
        Self {
            should_follow_up: true,
            reason,
            question: question.into(),
        }
    }

    fn stop(reason: FollowUpReason) -> Self {
        Self {
            should_follow_up: false,
            reason,
            question: String::new(),
        }
    }
}

/// Decides whether an answer needs a follow-up; the first matching rule wins.
pub fn detect_follow_up_need(ctx: &FollowUpContext<'_>) -> FollowUpDecision {
    if ctx.attempt_index >= MAX_FOLLOW_UP_ATTEMPTS {
        return FollowUpDecision::stop(FollowUpReason::MaxAttempts);
    }

    if ctx.score <= PROBE_SCORE_THRESHOLD {
        let transcript = ctx.transcript;
        if !EXAMPLE_MARKERS.is_match(transcript) {
            return FollowUpDecision::ask(FollowUpReason::NoExample, NO_EXAMPLE_QUESTION);
        }
        if !MONITORING_MARKERS.is_match(transcript) {
            return FollowUpDecision::ask(FollowUpReason::NoMonitoring, NO_MONITORING_QUESTION);
        }
        if !IMPACT_MARKERS.is_match(transcript) {
            return FollowUpDecision::ask(FollowUpReason::NoImpact, NO_IMPACT_QUESTION);
        }
        if is_safeguarding_area(ctx.domain) && !SAFEGUARDING_MARKERS.is_match(transcript) {
            return FollowUpDecision::ask(
                FollowUpReason::SafeguardingVague,
                SAFEGUARDING_VAGUE_QUESTION,
            );
        }
        let question = ctx
            .evaluation
            .first_follow_up_question()
            .unwrap_or(LOW_SCORE_FALLBACK_QUESTION);
        return FollowUpDecision::ask(FollowUpReason::LowScore, question);
    }

    if ctx.score <= GAP_SCORE_THRESHOLD && !ctx.evaluation.gaps.is_empty() {
        if let Some(question) = ctx.evaluation.first_follow_up_question() {
            return FollowUpDecision::ask(FollowUpReason::HasGaps, question);
        }
    }

    FollowUpDecision::stop(FollowUpReason::ScoreSufficient)
}
