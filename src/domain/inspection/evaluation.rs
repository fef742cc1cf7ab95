//! Answer evaluation - rubric prompt and coercion of the evaluator's reply.
//!
//! The LLM is asked for a JSON object, but replies drift: fenced code
//! blocks, numbers as strings, a single string where a list was asked for,
//! the short spelling of "Requires improvement". [`parse_evaluation`]
//! accepts all of these and always yields a clamped, well-typed
//! [`AnswerEvaluation`], or an error when no usable judgement is present.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use super::area::Confidence;
use super::band::JudgementBand;
use super::question_bank::BankQuestion;
use super::scoring::clamp_score4;

/// Upper bound of the evaluator's rubric score.
pub const MAX_RUBRIC_SCORE: f64 = 5.0;

/// Structured feedback for one answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerEvaluation {
    /// Rubric score on a 0-5 scale; drives follow-up decisions.
    pub score: f64,
    /// Score on the 0-4 band scale; drives session aggregation.
    pub score4: f64,
    pub band: JudgementBand,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Confidence>,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub gaps: Vec<String>,
    #[serde(default)]
    pub follow_up_questions: Vec<String>,
    #[serde(default)]
    pub action_plan: Vec<String>,
    #[serde(default)]
    pub summary: String,
}

impl AnswerEvaluation {
    /// Minimal evaluation with the given band; scores follow the band rank.
    pub fn for_band(band: JudgementBand) -> Self {
        let score4 = f64::from(band.rank());
        Self {
            score: score4 * MAX_RUBRIC_SCORE / 4.0,
            score4,
            band,
            confidence: None,
            strengths: Vec::new(),
            gaps: Vec::new(),
            follow_up_questions: Vec::new(),
            action_plan: Vec::new(),
            summary: String::new(),
        }
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.score = clamp_rubric(score);
        self
    }

    pub fn with_gaps(mut self, gaps: Vec<String>) -> Self {
        self.gaps = gaps;
        self
    }

    pub fn with_follow_up_questions(mut self, questions: Vec<String>) -> Self {
        self.follow_up_questions = questions;
        self
    }

    /// First suggested follow-up that is not blank.
    pub fn first_follow_up_question(&self) -> Option<&str> {
        self.follow_up_questions
            .iter()
            .map(|q| q.trim())
            .find(|q| !q.is_empty())
    }
}

/// Errors raised when the evaluator's reply has no usable judgement.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluationParseError {
    #[error("evaluator reply contained no JSON object")]
    NoJsonObject,

    #[error("evaluator reply was not valid JSON: {0}")]
    InvalidJson(String),

    #[error("evaluator reply had neither a band nor a score")]
    MissingJudgement,
}

/// System and user prompts for one evaluation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationPrompt {
    pub system: String,
    pub user: String,
}

const RUBRIC_SYSTEM_PROMPT: &str = "You are an experienced Ofsted social care inspector \
assessing a registered manager of a children's home during a practice inspection interview. \
Judge the answer against the Social Care Common Inspection Framework. Strong answers give \
specific, recent examples; explain how practice is monitored; evidence the impact on \
children; and, for safeguarding, name roles, thresholds and referral routes.\n\n\
Respond with a single JSON object and nothing else, using exactly these keys:\n\
  \"band\": one of \"Outstanding\", \"Good\", \"Requires improvement to be good\", \"Inadequate\"\n\
  \"score\": number from 0 to 5 for the quality of this answer\n\
  \"score4\": number from 0 to 4 placing the answer within the bands\n\
  \"confidence\": one of \"borderline\", \"secure\", \"strong\"\n\
  \"strengths\": array of short strings\n\
  \"gaps\": array of short strings\n\
  \"follow_up_questions\": array of probing questions an inspector would ask next\n\
  \"action_plan\": array of concrete actions for the manager\n\
  \"summary\": two or three sentences of feedback";

/// Builds the rubric prompt for one answer.
pub fn build_evaluation_prompt(
    question: &BankQuestion,
    transcript: &str,
    attempt_index: u32,
) -> EvaluationPrompt {
    let transcript = transcript.trim();
    let answer = if transcript.is_empty() {
        "(no answer given)"
    } else {
        transcript
    };
    let attempt_note = if attempt_index == 0 {
        String::new()
    } else {
        format!(
            "\nThis is follow-up answer {} to the same question; judge the answer as a whole.",
            attempt_index
        )
    };

    EvaluationPrompt {
        system: RUBRIC_SYSTEM_PROMPT.to_string(),
        user: format!(
            "Inspection area: {}\nQuestion: {}\nManager's answer:\n\"\"\"\n{}\n\"\"\"{}",
            question.domain.label(),
            question.text,
            answer,
            attempt_note
        ),
    }
}

/// Parses and coerces the evaluator's raw reply.
pub fn parse_evaluation(raw: &str) -> Result<AnswerEvaluation, EvaluationParseError> {
    let json = extract_json_object(raw).ok_or(EvaluationParseError::NoJsonObject)?;
    let value: Value = serde_json::from_str(json)
        .map_err(|e| EvaluationParseError::InvalidJson(e.to_string()))?;
    let obj = value.as_object().ok_or(EvaluationParseError::NoJsonObject)?;

    let band = obj
        .get("band")
        .and_then(Value::as_str)
        .and_then(|label| label.parse::<JudgementBand>().ok());
    let score4 = number_field(obj, "score4").map(clamp_score4);
    let score = number_field(obj, "score").map(clamp_rubric);

    let (band, score4) = match (band, score4, score) {
        (Some(band), Some(score4), _) => (band, score4),
        (Some(band), None, _) => (band, f64::from(band.rank())),
        (None, Some(score4), _) => (JudgementBand::from_score4(score4), score4),
        (None, None, Some(score)) => {
            let score4 = clamp_score4(score * 4.0 / MAX_RUBRIC_SCORE);
            (JudgementBand::from_score4(score4), score4)
        }
        (None, None, None) => return Err(EvaluationParseError::MissingJudgement),
    };
    let score = score.unwrap_or(score4 * MAX_RUBRIC_SCORE / 4.0);

    Ok(AnswerEvaluation {
        score,
        score4,
        band,
        confidence: obj
            .get("confidence")
            .and_then(Value::as_str)
            .and_then(Confidence::parse_label),
        strengths: string_list(obj, "strengths"),
        gaps: string_list(obj, "gaps"),
        follow_up_questions: string_list(obj, "follow_up_questions"),
        action_plan: string_list(obj, "action_plan"),
        summary: obj
            .get("summary")
            .and_then(Value::as_str)
            .map(|s| s.trim().to_string())
            .unwrap_or_default(),
    })
}

fn clamp_rubric(score: f64) -> f64 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, MAX_RUBRIC_SCORE)
    }
}

/// Slice from the first `{` to the last `}`, which also drops code fences.
fn extract_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (end > start).then(|| &raw[start..=end])
}

fn number_field(obj: &Map<String, Value>, key: &str) -> Option<f64> {
    let number = match obj.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

fn string_list(obj: &Map<String, Value>, key: &str) -> Vec<String> {
    let items: Vec<String> = match obj.get(key) {
        Some(Value::Array(values)) => values
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        Some(Value::String(s)) => vec![s.clone()],
        _ => Vec::new(),
    };
    items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::inspection::area::InspectionDomain;

    #[test]
    fn parses_well_formed_reply() {
        let raw = r#"{
            "band": "Good",
            "score": 4,
            "score4": 3.2,
            "confidence": "secure",
            "strengths": ["Clear escalation route"],
            "gaps": ["No example of impact"],
            "follow_up_questions": ["What changed for the child?"],
            "action_plan": ["Record outcomes after each referral"],
            "summary": "A solid answer."
        }"#;
        let eval = parse_evaluation(raw).unwrap();
        assert_eq!(eval.band, JudgementBand::Good);
        assert_eq!(eval.score, 4.0);
        assert_eq!(eval.score4, 3.2);
        assert_eq!(eval.confidence, Some(Confidence::Secure));
        assert_eq!(eval.gaps, vec!["No example of impact"]);
        assert_eq!(eval.first_follow_up_question(), Some("What changed for the child?"));
        assert_eq!(eval.summary, "A solid answer.");
    }

    #[test]
    fn strips_code_fences_and_prose() {
        let raw = "Here is my assessment:\n```json\n{\"band\": \"Outstanding\", \"score4\": 4}\n```";
        let eval = parse_evaluation(raw).unwrap();
        assert_eq!(eval.band, JudgementBand::Outstanding);
        assert_eq!(eval.score, 5.0);
    }

    #[test]
    fn accepts_short_requires_improvement_label() {
        let eval = parse_evaluation(r#"{"band": "Requires Improvement"}"#).unwrap();
        assert_eq!(eval.band, JudgementBand::RequiresImprovement);
        assert_eq!(eval.score4, 2.0);
        assert_eq!(eval.score, 2.5);
    }

    #[test]
    fn coerces_string_numbers_and_single_string_lists() {
        let raw = r#"{"score": "2", "score4": "1.5", "gaps": "Vague on monitoring"}"#;
        let eval = parse_evaluation(raw).unwrap();
        assert_eq!(eval.score, 2.0);
        assert_eq!(eval.score4, 1.5);
        assert_eq!(eval.band, JudgementBand::Inadequate);
        assert_eq!(eval.gaps, vec!["Vague on monitoring"]);
    }

    #[test]
    fn derives_band_from_rubric_score_alone() {
        let eval = parse_evaluation(r#"{"score": 4}"#).unwrap();
        assert_eq!(eval.score4, 3.2);
        assert_eq!(eval.band, JudgementBand::Good);
    }

    #[test]
    fn clamps_out_of_range_scores() {
        let eval = parse_evaluation(r#"{"band": "Good", "score": 11, "score4": -2}"#).unwrap();
        assert_eq!(eval.score, 5.0);
        assert_eq!(eval.score4, 0.0);
    }

    #[test]
    fn ignores_unknown_confidence_and_blank_items() {
        let raw = r#"{"band": "Good", "confidence": "certain", "strengths": ["", "  Warm  ", 3]}"#;
        let eval = parse_evaluation(raw).unwrap();
        assert_eq!(eval.confidence, None);
        assert_eq!(eval.strengths, vec!["Warm"]);
    }

    #[test]
    fn rejects_reply_without_json() {
        assert_eq!(
            parse_evaluation("I cannot assess this."),
            Err(EvaluationParseError::NoJsonObject)
        );
    }

    #[test]
    fn rejects_reply_without_judgement() {
        assert_eq!(
            parse_evaluation(r#"{"summary": "hmm"}"#),
            Err(EvaluationParseError::MissingJudgement)
        );
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            parse_evaluation("{band: Good}"),
            Err(EvaluationParseError::InvalidJson(_))
        ));
    }

    #[test]
    fn prompt_includes_area_question_and_answer() {
        let question = BankQuestion::new("sg-01", InspectionDomain::Safeguarding, "Who is your DSL?");
        let prompt = build_evaluation_prompt(&question, "  Our deputy manager.  ", 0);
        assert!(prompt.system.contains("\"follow_up_questions\""));
        assert!(prompt.user.contains("Inspection area: Safeguarding"));
        assert!(prompt.user.contains("Who is your DSL?"));
        assert!(prompt.user.contains("Our deputy manager."));
        assert!(!prompt.user.contains("follow-up answer"));
    }

    #[test]
    fn prompt_marks_follow_up_attempts_and_empty_answers() {
        let question = BankQuestion::new("oc-01", InspectionDomain::Outcomes, "What progress?");
        let prompt = build_evaluation_prompt(&question, "   ", 1);
        assert!(prompt.user.contains("(no answer given)"));
        assert!(prompt.user.contains("follow-up answer 1"));
    }

    #[test]
    fn first_follow_up_skips_blank_suggestions() {
        let eval = AnswerEvaluation::for_band(JudgementBand::Good)
            .with_follow_up_questions(vec!["  ".into(), "Who signs it off?".into()]);
        assert_eq!(eval.first_follow_up_question(), Some("Who signs it off?"));
    }
}
