//! End-of-session report.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::band::JudgementBand;
use super::evaluation::AnswerEvaluation;
use super::scoring::{ReadinessScore, SessionAreaResult, SessionScoring, Trajectory};

/// Everything the report view needs, computed from the answered questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub session_band: JudgementBand,
    pub session_score4: f64,
    pub trajectory: Trajectory,
    pub readiness_score: ReadinessScore,
    pub priority_areas: Vec<String>,
    pub strengths: Vec<String>,
    pub gaps: Vec<String>,
    pub action_plan: Vec<String>,
    pub conclusion: String,
    pub answered_count: usize,
    pub question_count: usize,
}

impl SessionSummary {
    /// Builds the report.
    ///
    /// `areas` and `evaluations` are the latest result per answered question,
    /// in answer order. Feedback lists are merged across evaluations with
    /// duplicates dropped, keeping first occurrence.
    ///
    /// # Edge Cases
    /// - No answers: Requires improvement at 0.0, insufficient data, readiness 0
    pub fn compose(
        areas: &[SessionAreaResult],
        evaluations: &[&AnswerEvaluation],
        question_count: usize,
        priority_area_count: usize,
    ) -> Self {
        let scores: Vec<f64> = areas.iter().map(|a| a.score4).collect();
        let band = SessionScoring::calc_session_band(&scores);
        let trajectory = SessionScoring::calc_trajectory(&scores);
        let priority_areas = SessionScoring::calc_priority_areas(areas, priority_area_count);
        let conclusion =
            SessionScoring::build_conclusion(band.session_band, &priority_areas, trajectory);

        Self {
            session_band: band.session_band,
            session_score4: band.session_score4,
            trajectory,
            readiness_score: SessionScoring::calc_readiness_score(areas),
            priority_areas,
            strengths: merge_unique(evaluations.iter().map(|e| &e.strengths)),
            gaps: merge_unique(evaluations.iter().map(|e| &e.gaps)),
            action_plan: merge_unique(evaluations.iter().map(|e| &e.action_plan)),
            conclusion,
            answered_count: areas.len(),
            question_count,
        }
    }
}

fn merge_unique<'a>(lists: impl Iterator<Item = &'a Vec<String>>) -> Vec<String> {
    let mut seen = HashSet::new();
    lists
        .flatten()
        .map(|item| item.trim())
        .filter(|item| !item.is_empty() && seen.insert(item.to_lowercase()))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evaluation(strengths: &[&str], gaps: &[&str]) -> AnswerEvaluation {
        let mut eval = AnswerEvaluation::for_band(JudgementBand::Good);
        eval.strengths = strengths.iter().map(|s| s.to_string()).collect();
        eval.gaps = gaps.iter().map(|s| s.to_string()).collect();
        eval
    }

    #[test]
    fn empty_session_reports_defaults() {
        let summary = SessionSummary::compose(&[], &[], 6, 2);

        assert_eq!(summary.session_band, JudgementBand::RequiresImprovement);
        assert_eq!(summary.session_score4, 0.0);
        assert_eq!(summary.trajectory, Trajectory::InsufficientData);
        assert_eq!(summary.readiness_score, ReadinessScore::ZERO);
        assert!(summary.priority_areas.is_empty());
        assert_eq!(summary.answered_count, 0);
        assert_eq!(summary.question_count, 6);
        assert!(summary.conclusion.contains("no single area standing out"));
    }

    #[test]
    fn composes_aggregator_outputs() {
        let areas = vec![
            SessionAreaResult::new("Safeguarding", JudgementBand::Good, 3.0),
            SessionAreaResult::new("Care planning", JudgementBand::RequiresImprovement, 2.0),
            SessionAreaResult::new("Outcomes for children", JudgementBand::Outstanding, 4.0),
        ];
        let summary = SessionSummary::compose(&areas, &[], 6, 2);

        assert_eq!(summary.session_band, JudgementBand::Good);
        assert_eq!(summary.session_score4, 3.0);
        assert_eq!(summary.trajectory, Trajectory::Improving);
        assert_eq!(
            summary.priority_areas,
            vec!["Care planning".to_string(), "Safeguarding".to_string()]
        );
        assert_eq!(summary.answered_count, 3);
        assert!(summary.conclusion.contains("judged Good"));
        assert!(summary.conclusion.contains("improving trajectory"));
    }

    #[test]
    fn feedback_lists_are_merged_without_duplicates() {
        let first = evaluation(&["Clear escalation", " "], &["No audit trail"]);
        let second = evaluation(&["clear escalation", "Child-centred"], &["No audit trail"]);
        let summary = SessionSummary::compose(&[], &[&first, &second], 5, 2);

        assert_eq!(
            summary.strengths,
            vec!["Clear escalation".to_string(), "Child-centred".to_string()]
        );
        assert_eq!(summary.gaps, vec!["No audit trail".to_string()]);
        assert!(summary.action_plan.is_empty());
    }

    #[test]
    fn serializes_band_and_trajectory_as_labels() {
        let areas = vec![SessionAreaResult::new("Leadership", JudgementBand::RequiresImprovement, 2.0)];
        let json = serde_json::to_value(SessionSummary::compose(&areas, &[], 6, 2)).unwrap();

        assert_eq!(json["session_band"], "Requires improvement to be good");
        assert_eq!(json["trajectory"], "insufficient data");
        assert_eq!(json["readiness_score"], 50);
    }
}
