//! Session scoring - band, trajectory, readiness and priority areas.
//!
//! Pure functions over per-question results. None of them fail: empty or
//! degenerate input produces an explicit default instead.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::area::{is_leadership_area, is_safeguarding_area, Confidence};
use super::band::JudgementBand;

/// Number of priority areas reported when the caller does not choose.
pub const DEFAULT_PRIORITY_AREA_COUNT: usize = 2;

/// Upper bound of the per-question 0-4 score.
pub const MAX_SCORE4: f64 = 4.0;

const SAFEGUARDING_WEIGHT: f64 = 1.3;
const LEADERSHIP_WEIGHT: f64 = 1.1;
const CONFIDENCE_BONUS: f64 = 5.0;
const SAFEGUARDING_INADEQUATE_PENALTY: u8 = 10;
const SAFEGUARDING_RI_PENALTY: u8 = 5;

/// Clamps a score into `[0, 4]`; NaN counts as 0.
pub fn clamp_score4(score: f64) -> f64 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, MAX_SCORE4)
    }
}

/// Result for one answered question, as fed to the aggregator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionAreaResult {
    pub area: String,
    pub band: JudgementBand,
    pub score4: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Confidence>,
}

impl SessionAreaResult {
    pub fn new(area: impl Into<String>, band: JudgementBand, score4: f64) -> Self {
        Self {
            area: area.into(),
            band,
            score4,
            confidence: None,
        }
    }

    pub fn with_confidence(mut self, confidence: Confidence) -> Self {
        self.confidence = Some(confidence);
        self
    }
}

/// Session-level band and its average 0-4 score (one decimal place).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionBand {
    pub session_band: JudgementBand,
    pub session_score4: f64,
}

/// Coarse direction of travel across a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trajectory {
    #[serde(rename = "improving")]
    Improving,
    #[serde(rename = "declining")]
    Declining,
    #[serde(rename = "stable")]
    Stable,
    #[serde(rename = "insufficient data")]
    InsufficientData,
}

impl Trajectory {
    pub fn label(&self) -> &'static str {
        match self {
            Trajectory::Improving => "improving",
            Trajectory::Declining => "declining",
            Trajectory::Stable => "stable",
            Trajectory::InsufficientData => "insufficient data",
        }
    }

    /// Phrase used in the conclusion. Insufficient data reads as stable.
    pub fn phrase(&self) -> &'static str {
        match self {
            Trajectory::Improving => "improving trajectory",
            Trajectory::Declining => "declining trajectory",
            Trajectory::Stable | Trajectory::InsufficientData => "stable trajectory",
        }
    }
}

impl fmt::Display for Trajectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Readiness on a 0-100 scale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReadinessScore(u8);

impl ReadinessScore {
    pub const ZERO: Self = Self(0);

    /// Creates a score, clamping to 100.
    pub fn new(value: u8) -> Self {
        Self(value.min(100))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for ReadinessScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/100", self.0)
    }
}

/// Aggregation rules for a practice session.
pub struct SessionScoring;

impl SessionScoring {
    /// Band and rounded average for a list of 0-4 scores.
    ///
    /// # Edge Cases
    /// - Empty scores: Requires improvement with a score of 0
    pub fn calc_session_band(scores: &[f64]) -> SessionBand {
        if scores.is_empty() {
            return SessionBand {
                session_band: JudgementBand::RequiresImprovement,
                session_score4: 0.0,
            };
        }

        let avg = scores.iter().copied().map(clamp_score4).sum::<f64>() / scores.len() as f64;

        SessionBand {
            session_band: JudgementBand::from_score4(avg),
            session_score4: (avg * 10.0).round() / 10.0,
        }
    }

    /// Compares the last score with the first; interior scores are ignored.
    pub fn calc_trajectory(scores: &[f64]) -> Trajectory {
        if scores.len() < 3 {
            return Trajectory::InsufficientData;
        }

        let delta = scores[scores.len() - 1] - scores[0];
        if delta >= 1.0 {
            Trajectory::Improving
        } else if delta <= -1.0 {
            Trajectory::Declining
        } else {
            Trajectory::Stable
        }
    }

    /// Weighted readiness from band rank, confidence and area weighting,
    /// with a penalty for weak safeguarding.
    pub fn calc_readiness_score(areas: &[SessionAreaResult]) -> ReadinessScore {
        if areas.is_empty() {
            return ReadinessScore::ZERO;
        }

        let (weighted_sum, weight_total) =
            areas.iter().fold((0.0_f64, 0.0_f64), |(sum, total), area| {
                let base = f64::from(area.band.rank()) * 25.0;
                let bonus = match area.confidence {
                    Some(Confidence::Strong) => CONFIDENCE_BONUS,
                    Some(Confidence::Borderline) => -CONFIDENCE_BONUS,
                    _ => 0.0,
                };
                let weight = area_weight(&area.area);
                (sum + (base + bonus) * weight, total + weight)
            });

        let mut score = (weighted_sum / weight_total).round().clamp(0.0, 100.0) as u8;

        let safeguarding_ranks = || {
            areas
                .iter()
                .filter(|a| is_safeguarding_area(&a.area))
                .map(|a| a.band.rank())
        };
        if safeguarding_ranks().any(|rank| rank == 1) {
            score = score.saturating_sub(SAFEGUARDING_INADEQUATE_PENALTY);
        } else if safeguarding_ranks().any(|rank| rank == 2) {
            score = score.saturating_sub(SAFEGUARDING_RI_PENALTY);
        }

        ReadinessScore::new(score)
    }

    /// Names of the `top_n` areas with the lowest average score.
    ///
    /// Ties keep the order in which areas were first seen.
    pub fn calc_priority_areas(areas: &[SessionAreaResult], top_n: usize) -> Vec<String> {
        let mut groups: Vec<(&str, f64, usize)> = Vec::new();
        for result in areas {
            let score = clamp_score4(result.score4);
            match groups.iter_mut().find(|(name, _, _)| *name == result.area) {
                Some((_, sum, count)) => {
                    *sum += score;
                    *count += 1;
                }
                None => groups.push((result.area.as_str(), score, 1)),
            }
        }

        let mut averages: Vec<(&str, f64)> = groups
            .into_iter()
            .map(|(name, sum, count)| (name, sum / count as f64))
            .collect();
        averages.sort_by(|a, b| a.1.total_cmp(&b.1));

        averages
            .into_iter()
            .take(top_n)
            .map(|(name, _)| name.to_string())
            .collect()
    }

    /// Closing paragraph for the summary report.
    pub fn build_conclusion(
        band: JudgementBand,
        priority_areas: &[String],
        trajectory: Trajectory,
    ) -> String {
        let priorities = if priority_areas.is_empty() {
            "no single area standing out as a priority".to_string()
        } else {
            format!("priority areas for development: {}", priority_areas.join(", "))
        };

        format!(
            "On the evidence presented in this practice inspection, the home would be likely \
             to be judged {}. Responses show a {} across the session, with {}. Leaders should \
             be ready to evidence the impact of their actions on children's experiences and \
             progress.",
            band.label(),
            trajectory.phrase(),
            priorities
        )
    }
}

fn area_weight(area: &str) -> f64 {
    if is_safeguarding_area(area) {
        SAFEGUARDING_WEIGHT
    } else if is_leadership_area(area) {
        LEADERSHIP_WEIGHT
    } else {
        1.0
    }
}
