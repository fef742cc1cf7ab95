//! Judgement band value object (Inadequate through Outstanding).

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Canonical label for rank 2.
pub const REQUIRES_IMPROVEMENT_LABEL: &str = "Requires improvement to be good";

/// Short spelling of rank 2 that evaluators also emit.
pub const REQUIRES_IMPROVEMENT_ALIAS: &str = "Requires Improvement";

/// Ordinal inspection judgement. Ordering follows rank.
///
/// Serializes as its canonical label; deserialization accepts either
/// spelling of "Requires improvement" and ignores case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum JudgementBand {
    Inadequate = 1,
    RequiresImprovement = 2,
    Good = 3,
    Outstanding = 4,
}

impl JudgementBand {
    /// All bands in ascending rank.
    pub const ALL: [JudgementBand; 4] = [
        JudgementBand::Inadequate,
        JudgementBand::RequiresImprovement,
        JudgementBand::Good,
        JudgementBand::Outstanding,
    ];

    /// Numeric rank, 1 (Inadequate) to 4 (Outstanding).
    pub fn rank(&self) -> u8 {
        *self as u8
    }

    /// Creates a band from its rank, returning error if out of range.
    pub fn try_from_rank(rank: u8) -> Result<Self, ValidationError> {
        match rank {
            1 => Ok(JudgementBand::Inadequate),
            2 => Ok(JudgementBand::RequiresImprovement),
            3 => Ok(JudgementBand::Good),
            4 => Ok(JudgementBand::Outstanding),
            _ => Err(ValidationError::out_of_range("band_rank", 1, 4, rank as i32)),
        }
    }

    /// Canonical display label.
    pub fn label(&self) -> &'static str {
        match self {
            JudgementBand::Inadequate => "Inadequate",
            JudgementBand::RequiresImprovement => REQUIRES_IMPROVEMENT_LABEL,
            JudgementBand::Good => "Good",
            JudgementBand::Outstanding => "Outstanding",
        }
    }

    /// Band for an average 0-4 score using the session thresholds.
    pub fn from_score4(avg: f64) -> Self {
        if avg >= 3.6 {
            JudgementBand::Outstanding
        } else if avg >= 2.8 {
            JudgementBand::Good
        } else if avg >= 2.0 {
            JudgementBand::RequiresImprovement
        } else {
            JudgementBand::Inadequate
        }
    }
}

impl fmt::Display for JudgementBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for JudgementBand {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        if normalized == REQUIRES_IMPROVEMENT_ALIAS.to_lowercase() {
            return Ok(JudgementBand::RequiresImprovement);
        }
        JudgementBand::ALL
            .into_iter()
            .find(|band| band.label().to_lowercase() == normalized)
            .ok_or_else(|| {
                ValidationError::invalid_format("band", format!("unknown label '{}'", s.trim()))
            })
    }
}

impl Serialize for JudgementBand {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for JudgementBand {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        label.parse().map_err(serde::de::Error::custom)
    }
}
