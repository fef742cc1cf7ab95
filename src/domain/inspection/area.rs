//! Inspection domains and the area-name heuristics used for weighting.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Topical category of an inspection question.
///
/// The declaration order is the fixed order in which the selector visits
/// domains, so do not reorder variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InspectionDomain {
    Safeguarding,
    Leadership,
    CarePlanning,
    StaffPractice,
    Outcomes,
    RiskMissingExploitation,
}

impl InspectionDomain {
    /// All domains in selection order.
    pub const ALL: [InspectionDomain; 6] = [
        InspectionDomain::Safeguarding,
        InspectionDomain::Leadership,
        InspectionDomain::CarePlanning,
        InspectionDomain::StaffPractice,
        InspectionDomain::Outcomes,
        InspectionDomain::RiskMissingExploitation,
    ];

    /// Stable machine key, matching the serde representation.
    pub fn key(&self) -> &'static str {
        match self {
            InspectionDomain::Safeguarding => "safeguarding",
            InspectionDomain::Leadership => "leadership",
            InspectionDomain::CarePlanning => "care_planning",
            InspectionDomain::StaffPractice => "staff_practice",
            InspectionDomain::Outcomes => "outcomes",
            InspectionDomain::RiskMissingExploitation => "risk_missing_exploitation",
        }
    }

    /// Display label, also used as the area name in session results.
    pub fn label(&self) -> &'static str {
        match self {
            InspectionDomain::Safeguarding => "Safeguarding",
            InspectionDomain::Leadership => "Leadership and management",
            InspectionDomain::CarePlanning => "Care planning",
            InspectionDomain::StaffPractice => "Staff practice",
            InspectionDomain::Outcomes => "Outcomes for children",
            InspectionDomain::RiskMissingExploitation => "Risk, missing and exploitation",
        }
    }
}

impl fmt::Display for InspectionDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for InspectionDomain {
    type Err = ValidationError;

    /// Accepts the snake_case key or the display label, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        InspectionDomain::ALL
            .into_iter()
            .find(|domain| domain.key() == needle || domain.label().to_lowercase() == needle)
            .ok_or_else(|| {
                ValidationError::invalid_format("domain", format!("unknown domain '{}'", s))
            })
    }
}

/// How firmly an answer sits within its band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Borderline,
    Secure,
    Strong,
}

impl Confidence {
    /// Parses the evaluator's label, ignoring case and whitespace.
    pub fn parse_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "borderline" => Some(Confidence::Borderline),
            "secure" => Some(Confidence::Secure),
            "strong" => Some(Confidence::Strong),
            _ => None,
        }
    }
}

/// True when an area name denotes safeguarding (case-insensitive "safeguard").
///
/// Kept as a substring match on the name: results carry free-text area
/// names, not domain enums.
pub fn is_safeguarding_area(area: &str) -> bool {
    area.to_lowercase().contains("safeguard")
}

/// True when an area name denotes leadership (case-insensitive "lead").
pub fn is_leadership_area(area: &str) -> bool {
    area.to_lowercase().contains("lead")
}
