//! Practice session configuration

use serde::Deserialize;
use std::path::PathBuf;

use crate::domain::inspection::{SessionSize, DEFAULT_PRIORITY_AREA_COUNT};

use super::error::ValidationError;

/// Practice session configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PracticeConfig {
    /// Questions per session when the client does not choose
    #[serde(default = "default_question_count")]
    pub default_question_count: u8,

    /// Number of priority areas in session reports
    #[serde(default = "default_priority_area_count")]
    pub priority_area_count: usize,

    /// YAML question bank; the built-in bank when absent
    pub question_bank_path: Option<PathBuf>,
}

impl PracticeConfig {
    /// The default session size.
    pub fn default_size(&self) -> Result<SessionSize, ValidationError> {
        SessionSize::try_from(self.default_question_count)
            .map_err(|_| ValidationError::InvalidQuestionCount(self.default_question_count))
    }

    /// Validate practice configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.default_size()?;
        if self.priority_area_count == 0 {
            return Err(ValidationError::InvalidPriorityAreaCount);
        }
        Ok(())
    }
}

impl Default for PracticeConfig {
    fn default() -> Self {
        Self {
            default_question_count: default_question_count(),
            priority_area_count: default_priority_area_count(),
            question_bank_path: None,
        }
    }
}

fn default_question_count() -> u8 {
    6
}

fn default_priority_area_count() -> usize {
    DEFAULT_PRIORITY_AREA_COUNT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_practice_config_defaults() {
        let config = PracticeConfig::default();
        assert_eq!(config.default_size(), Ok(SessionSize::Six));
        assert_eq!(config.priority_area_count, 2);
        assert!(config.question_bank_path.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_unsupported_question_count() {
        let config = PracticeConfig {
            default_question_count: 8,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidQuestionCount(8))
        );
    }

    #[test]
    fn test_rejects_zero_priority_areas() {
        let config = PracticeConfig {
            priority_area_count: 0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidPriorityAreaCount)
        );
    }
}
