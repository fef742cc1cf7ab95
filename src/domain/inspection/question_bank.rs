//! Question bank - the static catalog of inspection questions.
//!
//! A bank is plain configuration: built once at startup (either the
//! built-in [`QuestionBank::standard`] catalog or a YAML file) and shared
//! read-only behind an `Arc`. Tests build small fixture banks directly.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

use super::area::InspectionDomain;

/// A single catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankQuestion {
    pub id: String,
    pub domain: InspectionDomain,
    pub text: String,
}

impl BankQuestion {
    pub fn new(id: impl Into<String>, domain: InspectionDomain, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            domain,
            text: text.into(),
        }
    }
}

/// Errors raised while building a bank.
#[derive(Debug, Error)]
pub enum QuestionBankError {
    #[error("duplicate question id '{0}'")]
    DuplicateId(String),

    #[error("question '{id}' has an empty {field}")]
    EmptyField { id: String, field: &'static str },

    #[error("failed to read question bank: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse question bank: {0}")]
    Parse(#[from] serde_yaml::Error),
}

#[derive(Debug, Deserialize)]
struct BankFile {
    questions: Vec<BankQuestion>,
}

/// Read-only catalog of questions, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBank {
    questions: Vec<BankQuestion>,
}

impl QuestionBank {
    /// Builds a bank, rejecting blank ids/text and duplicate ids.
    pub fn new(questions: Vec<BankQuestion>) -> Result<Self, QuestionBankError> {
        let mut seen = HashSet::new();
        for question in &questions {
            if question.id.trim().is_empty() {
                return Err(QuestionBankError::EmptyField {
                    id: question.id.clone(),
                    field: "id",
                });
            }
            if question.text.trim().is_empty() {
                return Err(QuestionBankError::EmptyField {
                    id: question.id.clone(),
                    field: "text",
                });
            }
            if !seen.insert(question.id.as_str()) {
                return Err(QuestionBankError::DuplicateId(question.id.clone()));
            }
        }
        Ok(Self { questions })
    }

    /// Parses a bank from YAML of the form `questions: [{id, domain, text}]`.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, QuestionBankError> {
        let file: BankFile = serde_yaml::from_str(yaml)?;
        Self::new(file.questions)
    }

    /// Reads and parses a YAML bank from disk.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, QuestionBankError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// All questions in catalog order.
    pub fn questions(&self) -> &[BankQuestion] {
        &self.questions
    }

    /// Questions for one domain, in catalog order.
    pub fn for_domain(&self, domain: InspectionDomain) -> Vec<BankQuestion> {
        self.questions
            .iter()
            .filter(|q| q.domain == domain)
            .cloned()
            .collect()
    }

    pub fn find(&self, id: &str) -> Option<&BankQuestion> {
        self.questions.iter().find(|q| q.id == id)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Built-in catalog: three questions per domain.
    pub fn standard() -> Self {
        use InspectionDomain::*;

        let entries: [(&str, InspectionDomain, &str); 18] = [
            ("sg-01", Safeguarding, "Talk me through what happened the last time a child in your home made a disclosure. What did staff do, and what did you do?"),
            ("sg-02", Safeguarding, "How do you know that every member of staff understands and follows your safeguarding procedures?"),
            ("sg-03", Safeguarding, "Tell me about an allegation against a member of staff. How was it managed and who was involved?"),
            ("ld-01", Leadership, "How do you, as registered manager, know what life is like for the children living here day to day?"),
            ("ld-02", Leadership, "What are the key strengths and weaknesses of your home, and what are you doing about the weaknesses?"),
            ("ld-03", Leadership, "How do you use your Regulation 45 reviews and independent visitor reports to drive improvement?"),
            ("cp-01", CarePlanning, "Choose one child. Show me how their care plan reflects their wishes and feelings and how it is reviewed."),
            ("cp-02", CarePlanning, "How do you make sure placement plans and risk assessments are updated when a child's needs change?"),
            ("cp-03", CarePlanning, "How do you work with social workers and families to make sure each child's plan is progressing?"),
            ("sp-01", StaffPractice, "How do you make sure staff are skilled and confident to meet the specific needs of the children in your home?"),
            ("sp-02", StaffPractice, "Tell me about supervision in your home. How do you know it improves practice?"),
            ("sp-03", StaffPractice, "How do you handle poor practice when you see it? Give me an example."),
            ("oc-01", Outcomes, "What progress have the children made since living here, and how do you know?"),
            ("oc-02", Outcomes, "How do you support children's education, including attendance and attainment?"),
            ("oc-03", Outcomes, "How do you promote children's physical and emotional health?"),
            ("rm-01", RiskMissingExploitation, "What happens when a child goes missing from your home? Walk me through your response from the first hour."),
            ("rm-02", RiskMissingExploitation, "How do you identify and respond to the risk of child criminal or sexual exploitation?"),
            ("rm-03", RiskMissingExploitation, "How do you use return home interviews and partner information to reduce risk?"),
        ];

        Self {
            questions: entries
                .into_iter()
                .map(|(id, domain, text)| BankQuestion::new(id, domain, text))
                .collect(),
        }
    }
}
