//! Session question selector.
//!
//! Draws a deterministic subset of the bank for one session: one question
//! per domain, then trims to five or tops up to seven, then shuffles the
//! result. Every draw comes from a [`SessionRng`] seeded by the session, so
//! the same seed always yields the same questions in the same order.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::domain::foundation::ValidationError;

use super::area::InspectionDomain;
use super::question_bank::{BankQuestion, QuestionBank};
use super::rng::{shuffle, SessionRng};

/// Seed used when a session supplies an empty one.
pub const FALLBACK_SEED: &str = "default";

/// Maximum number of extra questions drawn for a seven-question session.
///
/// Extras also stop once the selection reaches seven, so a full bank gets
/// one extra and a bank missing a domain gets two.
const MAX_EXTRA_PICKS: usize = 2;

/// Number of questions in a practice session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum SessionSize {
    Five,
    #[default]
    Six,
    Seven,
}

impl SessionSize {
    pub fn count(&self) -> usize {
        match self {
            SessionSize::Five => 5,
            SessionSize::Six => 6,
            SessionSize::Seven => 7,
        }
    }
}

impl TryFrom<u8> for SessionSize {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            5 => Ok(SessionSize::Five),
            6 => Ok(SessionSize::Six),
            7 => Ok(SessionSize::Seven),
            _ => Err(ValidationError::out_of_range("question_count", 5, 7, value as i32)),
        }
    }
}

impl From<SessionSize> for u8 {
    fn from(size: SessionSize) -> Self {
        size.count() as u8
    }
}

impl fmt::Display for SessionSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.count())
    }
}

/// Picks session questions from an injected bank.
pub struct QuestionSelector<'a> {
    bank: &'a QuestionBank,
}

impl<'a> QuestionSelector<'a> {
    pub fn new(bank: &'a QuestionBank) -> Self {
        Self { bank }
    }

    /// Selects the questions for one session.
    ///
    /// # Edge Cases
    /// - Empty seed: uses [`FALLBACK_SEED`]
    /// - Domain with no questions: contributes nothing
    /// - Bank too small for the requested size: returns fewer questions
    /// - Seven questions: extras come from distinct domains, never the same
    ///   domain twice
    pub fn generate(&self, session_seed: &str, size: SessionSize) -> Vec<BankQuestion> {
        let seed = if session_seed.is_empty() {
            FALLBACK_SEED
        } else {
            session_seed
        };
        let mut rng = SessionRng::from_seed(seed);

        let mut shuffled_buckets: Vec<(InspectionDomain, Vec<BankQuestion>)> = Vec::new();
        let mut selections: Vec<BankQuestion> = Vec::new();

        for domain in InspectionDomain::ALL {
            let bucket = self.bank.for_domain(domain);
            if bucket.is_empty() {
                continue;
            }
            let shuffled = shuffle(&bucket, &mut rng);
            selections.push(shuffled[0].clone());
            shuffled_buckets.push((domain, shuffled));
        }

        match size {
            SessionSize::Five => {
                if !selections.is_empty() {
                    let idx = rng.next_index(selections.len());
                    selections.remove(idx);
                }
            }
            SessionSize::Six => {}
            SessionSize::Seven => {
                let domain_order = shuffle(&InspectionDomain::ALL, &mut rng);
                let mut added = 0;
                for domain in domain_order {
                    if added >= MAX_EXTRA_PICKS || selections.len() >= size.count() {
                        break;
                    }
                    let Some((_, bucket)) = shuffled_buckets.iter().find(|(d, _)| *d == domain)
                    else {
                        continue;
                    };
                    let chosen: HashSet<&str> = selections.iter().map(|q| q.id.as_str()).collect();
                    let extra = bucket.iter().find(|q| !chosen.contains(q.id.as_str())).cloned();
                    if let Some(extra) = extra {
                        selections.push(extra);
                        added += 1;
                    }
                }
            }
        }

        shuffle(&selections, &mut rng)
    }
}
