//! Inspection Coach - practice inspection interviews for children's homes.
//!
//! A session asks a seeded selection of inspection questions, scores each
//! answer against the inspection bands through an LLM, decides whether to
//! probe with a follow-up, and rolls the answers up into a session band,
//! trajectory, readiness score and priority areas.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
