//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (ids, timestamps, errors)
//! - `inspection` - Question selection, scoring, follow-up and report rules
//! - `practice` - Practice session aggregate

pub mod foundation;
pub mod inspection;
pub mod practice;
