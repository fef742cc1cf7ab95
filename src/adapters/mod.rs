//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - LLM providers and the rubric answer evaluator
//! - `http` - REST API
//! - `storage` - Practice session persistence

pub mod ai;
pub mod http;
pub mod storage;
