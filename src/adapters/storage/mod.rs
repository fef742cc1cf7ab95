//! Storage Adapters
//!
//! Implementations of the PracticeSessionRepository port.
//!
//! ## Available Adapters
//!
//! - **InMemoryPracticeSessionRepository** - Stores sessions in memory

mod in_memory_practice_session_repository;

pub use in_memory_practice_session_repository::InMemoryPracticeSessionRepository;
