//! Random exercise generation.
//!
//! This module builds random parent networks and requirement sets, either
//! solvable or deliberately over-subscribed, and assembles them into
//! multi-network exercises.

pub mod instance;
pub mod exercise;

// Re-export commonly used types
pub use instance::{GeneratedInstance, GenerationError, InstanceGenerator};
pub use exercise::{Exercise, ExerciseAnswer, ExerciseItem};
