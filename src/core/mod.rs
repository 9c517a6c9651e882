//! Core business logic - framework-agnostic status resolution and record operations.

/// Application records and the summary refresh each change triggers
pub mod application;
/// Free-text intake parsing and formatting
pub mod intake;
/// Highest-status resolution over a set of applications
pub mod resolver;
/// Per-student application statistics
pub mod statistics;
/// Status vocabulary and weights
pub mod status;
/// Student records and summary persistence
pub mod student;
/// Transactional summary refresh, single and bulk
pub mod summary;
