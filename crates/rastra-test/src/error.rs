//! Error types for the test harness

use thiserror::Error;

/// Errors that can occur while building test fixtures
#[derive(Debug, Error)]
pub enum TestError {
    /// Buffer construction failed
    #[error("buffer error: {0}")]
    Buffer(#[from] rastra_core::Error),

    /// Fixture rows were empty or ragged
    #[error("malformed fixture: {0}")]
    Fixture(String),
}

/// Result type for test harness operations
pub type TestResult<T> = Result<T, TestError>;
