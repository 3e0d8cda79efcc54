// Error types for profile table operations

use thiserror::Error;

/// Error types for reading and rewriting the profiles table
#[derive(Debug, Error)]
pub enum DbError {
    /// Filesystem failure while creating, reading or replacing the table
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The table contents could not be parsed or serialized
    #[error("Malformed profiles table: {0}")]
    Csv(#[from] csv::Error),

    /// The record cannot be stored as given
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// The blocking storage task did not complete
    #[error("Storage task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
