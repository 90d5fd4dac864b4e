use std::error::Error;
use std::fmt::{self, Display};

/// Reasons a scheduler cannot be built.
///
/// These are reported before any simulation step runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    /// No policy identifier was given.
    MissingPolicy,

    /// The identifier does not name a known policy.
    UnsupportedPolicy(String),

    /// Round-Robin was asked for with a quantum that is not positive.
    InvalidQuantum(i64),
}

impl Display for SchedulerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchedulerError::MissingPolicy => write!(f, "Algorithm identifier is required"),
            SchedulerError::UnsupportedPolicy(id) => write!(f, "Unsupported algorithm: {}", id),
            SchedulerError::InvalidQuantum(_) => {
                write!(f, "Time quantum must be greater than zero for Round Robin")
            }
        }
    }
}

impl Error for SchedulerError {}
