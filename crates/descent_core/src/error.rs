//! Error types for the descent engine.

use crate::organism::OrganismRef;
use thiserror::Error;

/// Main error type for engine operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DescentError {
    /// An operation was requested in a state where it has no answer.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Lineage walks only follow asexual (single-parent) links.
    #[error("Organism {organism} has more than one parent")]
    MultipleParentsUnsupported { organism: OrganismRef },

    /// Scheduler parameters that cannot produce a valid tick.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A handle that does not (or no longer) refers to an organism.
    #[error("Unknown organism: {0}")]
    UnknownOrganism(OrganismRef),
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, DescentError>;

impl DescentError {
    /// Creates a new invalid state error.
    #[must_use]
    pub fn invalid_state<S: Into<String>>(msg: S) -> Self {
        Self::InvalidState(msg.into())
    }

    /// Creates a new configuration error.
    #[must_use]
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        Self::Configuration(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DescentError::invalid_state("empty population");
        assert_eq!(err.to_string(), "Invalid state: empty population");
    }

    #[test]
    fn test_multiple_parents_display() {
        let err = DescentError::MultipleParentsUnsupported {
            organism: OrganismRef::new(3),
        };
        assert!(err.to_string().contains("#3"));
    }
}
