//! Error kinds reported by the engine

use crate::boxer::BoxerId;

/// Every failure the engine can report to a caller
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RingsideError {
    /// Bad input shape or range
    #[error("Invalid {field}: {message}")]
    Validation { field: &'static str, message: String },

    /// A boxer with this name already exists
    #[error("Boxer with name '{0}' already exists")]
    Conflict(String),

    /// Unknown id or name
    #[error("Boxer {0} not found")]
    NotFound(String),

    /// The ring already holds two boxers
    #[error("Ring is full, cannot add more boxers")]
    Capacity,

    /// The boxer is already waiting in the ring
    #[error("Boxer {0} is already in the ring")]
    Duplicate(BoxerId),

    /// The boxer fails the fight-time weight/age policy
    #[error("Boxer {id} is not eligible to fight: {reason}")]
    Eligibility { id: BoxerId, reason: String },

    /// A fight was requested with fewer than two boxers in the ring
    #[error("There must be two boxers to start a fight (ring holds {0})")]
    InsufficientParticipants(usize),
}

impl RingsideError {
    pub(crate) fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    pub(crate) fn id_not_found(id: BoxerId) -> Self {
        Self::NotFound(format!("with ID {}", id))
    }

    pub(crate) fn name_not_found(name: &str) -> Self {
        Self::NotFound(format!("with name '{}'", name))
    }

    /// Stable machine-readable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation",
            Self::Conflict(_) => "conflict",
            Self::NotFound(_) => "not_found",
            Self::Capacity => "capacity",
            Self::Duplicate(_) => "duplicate",
            Self::Eligibility { .. } => "eligibility",
            Self::InsufficientParticipants(_) => "insufficient_participants",
        }
    }
}

pub type Result<T> = std::result::Result<T, RingsideError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            RingsideError::id_not_found(999).to_string(),
            "Boxer with ID 999 not found"
        );
        assert_eq!(
            RingsideError::Conflict("Ali".to_string()).to_string(),
            "Boxer with name 'Ali' already exists"
        );
        assert_eq!(
            RingsideError::validation("age", "15 (must be between 18 and 40)").to_string(),
            "Invalid age: 15 (must be between 18 and 40)"
        );
    }

    #[test]
    fn test_kinds_are_distinct() {
        let kinds = [
            RingsideError::validation("name", "empty").kind(),
            RingsideError::Conflict(String::new()).kind(),
            RingsideError::name_not_found("x").kind(),
            RingsideError::Capacity.kind(),
            RingsideError::Duplicate(1).kind(),
            RingsideError::Eligibility { id: 1, reason: String::new() }.kind(),
            RingsideError::InsufficientParticipants(1).kind(),
        ];
        let unique: std::collections::HashSet<_> = kinds.iter().collect();
        assert_eq!(unique.len(), kinds.len());
    }
}
