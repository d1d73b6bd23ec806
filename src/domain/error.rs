use thiserror::Error;

use super::identifier::InvalidIdentifierError;
use super::validation::ValidationErrors;

/// Where a validation failure was detected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationKind {
    /// The caller supplied malformed input
    Input,
    /// An entity ended up in a state that breaks its invariants
    Entity,
}

impl std::fmt::Display for ValidationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Input => write!(f, "input"),
            Self::Entity => write!(f, "entity"),
        }
    }
}

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {entity} not found using ID {id}")]
    NotFound { id: String, entity: String },

    #[error("Validation error ({kind}): {errors}")]
    Validation {
        kind: ValidationKind,
        errors: ValidationErrors,
    },

    #[error("Invalid ID format: {message}")]
    InvalidId { message: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn not_found(id: impl Into<String>, entity: impl Into<String>) -> Self {
        Self::NotFound {
            id: id.into(),
            entity: entity.into(),
        }
    }

    pub fn validation(kind: ValidationKind, errors: ValidationErrors) -> Self {
        Self::Validation { kind, errors }
    }

    pub fn entity_validation(errors: ValidationErrors) -> Self {
        Self::validation(ValidationKind::Entity, errors)
    }

    pub fn input_validation(errors: ValidationErrors) -> Self {
        Self::validation(ValidationKind::Input, errors)
    }

    pub fn invalid_id(message: impl Into<String>) -> Self {
        Self::InvalidId {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Field errors carried by a validation failure, if any
    pub fn field_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Validation { errors, .. } => Some(errors),
            _ => None,
        }
    }
}

impl From<InvalidIdentifierError> for DomainError {
    fn from(err: InvalidIdentifierError) -> Self {
        Self::invalid_id(err.to_string())
    }
}
