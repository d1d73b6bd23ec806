//! UUID-backed entity identifier

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Length of the canonical hyphenated UUID form
const HYPHENATED_UUID_LENGTH: usize = 36;

/// Raised when a string is not a hyphenated UUID
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("ID must be a valid UUID, got '{value}'")]
pub struct InvalidIdentifierError {
    value: String,
}

impl InvalidIdentifierError {
    /// The rejected input
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Immutable identifier wrapping a UUID-formatted string
///
/// Equality is by the wrapped string, so two identifiers built from the same
/// text compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identifier(String);

impl Identifier {
    /// Build from an optional string, generating a fresh value when absent
    pub fn new(value: Option<String>) -> Result<Self, InvalidIdentifierError> {
        match value {
            Some(value) => Self::parse(value),
            None => Ok(Self::generate()),
        }
    }

    /// Generate a new random identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Parse an identifier, rejecting anything but the hyphenated UUID form
    pub fn parse(value: impl Into<String>) -> Result<Self, InvalidIdentifierError> {
        let value = value.into();

        if is_uuid(&value) {
            Ok(Self(value))
        } else {
            Err(InvalidIdentifierError { value })
        }
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Check that a string is a hyphenated UUID
pub fn is_uuid(value: &str) -> bool {
    value.len() == HYPHENATED_UUID_LENGTH && Uuid::try_parse(value).is_ok()
}

impl Default for Identifier {
    fn default() -> Self {
        Self::generate()
    }
}

impl TryFrom<String> for Identifier {
    type Error = InvalidIdentifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Identifier> for String {
    fn from(id: Identifier) -> Self {
        id.0
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
