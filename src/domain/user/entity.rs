//! User entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{UserValidator, MAX_BALANCE_DECIMAL_PLACES};
use crate::domain::identifier::Identifier;
use crate::domain::validation::rules::decimal_places;
use crate::domain::DomainError;

/// Constructor properties; absent values fall back to defaults
#[derive(Debug, Clone, Default)]
pub struct UserProps {
    pub id: Option<Identifier>,
    pub display_name: String,
    pub balance: Option<f64>,
    pub is_active: Option<bool>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Command for creating a brand new user
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserCommand {
    pub display_name: String,
    #[serde(default)]
    pub balance: Option<f64>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl CreateUserCommand {
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            ..Default::default()
        }
    }

    pub fn with_balance(mut self, balance: f64) -> Self {
        self.balance = Some(balance);
        self
    }

    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }
}

/// Serializable projection of a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSnapshot {
    pub id: String,
    pub name: String,
    pub balance: f64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// User aggregate holding a dust balance
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: Identifier,
    display_name: String,
    balance: f64,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl User {
    /// Entity kind reported in errors and logs
    pub const ENTITY_NAME: &'static str = "User";

    /// Build a user without validating it, e.g. when loading from storage
    pub fn new(props: UserProps) -> Self {
        Self {
            id: props.id.unwrap_or_else(Identifier::generate),
            display_name: props.display_name,
            balance: props.balance.unwrap_or(0.0),
            is_active: props.is_active.unwrap_or(true),
            created_at: props.created_at.unwrap_or_else(Utc::now),
        }
    }

    /// Create and validate a new user
    pub fn create(command: CreateUserCommand) -> Result<Self, DomainError> {
        let user = Self::new(UserProps {
            display_name: command.display_name,
            balance: command.balance,
            is_active: command.is_active,
            ..Default::default()
        });

        user.validate()?;
        Ok(user)
    }

    // Getters

    pub fn id(&self) -> &Identifier {
        &self.id
    }

    pub fn entity_id(&self) -> &Identifier {
        &self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    // Mutators
    //
    // A mutator that breaks an invariant puts the previous value back before
    // returning the error.

    pub fn change_display_name(&mut self, name: impl Into<String>) -> Result<(), DomainError> {
        let previous = std::mem::replace(&mut self.display_name, name.into());

        if let Err(err) = self.validate() {
            self.display_name = previous;
            return Err(err);
        }

        Ok(())
    }

    pub fn add_dust(&mut self, amount: f64) -> Result<(), DomainError> {
        self.set_balance(settle(self.balance + amount, amount))
    }

    pub fn subtract_dust(&mut self, amount: f64) -> Result<(), DomainError> {
        self.set_balance(settle(self.balance - amount, amount))
    }

    /// Activation does not re-run validation
    pub fn activate(&mut self) {
        self.is_active = true;
    }

    /// Deactivation does not re-run validation
    pub fn deactivate(&mut self) {
        self.is_active = false;
    }

    fn set_balance(&mut self, balance: f64) -> Result<(), DomainError> {
        let previous = std::mem::replace(&mut self.balance, balance);

        if let Err(err) = self.validate() {
            self.balance = previous;
            return Err(err);
        }

        Ok(())
    }

    /// Check every invariant with the shared validator
    pub fn validate(&self) -> Result<(), DomainError> {
        self.validate_with(UserValidator::shared())
    }

    pub fn validate_with(&self, validator: &UserValidator) -> Result<(), DomainError> {
        validator
            .validate(self)
            .map_err(DomainError::entity_validation)
    }

    pub fn to_representation(&self) -> UserSnapshot {
        UserSnapshot {
            id: self.id.as_str().to_string(),
            name: self.display_name.clone(),
            balance: self.balance,
            is_active: self.is_active,
            created_at: self.created_at,
        }
    }
}

/// Drops the binary rounding noise of a sum when the amount itself is within
/// the allowed precision; an over-precise amount is left for validation to reject
fn settle(balance: f64, amount: f64) -> f64 {
    if !amount.is_finite() || decimal_places(amount) > MAX_BALANCE_DECIMAL_PLACES {
        return balance;
    }

    let scale = 10f64.powi(MAX_BALANCE_DECIMAL_PLACES as i32);
    (balance * scale).round() / scale
}
