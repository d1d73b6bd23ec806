//! User validation rules

use std::sync::{Arc, LazyLock};

use super::entity::User;
use crate::domain::validation::{
    rules, RuleSet, TracingValidationObserver, ValidationErrors, ValidationObserver,
};

pub const MAX_DISPLAY_NAME_LENGTH: usize = 30;
pub const MIN_BALANCE: f64 = 0.0;
pub const MAX_BALANCE: f64 = 9999.0;
pub const MAX_BALANCE_DECIMAL_PLACES: usize = 4;

static DEFAULT_VALIDATOR: LazyLock<UserValidator> = LazyLock::new(UserValidator::new);

/// Transient projection of the fields the user rules inspect
#[derive(Debug, Clone, PartialEq)]
pub struct UserRules {
    pub display_name: String,
    pub balance: Option<f64>,
    pub is_active: bool,
}

impl From<&User> for UserRules {
    fn from(user: &User) -> Self {
        Self {
            display_name: user.display_name().to_string(),
            balance: Some(user.balance()),
            is_active: user.is_active(),
        }
    }
}

fn user_rule_set() -> RuleSet<UserRules> {
    // is_active needs no runtime rule: the type already guarantees a boolean
    RuleSet::<UserRules>::new()
        .field(
            "displayName",
            |r| r.display_name.as_str(),
            vec![
                rules::not_empty("displayName should not be empty"),
                rules::max_chars(
                    MAX_DISPLAY_NAME_LENGTH,
                    "Display name must be less than 30 characters",
                ),
            ],
        )
        .optional_field(
            "balance",
            |r| r.balance.as_ref(),
            vec![
                rules::finite("balance must be a finite number"),
                rules::max_decimal_places(
                    MAX_BALANCE_DECIMAL_PLACES,
                    "balance must have at most 4 decimal places",
                ),
                rules::min(MIN_BALANCE, "Dust balance must be greater than 0"),
                rules::max(MAX_BALANCE, "Dust balance must be less than 9999"),
            ],
        )
}

/// Checks a [`User`] against its invariants and reports to an observer
#[derive(Debug, Clone)]
pub struct UserValidator {
    rules: Arc<RuleSet<UserRules>>,
    observer: Arc<dyn ValidationObserver>,
}

impl UserValidator {
    /// Validator reporting through `tracing`
    pub fn new() -> Self {
        Self::with_observer(Arc::new(TracingValidationObserver))
    }

    pub fn with_observer(observer: Arc<dyn ValidationObserver>) -> Self {
        Self {
            rules: Arc::new(user_rule_set()),
            observer,
        }
    }

    /// Shared validator used by the entity's own mutators
    pub fn shared() -> &'static Self {
        &DEFAULT_VALIDATOR
    }

    pub fn validate(&self, user: &User) -> Result<(), ValidationErrors> {
        let id = user.id().as_str();

        match self.rules.check(&UserRules::from(user)) {
            Ok(()) => {
                self.observer.on_valid(User::ENTITY_NAME, id);
                Ok(())
            }
            Err(errors) => {
                self.observer.on_invalid(User::ENTITY_NAME, id, &errors);
                Err(errors)
            }
        }
    }
}

impl Default for UserValidator {
    fn default() -> Self {
        Self::new()
    }
}
