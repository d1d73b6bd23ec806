//! Composable field rule checking
//!
//! A [`RuleSet`] maps field names to ordered lists of [`Rule`]s over a
//! projection type. Checking runs every rule of every field and collects all
//! failures into one [`ValidationErrors`] instead of stopping at the first.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// A single failed rule on a named field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Every violation found in one validation pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Messages reported for one field, in rule order
    pub fn messages_for<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a str> {
        self.0
            .iter()
            .filter(move |e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// Whether any rule failed on the given field
    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    pub fn into_vec(self) -> Vec<FieldError> {
        self.0
    }
}

impl From<Vec<FieldError>> for ValidationErrors {
    fn from(errors: Vec<FieldError>) -> Self {
        Self(errors)
    }
}

impl From<validator::ValidationErrors> for ValidationErrors {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut collected: Vec<FieldError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, field_errors)| {
                let field = field.to_string();
                field_errors.iter().map(move |err| {
                    let message = err
                        .message
                        .as_ref()
                        .map(ToString::to_string)
                        .unwrap_or_else(|| format!("{} is invalid ({})", field, err.code));
                    FieldError::new(field.clone(), message)
                })
            })
            .collect();

        // validator hands fields back in hash order
        collected.sort_by(|a, b| a.field.cmp(&b.field));
        Self(collected)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;

        for error in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", error.field, error.message)?;
            first = false;
        }

        Ok(())
    }
}

type Predicate<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;
type FieldCheck<S> = Box<dyn Fn(&S) -> Vec<String> + Send + Sync>;

/// A predicate paired with the message reported when it does not hold
pub struct Rule<T: ?Sized> {
    message: String,
    predicate: Predicate<T>,
}

impl<T: ?Sized> Rule<T> {
    pub fn new(
        message: impl Into<String>,
        predicate: impl Fn(&T) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            predicate: Box::new(predicate),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn holds(&self, value: &T) -> bool {
        (self.predicate)(value)
    }
}

impl<T: ?Sized> fmt::Debug for Rule<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

fn failures<T: ?Sized>(rules: &[Rule<T>], value: &T) -> Vec<String> {
    rules
        .iter()
        .filter(|rule| !rule.holds(value))
        .map(|rule| rule.message.clone())
        .collect()
}

/// Ordered mapping from field name to the rules checked against it
pub struct RuleSet<S> {
    fields: Vec<(&'static str, FieldCheck<S>)>,
}

impl<S: 'static> RuleSet<S> {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Add a required field whose rules always run
    pub fn field<T, F>(mut self, name: &'static str, accessor: F, rules: Vec<Rule<T>>) -> Self
    where
        T: ?Sized + 'static,
        F: Fn(&S) -> &T + Send + Sync + 'static,
    {
        let check = move |subject: &S| failures(&rules, accessor(subject));
        self.fields.push((name, Box::new(check)));
        self
    }

    /// Add an optional field whose rules only run when a value is present
    pub fn optional_field<T, F>(
        mut self,
        name: &'static str,
        accessor: F,
        rules: Vec<Rule<T>>,
    ) -> Self
    where
        T: ?Sized + 'static,
        F: Fn(&S) -> Option<&T> + Send + Sync + 'static,
    {
        let check = move |subject: &S| {
            accessor(subject)
                .map(|value| failures(&rules, value))
                .unwrap_or_default()
        };
        self.fields.push((name, Box::new(check)));
        self
    }

    /// Run every rule and aggregate all failures
    pub fn check(&self, subject: &S) -> Result<(), ValidationErrors> {
        let errors: Vec<FieldError> = self
            .fields
            .iter()
            .flat_map(|(name, check)| {
                check(subject)
                    .into_iter()
                    .map(move |message| FieldError::new(*name, message))
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(errors))
        }
    }
}

impl<S: 'static> Default for RuleSet<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> fmt::Debug for RuleSet<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.fields.iter().map(|(name, _)| name))
            .finish()
    }
}

/// Reusable rule constructors
pub mod rules {
    use super::Rule;

    pub fn not_empty(message: impl Into<String>) -> Rule<str> {
        Rule::new(message, |value: &str| !value.is_empty())
    }

    /// Length bound counted in characters, not bytes
    pub fn max_chars(max: usize, message: impl Into<String>) -> Rule<str> {
        Rule::new(message, move |value: &str| value.chars().count() <= max)
    }

    pub fn finite(message: impl Into<String>) -> Rule<f64> {
        Rule::new(message, |value: &f64| value.is_finite())
    }

    pub fn min(min: f64, message: impl Into<String>) -> Rule<f64> {
        Rule::new(message, move |value: &f64| *value >= min)
    }

    pub fn max(max: f64, message: impl Into<String>) -> Rule<f64> {
        Rule::new(message, move |value: &f64| *value <= max)
    }

    pub fn max_decimal_places(max: usize, message: impl Into<String>) -> Rule<f64> {
        Rule::new(message, move |value: &f64| decimal_places(*value) <= max)
    }

    /// Digits after the point in the shortest round-trip rendering
    pub fn decimal_places(value: f64) -> usize {
        let rendered = value.to_string();
        rendered
            .split_once('.')
            .map_or(0, |(_, fraction)| fraction.len())
    }
}

/// Hook notified of every validation outcome
///
/// Validation results never depend on the observer.
pub trait ValidationObserver: Send + Sync + fmt::Debug {
    fn on_valid(&self, entity: &str, id: &str);

    fn on_invalid(&self, entity: &str, id: &str, errors: &ValidationErrors);
}

/// Emits structured `tracing` events
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingValidationObserver;

impl ValidationObserver for TracingValidationObserver {
    fn on_valid(&self, entity: &str, id: &str) {
        debug!(entity, id, "Entity validated");
    }

    fn on_invalid(&self, entity: &str, id: &str, errors: &ValidationErrors) {
        warn!(
            entity,
            id,
            error_count = errors.len(),
            errors = %errors,
            "Entity validation failed"
        );
    }
}

/// Discards every notification
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopValidationObserver;

impl ValidationObserver for NoopValidationObserver {
    fn on_valid(&self, _entity: &str, _id: &str) {}

    fn on_invalid(&self, _entity: &str, _id: &str, _errors: &ValidationErrors) {}
}
