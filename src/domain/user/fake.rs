//! Test data builder for users

use chrono::{DateTime, Utc};

use super::entity::{User, UserProps};
use crate::domain::identifier::Identifier;

/// Builds valid users with overridable fields
#[derive(Debug, Clone)]
pub struct UserFakeBuilder {
    count: usize,
    id: Option<Identifier>,
    display_name: Option<String>,
    balance: f64,
    is_active: bool,
    created_at: Option<DateTime<Utc>>,
}

impl UserFakeBuilder {
    pub fn one() -> Self {
        Self::many(1)
    }

    pub fn many(count: usize) -> Self {
        Self {
            count,
            id: None,
            display_name: None,
            balance: 0.0,
            is_active: true,
            created_at: None,
        }
    }

    pub fn with_id(mut self, id: Identifier) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn with_balance(mut self, balance: f64) -> Self {
        self.balance = balance;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    pub fn build(self) -> User {
        self.build_at(0)
    }

    pub fn build_many(self) -> Vec<User> {
        (0..self.count).map(|index| self.build_at(index)).collect()
    }

    fn build_at(&self, index: usize) -> User {
        User::new(UserProps {
            // a fixed id only makes sense for a single user
            id: if index == 0 { self.id.clone() } else { None },
            display_name: self
                .display_name
                .clone()
                .unwrap_or_else(|| format!("Dust User {}", index + 1)),
            balance: Some(self.balance),
            is_active: Some(self.is_active),
            created_at: self.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builds_valid_user() {
        let user = UserFakeBuilder::one().build();
        assert!(user.validate().is_ok());
        assert_eq!(user.balance(), 0.0);
        assert!(user.is_active());
    }

    #[test]
    fn test_overrides() {
        let id = Identifier::generate();
        let user = UserFakeBuilder::one()
            .with_id(id.clone())
            .with_display_name("Jane")
            .with_balance(12.5)
            .inactive()
            .build();

        assert_eq!(user.id(), &id);
        assert_eq!(user.display_name(), "Jane");
        assert_eq!(user.balance(), 12.5);
        assert!(!user.is_active());
    }

    #[test]
    fn test_many_have_distinct_ids() {
        let users = UserFakeBuilder::many(3).build_many();

        assert_eq!(users.len(), 3);
        assert_ne!(users[0].id(), users[1].id());
        assert_eq!(users[2].display_name(), "Dust User 3");
    }
}
