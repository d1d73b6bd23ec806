//! PostgreSQL user repository implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{postgres::PgRow, PgPool, Row};

use crate::domain::user::{User, UserProps, UserRepository};
use crate::domain::{DomainError, Identifier};

/// PostgreSQL implementation of UserRepository
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_id(&self, id: &Identifier) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, display_name, balance, is_active, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get user: {}", e)))?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn insert(&self, user: &User) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, display_name, balance, is_active, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(user.id().as_str())
        .bind(user.display_name())
        .bind(user.balance())
        .bind(user.is_active())
        .bind(user.created_at())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            let msg = e.to_string();

            if msg.contains("duplicate key") || msg.contains("unique constraint") {
                DomainError::conflict(format!("User with ID '{}' already exists", user.id()))
            } else {
                DomainError::storage(format!("Failed to create user: {}", e))
            }
        })?;

        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET display_name = $2, balance = $3, is_active = $4
            WHERE id = $1
            "#,
        )
        .bind(user.id().as_str())
        .bind(user.display_name())
        .bind(user.balance())
        .bind(user.is_active())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to update user: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(user.id().as_str(), User::ENTITY_NAME));
        }

        Ok(())
    }

    async fn delete(&self, id: &Identifier) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete user: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_all(&self) -> Result<Vec<User>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, display_name, balance, is_active, created_at
            FROM users
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list users: {}", e)))?;

        rows.iter().map(row_to_user).collect()
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to count users: {}", e)))?;

        usize::try_from(count)
            .map_err(|e| DomainError::storage(format!("Invalid user count {}: {}", count, e)))
    }
}

fn row_to_user(row: &PgRow) -> Result<User, DomainError> {
    let id: String = get_column(row, "id")?;
    let display_name: String = get_column(row, "display_name")?;
    let balance: f64 = get_column(row, "balance")?;
    let is_active: bool = get_column(row, "is_active")?;
    let created_at: DateTime<Utc> = get_column(row, "created_at")?;

    let id = Identifier::parse(id)
        .map_err(|e| DomainError::storage(format!("Corrupt user row: {}", e)))?;

    Ok(User::new(UserProps {
        id: Some(id),
        display_name,
        balance: Some(balance),
        is_active: Some(is_active),
        created_at: Some(created_at),
    }))
}

fn get_column<'r, T>(row: &'r PgRow, column: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(column)
        .map_err(|e| DomainError::storage(format!("Failed to read column '{}': {}", column, e)))
}
