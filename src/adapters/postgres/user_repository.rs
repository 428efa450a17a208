//! PostgreSQL implementation of UserRepository.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use super::map_sqlx_error;
use crate::domain::foundation::{DomainError, ErrorCode, Timestamp};
use crate::domain::user::{Email, PasswordHash, UserAccount};
use crate::ports::UserRepository;

/// PostgreSQL implementation of UserRepository.
#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn insert(&self, account: &UserAccount) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (email, password_hash, created_at, last_login_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(account.email().as_str())
        .bind(account.password_hash().as_str())
        .bind(account.created_at().as_datetime())
        .bind(account.last_login_at().map(|t| *t.as_datetime()))
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => Err(
                DomainError::new(ErrorCode::AlreadyExists, "Email already registered"),
            ),
            Err(e) => Err(map_sqlx_error("insert user", e)),
        }
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<UserAccount>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT email, password_hash, created_at, last_login_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("fetch user", e))?;

        row.map(row_to_account).transpose()
    }

    async fn record_login(&self, email: &Email, at: Timestamp) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE users SET last_login_at = $2 WHERE email = $1")
            .bind(email.as_str())
            .bind(at.as_datetime())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("record login", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::UserNotFound, "User not found"));
        }

        Ok(())
    }
}

fn row_to_account(row: sqlx::postgres::PgRow) -> Result<UserAccount, DomainError> {
    let email: String = row.try_get("email").map_err(|e| {
        DomainError::new(ErrorCode::DatabaseError, format!("Failed to get email: {}", e))
    })?;
    let password_hash: String = row.try_get("password_hash").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get password_hash: {}", e),
        )
    })?;
    let created_at: chrono::DateTime<chrono::Utc> = row.try_get("created_at").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get created_at: {}", e),
        )
    })?;
    let last_login_at: Option<chrono::DateTime<chrono::Utc>> =
        row.try_get("last_login_at").map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to get last_login_at: {}", e),
            )
        })?;

    let email = Email::parse(&email).map_err(|e| {
        DomainError::new(ErrorCode::DatabaseError, format!("Invalid stored email: {}", e))
    })?;

    Ok(UserAccount::reconstitute(
        email,
        PasswordHash::from_encoded(password_hash),
        Timestamp::from_datetime(created_at),
        last_login_at.map(Timestamp::from_datetime),
    ))
}
