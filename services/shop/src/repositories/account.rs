//! Account repository for database operations

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use common::error::DatabaseError;
use sqlx::{Row, SqlitePool};
use tracing::info;

use crate::{
    error::{AccountError, StoreError},
    models::{Account, NewAccount},
};

/// Account repository
#[derive(Clone)]
pub struct AccountRepository {
    pool: SqlitePool,
}

impl AccountRepository {
    /// Create a new account repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Whether an account already uses this email
    pub async fn email_taken(&self, email: &str) -> Result<bool, DatabaseError> {
        let row = sqlx::query("SELECT id FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        Ok(row.is_some())
    }

    /// Create a new account
    ///
    /// The email is checked right before the insert; a concurrent signup that
    /// slips between check and insert is caught by the `UNIQUE` constraint.
    pub async fn create(&self, new_account: &NewAccount) -> Result<Account, AccountError> {
        info!("Creating new account: {}", new_account.email);

        if self.email_taken(&new_account.email).await? {
            return Err(AccountError::DuplicateEmail);
        }

        let password_hash = hash_password(&new_account.password)?;

        let result = sqlx::query("INSERT INTO users (name, email, password_hash) VALUES (?, ?, ?)")
            .bind(&new_account.name)
            .bind(&new_account.email)
            .bind(&password_hash)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::Query);

        match result {
            Ok(done) => Ok(Account {
                id: done.last_insert_rowid(),
                name: new_account.name.clone(),
                email: new_account.email.clone(),
            }),
            Err(e) if e.is_unique_violation() => Err(AccountError::DuplicateEmail),
            Err(e) => Err(e.into()),
        }
    }

    /// Check an email/password pair
    ///
    /// An unknown email and a wrong password are indistinguishable.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<Account, AccountError> {
        info!("Authenticating account: {}", email);

        let row = sqlx::query("SELECT id, name, email, password_hash FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::Query)?
            .ok_or(AccountError::InvalidCredentials)?;

        let password_hash: String = row.get("password_hash");
        if !verify_password(&password_hash, password)? {
            return Err(AccountError::InvalidCredentials);
        }

        Ok(Account {
            id: row.get("id"),
            name: row.get("name"),
            email: row.get("email"),
        })
    }

    /// Overwrite the name and password of an account
    pub async fn update_profile(
        &self,
        id: i64,
        name: &str,
        password: &str,
    ) -> Result<(), StoreError> {
        info!("Updating profile of account: {}", id);

        let password_hash = hash_password(password)?;

        sqlx::query("UPDATE users SET name = ?, password_hash = ? WHERE id = ?")
            .bind(name)
            .bind(&password_hash)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        Ok(())
    }

    /// Get all accounts
    pub async fn list_all(&self) -> Result<Vec<Account>, DatabaseError> {
        sqlx::query_as::<_, Account>("SELECT id, name, email FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(DatabaseError::Query)
    }

    /// Delete an account by email, returning whether a row was removed
    ///
    /// Only used to reset fixtures in tests.
    pub async fn delete_by_email(&self, email: &str) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM users WHERE email = ?")
            .bind(email)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        Ok(result.rows_affected() > 0)
    }
}

fn hash_password(password: &str) -> Result<String, StoreError> {
    let salt = SaltString::generate(&mut rand::thread_rng());
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| StoreError::PasswordHash(e.to_string()))
}

fn verify_password(password_hash: &str, password: &str) -> Result<bool, StoreError> {
    let parsed_hash =
        PasswordHash::new(password_hash).map_err(|e| StoreError::PasswordHash(e.to_string()))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
