use chrono::Local;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::dto::user::UpdateUserRequest;
use crate::error::{Result, StorageError};
use crate::models::User;

const USER_COLUMNS: &str =
    "id, username, email, password_hash, role, first_name, last_name, created_at, updated_at";

pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List all staff and admin accounts, newest first
    pub async fn list(&self) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(users)
    }

    /// Find user by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<User> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound("user"))?;

        Ok(user)
    }

    /// Find a user by username or account email, for login
    pub async fn find_by_login(&self, login: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = ?1 OR email = ?1"
        ))
        .bind(login)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Create a user from an already-hashed password
    pub async fn create(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
        role: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<User> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE email = ? OR username = ?)",
        )
        .bind(email)
        .bind(username)
        .fetch_one(self.pool)
        .await?;

        if exists {
            return Err(StorageError::Conflict("User already exists".into()));
        }

        let now = Local::now().naive_local();

        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users ( \
                 id, username, email, password_hash, role, first_name, last_name, \
                 created_at, updated_at \
             ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?) \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .bind(role)
        .bind(first_name)
        .bind(last_name)
        .bind(now)
        .bind(now)
        .fetch_one(self.pool)
        .await?;

        Ok(user)
    }

    /// Replace a user account. `password_hash` of `None` keeps the
    /// stored hash.
    pub async fn update(
        &self,
        id: Uuid,
        req: &UpdateUserRequest,
        password_hash: Option<&str>,
    ) -> Result<User> {
        let taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE (email = ? OR username = ?) AND id != ?)",
        )
        .bind(&req.email)
        .bind(&req.username)
        .bind(id)
        .fetch_one(self.pool)
        .await?;

        if taken {
            return Err(StorageError::Conflict(
                "Username or email already exists".into(),
            ));
        }

        let now = Local::now().naive_local();

        let user = match password_hash {
            Some(hash) => {
                sqlx::query_as::<_, User>(&format!(
                    "UPDATE users SET \
                         username = ?, email = ?, role = ?, first_name = ?, last_name = ?, \
                         password_hash = ?, updated_at = ? \
                     WHERE id = ? \
                     RETURNING {USER_COLUMNS}"
                ))
                .bind(&req.username)
                .bind(&req.email)
                .bind(&req.role)
                .bind(&req.first_name)
                .bind(&req.last_name)
                .bind(hash)
                .bind(now)
                .bind(id)
                .fetch_optional(self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, User>(&format!(
                    "UPDATE users SET \
                         username = ?, email = ?, role = ?, first_name = ?, last_name = ?, \
                         updated_at = ? \
                     WHERE id = ? \
                     RETURNING {USER_COLUMNS}"
                ))
                .bind(&req.username)
                .bind(&req.email)
                .bind(&req.role)
                .bind(&req.first_name)
                .bind(&req.last_name)
                .bind(now)
                .bind(id)
                .fetch_optional(self.pool)
                .await?
            }
        }
        .ok_or(StorageError::NotFound("user"))?;

        Ok(user)
    }

    /// Delete a user account
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound("user"));
        }

        Ok(())
    }
}
