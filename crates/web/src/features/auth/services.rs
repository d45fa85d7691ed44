use sqlx::SqlitePool;
use storage::{
    dto::user::UpdateUserRequest, error::Result, models::User, repository::user::UserRepository,
};
use uuid::Uuid;

/// List all staff and admin accounts
pub async fn list_users(pool: &SqlitePool) -> Result<Vec<User>> {
    let repo = UserRepository::new(pool);
    repo.list().await
}

/// Get a user by ID
pub async fn get_user(pool: &SqlitePool, id: Uuid) -> Result<User> {
    let repo = UserRepository::new(pool);
    repo.find_by_id(id).await
}

/// Look up a user by username or email for login
pub async fn find_by_login(pool: &SqlitePool, login: &str) -> Result<Option<User>> {
    let repo = UserRepository::new(pool);
    repo.find_by_login(login).await
}

/// Create a user from an already-hashed password
#[allow(clippy::too_many_arguments)]
pub async fn create_user(
    pool: &SqlitePool,
    username: &str,
    email: &str,
    password_hash: &str,
    role: &str,
    first_name: &str,
    last_name: &str,
) -> Result<User> {
    let repo = UserRepository::new(pool);
    repo.create(username, email, password_hash, role, first_name, last_name)
        .await
}

/// Replace a user account; a password hash of `None` keeps the current one
pub async fn update_user(
    pool: &SqlitePool,
    id: Uuid,
    request: &UpdateUserRequest,
    password_hash: Option<&str>,
) -> Result<User> {
    let repo = UserRepository::new(pool);
    repo.update(id, request, password_hash).await
}

/// Delete a user account
pub async fn delete_user(pool: &SqlitePool, id: Uuid) -> Result<()> {
    let repo = UserRepository::new(pool);
    repo.delete(id).await
}
