use tracing::info;

use crate::config::AdminBootstrap;
use crate::core::{AppError, Result};
use crate::modules::users::models::{
    hash_password, CreateUserRequest, UpdateUserRequest, User, UserResponse, UserRole,
};
use crate::modules::users::repositories::UserRepository;

/// Business logic for staff accounts
pub struct UserService {
    repo: UserRepository,
}

impl UserService {
    pub fn new(repo: UserRepository) -> Self {
        Self { repo }
    }

    pub async fn create_user(&self, request: CreateUserRequest) -> Result<UserResponse> {
        if request.name.trim().is_empty() {
            return Err(AppError::validation("Name is required"));
        }
        if request.password.len() < 8 {
            return Err(AppError::validation(
                "Password must be at least 8 characters",
            ));
        }

        if self.repo.find_by_email(&request.email).await?.is_some() {
            return Err(AppError::validation(format!(
                "Email '{}' is already registered",
                request.email
            )));
        }

        let hash = hash_password(&request.password)?;
        let user = self
            .repo
            .create(&request.name, &request.email, &hash, request.role)
            .await?;

        info!(user_id = user.id, "User created");

        Ok(user.to_response())
    }

    pub async fn get_user(&self, id: i64) -> Result<UserResponse> {
        let user = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {}", id)))?;

        Ok(user.to_response())
    }

    pub async fn list_users(&self) -> Result<Vec<UserResponse>> {
        let users = self.repo.list().await?;
        Ok(users.iter().map(User::to_response).collect())
    }

    pub async fn update_user(&self, id: i64, request: UpdateUserRequest) -> Result<UserResponse> {
        let user = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {}", id)))?;

        // The new email must not belong to a different user
        if let Some(existing) = self.repo.find_by_email(&request.email).await? {
            if existing.id != user.id {
                return Err(AppError::validation(format!(
                    "Email '{}' is already in use by another user",
                    request.email
                )));
            }
        }

        let hash = match &request.password {
            Some(password) if !password.is_empty() => {
                if password.len() < 8 {
                    return Err(AppError::validation(
                        "Password must be at least 8 characters",
                    ));
                }
                Some(hash_password(password)?)
            }
            _ => None,
        };

        self.repo
            .update(id, &request.name, &request.email, request.role, hash.as_deref())
            .await?;

        self.get_user(id).await
    }

    /// Delete a user. Users cannot delete their own account.
    pub async fn delete_user(&self, id: i64, acting_user_id: i64) -> Result<()> {
        if id == acting_user_id {
            return Err(AppError::validation("You cannot delete your own account"));
        }

        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {}", id)))?;

        self.repo.delete(id).await
    }

    /// Verify credentials for login. Returns the user on success.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User> {
        let user = self
            .repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid email or password"))?;

        if !user.verify_password(password)? {
            return Err(AppError::unauthorized("Invalid email or password"));
        }

        Ok(user)
    }

    /// Create the bootstrap administrator if configured and not present yet
    pub async fn ensure_bootstrap_admin(&self, bootstrap: &AdminBootstrap) -> Result<()> {
        if self.repo.find_by_email(&bootstrap.email).await?.is_some() {
            return Ok(());
        }

        let hash = hash_password(&bootstrap.password)?;
        let user = self
            .repo
            .create(
                &bootstrap.name,
                &bootstrap.email,
                &hash,
                UserRole::Administrator,
            )
            .await?;

        info!(user_id = user.id, email = %bootstrap.email, "Bootstrap administrator created");

        Ok(())
    }
}
