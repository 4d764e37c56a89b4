use std::sync::Arc;

use crate::crypto::password;
use crate::models::user::UserAccount;
use crate::repositories::errors::user_repository_errors::UserRepositoryError;
use crate::repositories::user_repository::UserRepository;
use crate::services::errors::user_service_errors::UserServiceError;

const MIN_PASSWORD_LENGTH: usize = 6;

pub struct UserService {
    repository: Arc<dyn UserRepository + Send + Sync>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository + Send + Sync>) -> Self {
        UserService { repository }
    }

    pub async fn register(
        &self,
        display_name: &str,
        email: &str,
        plain_password: &str,
    ) -> Result<UserAccount, UserServiceError> {
        if display_name.is_empty() || email.is_empty() || plain_password.is_empty() {
            return Err(UserServiceError::ValidationError(
                "All fields are required".to_string(),
            ));
        }
        validate_email(email)?;
        validate_password(plain_password)?;

        if self
            .repository
            .email_exists(email)
            .await
            .map_err(|e| UserServiceError::RepositoryError(e.to_string()))?
        {
            return Err(UserServiceError::UserAlreadyExists);
        }

        let password_hash = password::hash_password(plain_password)
            .map_err(|e| UserServiceError::HashingError(e.to_string()))?;
        let account = UserAccount::new(
            email.to_string(),
            password_hash,
            display_name.to_string(),
        );
        self.repository
            .create_account(&account)
            .await
            .map_err(|e| UserServiceError::RepositoryError(e.to_string()))?;
        Ok(account)
    }

    pub async fn get_account_by_id(&self, user_id: &str) -> Result<UserAccount, UserServiceError> {
        if user_id.is_empty() {
            return Err(UserServiceError::ValidationError(
                "User ID cannot be empty".to_string(),
            ));
        }
        self.repository
            .get_account_by_id(user_id)
            .await
            .map_err(map_repository_error)
    }

    pub async fn get_account_by_email(&self, email: &str) -> Result<UserAccount, UserServiceError> {
        if email.is_empty() {
            return Err(UserServiceError::ValidationError(
                "Email cannot be empty".to_string(),
            ));
        }
        self.repository
            .get_account_by_email(email)
            .await
            .map_err(map_repository_error)
    }

    pub async fn mark_email_verified(&self, user_id: &str) -> Result<(), UserServiceError> {
        let mut account = self.get_account_by_id(user_id).await?;
        if account.email_verified {
            return Ok(());
        }
        account.email_verified = true;
        self.repository
            .update_account(&account)
            .await
            .map_err(map_repository_error)
    }

    pub async fn change_password(
        &self,
        user_id: &str,
        new_password: &str,
    ) -> Result<(), UserServiceError> {
        validate_password(new_password)?;

        let mut account = self.get_account_by_id(user_id).await?;
        account.password_hash = password::hash_password(new_password)
            .map_err(|e| UserServiceError::HashingError(e.to_string()))?;
        self.repository
            .update_account(&account)
            .await
            .map_err(map_repository_error)
    }
}

fn map_repository_error(error: UserRepositoryError) -> UserServiceError {
    match error {
        UserRepositoryError::NotFound => UserServiceError::UserNotFound,
        other => UserServiceError::RepositoryError(other.to_string()),
    }
}

fn validate_email(email: &str) -> Result<(), UserServiceError> {
    // Same shape check the registration form applied: local@domain.tld with
    // no whitespace.
    let mut parts = email.split('@');
    let (local, domain) = match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => (local, domain),
        _ => {
            return Err(UserServiceError::ValidationError(
                "Invalid email format".to_string(),
            ))
        }
    };
    if local.is_empty()
        || domain.is_empty()
        || !domain.contains('.')
        || domain.starts_with('.')
        || domain.ends_with('.')
        || email.chars().any(char::is_whitespace)
    {
        return Err(UserServiceError::ValidationError(
            "Invalid email format".to_string(),
        ));
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<(), UserServiceError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(UserServiceError::ValidationError(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        )));
    }
    Ok(())
}
