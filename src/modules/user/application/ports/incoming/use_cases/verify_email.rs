use async_trait::async_trait;

use crate::modules::user::application::domain::User;

#[derive(Debug, Clone, thiserror::Error)]
pub enum VerifyEmailError {
    #[error("Invalid or expired verification token")]
    InvalidToken,

    #[error("User not found")]
    UserNotFound,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait VerifyEmailUseCase: Send + Sync {
    async fn execute(&self, token: &str) -> Result<User, VerifyEmailError>;
}
