use async_trait::async_trait;

use crate::modules::user::application::domain::User;

#[derive(Debug, Clone, thiserror::Error)]
pub enum RestoreUserError {
    #[error("User not found")]
    NotFound,

    #[error("Email is held by another active user")]
    EmailConflict,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait RestoreUserUseCase: Send + Sync {
    async fn execute(&self, id: i64) -> Result<User, RestoreUserError>;
}
