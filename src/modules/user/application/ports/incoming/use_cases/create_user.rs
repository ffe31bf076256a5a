use async_trait::async_trait;

use crate::modules::user::application::domain::User;
use crate::shared::validation::FieldErrors;

/// Raw registration input. Every field is optional so that missing values
/// surface as field errors rather than as a malformed body.
#[derive(Debug, Clone, Default)]
pub struct CreateUserInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub password_confirmation: Option<String>,
}

//
// ──────────────────────────────────────────────────────────
// Errors
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, thiserror::Error)]
pub enum CreateUserError {
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

//
// ──────────────────────────────────────────────────────────
// Use case trait
// ──────────────────────────────────────────────────────────
//

#[async_trait]
pub trait CreateUserUseCase: Send + Sync {
    async fn execute(&self, input: CreateUserInput) -> Result<User, CreateUserError>;
}
