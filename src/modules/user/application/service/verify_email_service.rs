use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

use crate::auth::application::ports::outgoing::TokenProvider;
use crate::modules::user::application::domain::User;
use crate::modules::user::application::ports::incoming::use_cases::{
    VerifyEmailError, VerifyEmailUseCase,
};
use crate::modules::user::application::ports::outgoing::{UserRepository, UserRepositoryError};

pub struct VerifyEmailService<R>
where
    R: UserRepository,
{
    repository: R,
    token_provider: Arc<dyn TokenProvider + Send + Sync>,
}

impl<R> VerifyEmailService<R>
where
    R: UserRepository,
{
    pub fn new(repository: R, token_provider: Arc<dyn TokenProvider + Send + Sync>) -> Self {
        Self {
            repository,
            token_provider,
        }
    }
}

#[async_trait]
impl<R> VerifyEmailUseCase for VerifyEmailService<R>
where
    R: UserRepository + Send + Sync,
{
    async fn execute(&self, token: &str) -> Result<User, VerifyEmailError> {
        let user_id = self
            .token_provider
            .verify_verification_token(token)
            .map_err(|e| {
                warn!(error = %e, "Rejected email verification token");
                VerifyEmailError::InvalidToken
            })?;

        let user = self
            .repository
            .mark_email_verified(user_id)
            .await
            .map_err(|e| match e {
                UserRepositoryError::UserNotFound => VerifyEmailError::UserNotFound,
                other => VerifyEmailError::RepositoryError(other.to_string()),
            })?;

        info!(user_id, "Email verified");
        Ok(user)
    }
}
