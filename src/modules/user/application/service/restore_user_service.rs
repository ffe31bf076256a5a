use async_trait::async_trait;
use tracing::info;

use crate::modules::user::application::domain::User;
use crate::modules::user::application::ports::incoming::use_cases::{
    RestoreUserError, RestoreUserUseCase,
};
use crate::modules::user::application::ports::outgoing::{UserRepository, UserRepositoryError};

pub struct RestoreUserService<R>
where
    R: UserRepository,
{
    repository: R,
}

impl<R> RestoreUserService<R>
where
    R: UserRepository,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> RestoreUserUseCase for RestoreUserService<R>
where
    R: UserRepository + Send + Sync,
{
    async fn execute(&self, id: i64) -> Result<User, RestoreUserError> {
        let user = self
            .repository
            .restore_user(id)
            .await
            .map_err(|e| match e {
                UserRepositoryError::UserNotFound => RestoreUserError::NotFound,
                UserRepositoryError::EmailAlreadyExists => RestoreUserError::EmailConflict,
                other => RestoreUserError::RepositoryError(other.to_string()),
            })?;

        info!(user_id = id, "User restored");
        Ok(user)
    }
}
