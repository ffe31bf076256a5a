use async_trait::async_trait;
use tracing::info;

use crate::modules::user::application::ports::incoming::use_cases::{
    DeleteUserError, DeleteUserUseCase,
};
use crate::modules::user::application::ports::outgoing::{UserRepository, UserRepositoryError};

pub struct DeleteUserService<R>
where
    R: UserRepository,
{
    repository: R,
}

impl<R> DeleteUserService<R>
where
    R: UserRepository,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> DeleteUserUseCase for DeleteUserService<R>
where
    R: UserRepository + Send + Sync,
{
    async fn execute(&self, id: i64) -> Result<(), DeleteUserError> {
        self.repository
            .soft_delete_user(id)
            .await
            .map_err(|e| match e {
                UserRepositoryError::UserNotFound => DeleteUserError::NotFound,
                other => DeleteUserError::RepositoryError(other.to_string()),
            })?;

        info!(user_id = id, "User soft-deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::support::fixtures::sample_user;
    use crate::tests::support::in_memory_users::InMemoryUsers;

    #[tokio::test]
    async fn test_second_delete_is_not_found() {
        let store = InMemoryUsers::with_users(vec![sample_user(1)]);
        let service = DeleteUserService::new(store.clone());

        service.execute(1).await.unwrap();
        assert!(store.user(1).unwrap().is_deleted());

        assert!(matches!(
            service.execute(1).await,
            Err(DeleteUserError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_database_error_is_mapped() {
        let store = InMemoryUsers::with_users(vec![sample_user(1)]);
        store.fail_with("db down");

        let err = DeleteUserService::new(store).execute(1).await.unwrap_err();

        assert!(matches!(err, DeleteUserError::RepositoryError(msg) if msg.contains("db down")));
    }
}
