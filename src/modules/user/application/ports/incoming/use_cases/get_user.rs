use async_trait::async_trait;

use crate::modules::user::application::domain::UserDetails;

#[derive(Debug, Clone, thiserror::Error)]
pub enum GetUserError {
    #[error("User not found")]
    NotFound,

    #[error("Query failed: {0}")]
    QueryFailed(String),
}

#[async_trait]
pub trait GetUserUseCase: Send + Sync {
    /// Soft-deleted users are only returned when `include_deleted` is set.
    async fn execute(&self, id: i64, include_deleted: bool) -> Result<UserDetails, GetUserError>;
}
