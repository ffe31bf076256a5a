use async_trait::async_trait;

use crate::modules::user::application::domain::User;
use crate::modules::user::application::ports::outgoing::user_query::{
    PageRequest, PageResult, UserCriteria, UserQueryError,
};

#[derive(Debug, Clone, thiserror::Error)]
pub enum ListUsersError {
    #[error("Query failed: {0}")]
    QueryFailed(String),
}

impl From<UserQueryError> for ListUsersError {
    fn from(err: UserQueryError) -> Self {
        ListUsersError::QueryFailed(err.to_string())
    }
}

#[async_trait]
pub trait ListUsersUseCase: Send + Sync {
    async fn execute(
        &self,
        criteria: UserCriteria,
        page: PageRequest,
    ) -> Result<PageResult<User>, ListUsersError>;
}
