use async_trait::async_trait;

use crate::modules::user::application::domain::UserDetails;
use crate::modules::user::application::ports::incoming::use_cases::{GetUserError, GetUserUseCase};
use crate::modules::user::application::ports::outgoing::{DeletedScope, UserQuery};

pub struct GetUserService<Q>
where
    Q: UserQuery,
{
    query: Q,
}

impl<Q> GetUserService<Q>
where
    Q: UserQuery,
{
    pub fn new(query: Q) -> Self {
        Self { query }
    }
}

#[async_trait]
impl<Q> GetUserUseCase for GetUserService<Q>
where
    Q: UserQuery + Send + Sync,
{
    async fn execute(&self, id: i64, include_deleted: bool) -> Result<UserDetails, GetUserError> {
        let scope = if include_deleted {
            DeletedScope::Include
        } else {
            DeletedScope::Exclude
        };

        self.query
            .find_details(id, scope)
            .await
            .map_err(|e| GetUserError::QueryFailed(e.to_string()))?
            .ok_or(GetUserError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::support::fixtures::{deleted_user, sample_post, sample_profile, sample_user};
    use crate::tests::support::in_memory_users::InMemoryUsers;

    #[tokio::test]
    async fn test_loads_profile_and_posts() {
        let store = InMemoryUsers::with_users(vec![sample_user(1)]);
        store.add_profile(sample_profile(1));
        store.add_post(sample_post(10, 1));
        store.add_post(sample_post(11, 2));

        let details = GetUserService::new(store).execute(1, false).await.unwrap();

        assert!(details.profile.is_some());
        assert_eq!(details.posts.len(), 1);
        assert_eq!(details.posts[0].id, 10);
    }

    #[tokio::test]
    async fn test_deleted_user_requires_opt_in() {
        let service = GetUserService::new(InMemoryUsers::with_users(vec![deleted_user(1)]));

        assert!(matches!(
            service.execute(1, false).await,
            Err(GetUserError::NotFound)
        ));

        let details = service.execute(1, true).await.unwrap();
        assert!(details.user.is_deleted());
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let service = GetUserService::new(InMemoryUsers::default());

        assert!(matches!(
            service.execute(99, true).await,
            Err(GetUserError::NotFound)
        ));
    }
}
