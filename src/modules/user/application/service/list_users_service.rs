use async_trait::async_trait;

use crate::modules::user::application::domain::User;
use crate::modules::user::application::ports::incoming::use_cases::{
    ListUsersError, ListUsersUseCase,
};
use crate::modules::user::application::ports::outgoing::{
    PageRequest, PageResult, UserCriteria, UserQuery,
};

pub struct ListUsersService<Q>
where
    Q: UserQuery,
{
    query: Q,
}

impl<Q> ListUsersService<Q>
where
    Q: UserQuery,
{
    pub fn new(query: Q) -> Self {
        Self { query }
    }
}

#[async_trait]
impl<Q> ListUsersUseCase for ListUsersService<Q>
where
    Q: UserQuery + Send + Sync,
{
    async fn execute(
        &self,
        criteria: UserCriteria,
        page: PageRequest,
    ) -> Result<PageResult<User>, ListUsersError> {
        Ok(self.query.list(criteria, page).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::user::application::ports::outgoing::DeletedScope;
    use crate::tests::support::fixtures::{deleted_user, user_with};
    use crate::tests::support::in_memory_users::InMemoryUsers;
    use chrono::Utc;

    fn store() -> InMemoryUsers {
        let mut verified = user_with(2, "Jane Roe", "jane@example.com");
        verified.email_verified_at = Some(Utc::now());

        InMemoryUsers::with_users(vec![
            user_with(1, "John Doe", "john@example.com"),
            verified,
            deleted_user(3),
        ])
    }

    fn ids(page: &PageResult<User>) -> Vec<i64> {
        page.items.iter().map(|u| u.id).collect()
    }

    #[tokio::test]
    async fn test_default_listing_hides_deleted_users() {
        let page = ListUsersService::new(store())
            .execute(UserCriteria::all(), PageRequest::default())
            .await
            .unwrap();

        assert_eq!(ids(&page), vec![2, 1]);
        assert_eq!(page.total, 2);
    }

    #[tokio::test]
    async fn test_verified_filter() {
        let service = ListUsersService::new(store());

        let verified = service
            .execute(UserCriteria::verified(true), PageRequest::default())
            .await
            .unwrap();
        let unverified = service
            .execute(UserCriteria::verified(false), PageRequest::default())
            .await
            .unwrap();

        assert_eq!(ids(&verified), vec![2]);
        assert_eq!(ids(&unverified), vec![1]);
    }

    #[tokio::test]
    async fn test_search_matches_name_or_email() {
        let service = ListUsersService::new(store());

        let by_name = service
            .execute(
                UserCriteria::search_by_name_or_email("ROE"),
                PageRequest::default(),
            )
            .await
            .unwrap();
        let by_email = service
            .execute(
                UserCriteria::search_by_name_or_email("john@"),
                PageRequest::default(),
            )
            .await
            .unwrap();

        assert_eq!(ids(&by_name), vec![2]);
        assert_eq!(ids(&by_email), vec![1]);
    }

    #[tokio::test]
    async fn test_deleted_scopes() {
        let service = ListUsersService::new(store());

        let only = service
            .execute(
                UserCriteria::all().with_deleted(DeletedScope::Only),
                PageRequest::default(),
            )
            .await
            .unwrap();
        let include = service
            .execute(
                UserCriteria::all().with_deleted(DeletedScope::Include),
                PageRequest::default(),
            )
            .await
            .unwrap();

        assert_eq!(ids(&only), vec![3]);
        assert_eq!(include.total, 3);
    }

    #[tokio::test]
    async fn test_query_error_is_mapped() {
        let store = store();
        store.fail_with("timeout");

        let err = ListUsersService::new(store)
            .execute(UserCriteria::all(), PageRequest::default())
            .await
            .unwrap_err();

        assert!(matches!(err, ListUsersError::QueryFailed(msg) if msg.contains("timeout")));
    }
}
