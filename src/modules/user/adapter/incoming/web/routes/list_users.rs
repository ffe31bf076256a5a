use actix_web::{get, web, HttpRequest, Responder};
use tracing::error;

use crate::api::schemas::{ErrorResponse, SuccessResponse, ValidationErrorResponse};
use crate::auth::adapter::incoming::web::middleware::CapabilityGate;
use crate::auth::application::domain::Capability;
use crate::modules::user::adapter::incoming::web::dto::{ListUsersQuery, UserPageResponse};
use crate::shared::api::ApiResponse;
use crate::AppState;

/// List users
///
/// Newest first. Soft-deleted users are left out unless `deleted` says otherwise.
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "users",
    params(ListUsersQuery),
    security(("BearerAuth" = [])),
    responses(
        (status = 200, description = "One page of users", body = inline(SuccessResponse<UserPageResponse>)),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Missing capability", body = ErrorResponse),
        (status = 422, description = "Invalid filter", body = ValidationErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[get("/api/users", wrap = "CapabilityGate::new(Capability::ViewUsers)")]
pub async fn list_users_handler(
    req: HttpRequest,
    query: web::Query<ListUsersQuery>,
    data: web::Data<AppState>,
) -> impl Responder {
    let (criteria, page) = match query.to_criteria() {
        Ok(parts) => parts,
        Err(errors) => return ApiResponse::validation_failed(errors),
    };

    match data.user.list.execute(criteria, page).await {
        Ok(result) => ApiResponse::success(
            UserPageResponse::new(result, req.path(), req.query_string()),
            "Users retrieved successfully",
        ),
        Err(e) => {
            error!(error = %e, "Failed to list users");
            ApiResponse::internal_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::application::domain::Role;
    use crate::modules::user::application::domain::User;
    use crate::modules::user::application::ports::outgoing::MAX_PAGE;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::auth_helper::bearer_for;
    use crate::tests::support::fixtures::{deleted_user, fixed_time, sample_user, user_with};
    use crate::tests::support::in_memory_users::InMemoryUsers;
    use crate::tests::support::init_app;
    use actix_web::test;

    fn store() -> InMemoryUsers {
        let verified = User {
            email_verified_at: Some(fixed_time()),
            ..user_with(2, "Jane Roe", "jane@example.com")
        };
        InMemoryUsers::with_users(vec![
            sample_user(1),
            verified,
            user_with(3, "Bob Stone", "bob@example.com"),
            deleted_user(4),
        ])
    }

    async fn get_json(uri: &str, store: InMemoryUsers) -> (u16, serde_json::Value) {
        let app = init_app!(
            TestAppStateBuilder::default().with_users(store).build(),
            list_users_handler
        );

        let req = test::TestRequest::get()
            .uri(uri)
            .insert_header(("Authorization", bearer_for(1, Role::Member)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        let status = resp.status().as_u16();
        (status, test::read_body_json(resp).await)
    }

    fn ids(body: &serde_json::Value) -> Vec<i64> {
        body["data"]["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|u| u["id"].as_i64().unwrap())
            .collect()
    }

    #[actix_web::test]
    async fn test_list_excludes_deleted_and_orders_newest_first() {
        let (status, body) = get_json("/api/users", store()).await;

        assert_eq!(status, 200);
        assert_eq!(body["success"], true);
        assert_eq!(ids(&body), vec![3, 2, 1]);
        assert_eq!(body["data"]["meta"]["total"], 3);
        assert_eq!(body["data"]["meta"]["per_page"], 15);
        assert_eq!(body["data"]["meta"]["last_page"], 1);
        assert!(body["data"]["links"]["next"].is_null());
    }

    #[actix_web::test]
    async fn test_verified_filter() {
        let (_, verified) = get_json("/api/users?verified=true", store()).await;
        assert_eq!(ids(&verified), vec![2]);

        let (_, unverified) = get_json("/api/users?verified=false", store()).await;
        assert_eq!(ids(&unverified), vec![3, 1]);
    }

    #[actix_web::test]
    async fn test_search_matches_name_or_email() {
        let (_, by_name) = get_json("/api/users?search=STONE", store()).await;
        assert_eq!(ids(&by_name), vec![3]);

        let (_, by_email) = get_json("/api/users?search=jane@", store()).await;
        assert_eq!(ids(&by_email), vec![2]);
    }

    #[actix_web::test]
    async fn test_deleted_scope_only() {
        let (_, body) = get_json("/api/users?deleted=only", store()).await;
        assert_eq!(ids(&body), vec![4]);
    }

    #[actix_web::test]
    async fn test_pagination_links_and_meta() {
        let (_, body) = get_json("/api/users?per_page=2&page=1", store()).await;

        assert_eq!(ids(&body), vec![3, 2]);
        assert_eq!(body["data"]["meta"]["last_page"], 2);
        assert_eq!(
            body["data"]["links"]["next"],
            "/api/users?page=2&per_page=2"
        );
        assert!(body["data"]["links"]["prev"].is_null());
    }

    #[actix_web::test]
    async fn test_huge_page_returns_empty_page() {
        let (status, body) =
            get_json("/api/users?page=1000000000000000000", store()).await;

        assert_eq!(status, 200);
        assert!(ids(&body).is_empty());
        assert_eq!(body["data"]["meta"]["current_page"], MAX_PAGE);
        assert_eq!(body["data"]["meta"]["total"], 3);
        assert!(body["data"]["links"]["next"].is_null());
    }

    #[actix_web::test]
    async fn test_invalid_verified_flag_is_422() {
        let (status, body) = get_json("/api/users?verified=perhaps", store()).await;

        assert_eq!(status, 422);
        assert!(body["errors"]["verified"].is_array());
    }

    #[actix_web::test]
    async fn test_items_never_expose_password() {
        let (_, body) = get_json("/api/users", store()).await;

        for item in body["data"]["items"].as_array().unwrap() {
            assert!(item.get("password").is_none());
            assert!(item.get("password_hash").is_none());
        }
    }

    #[actix_web::test]
    async fn test_requires_authentication() {
        let app = init_app!(TestAppStateBuilder::default().build(), list_users_handler);

        let req = test::TestRequest::get().uri("/api/users").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 401);
    }

    #[actix_web::test]
    async fn test_query_failure_is_500() {
        let failing = InMemoryUsers::default();
        failing.fail_with("db down");

        let (status, body) = get_json("/api/users", failing).await;

        assert_eq!(status, 500);
        assert_eq!(body["success"], false);
    }
}
