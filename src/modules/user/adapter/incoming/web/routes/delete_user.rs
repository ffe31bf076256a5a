use actix_web::{delete, web, Responder};
use tracing::{error, info};

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::auth::adapter::incoming::web::middleware::CapabilityGate;
use crate::auth::application::domain::Capability;
use crate::modules::user::application::ports::incoming::use_cases::DeleteUserError;
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Soft-delete a user
///
/// The row is kept and can be brought back through the restore endpoint.
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User id")),
    security(("BearerAuth" = [])),
    responses(
        (
            status = 200,
            description = "User deleted",
            body = inline(SuccessResponse<Option<String>>),
            example = json!({"success": true, "data": null, "message": "User deleted successfully"})
        ),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Missing capability", body = ErrorResponse),
        (status = 404, description = "No such user or already deleted", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[delete("/api/users/{id}", wrap = "CapabilityGate::new(Capability::DeleteUsers)")]
pub async fn delete_user_handler(
    path: web::Path<i64>,
    actor: AuthenticatedUser,
    data: web::Data<AppState>,
) -> impl Responder {
    let id = path.into_inner();

    match data.user.delete.execute(id).await {
        Ok(()) => {
            info!(actor_id = actor.principal.user_id, "Deletion performed by actor");
            ApiResponse::empty("User deleted successfully")
        }
        Err(DeleteUserError::NotFound) => ApiResponse::not_found("User not found."),
        Err(e) => {
            error!(user_id = id, error = %e, "User deletion failed");
            ApiResponse::internal_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::application::domain::Role;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::auth_helper::bearer_for;
    use crate::tests::support::fixtures::{sample_user, user_with};
    use crate::tests::support::in_memory_users::InMemoryUsers;
    use crate::tests::support::init_app;
    use crate::tests::support::log_capture::capture_logs;
    use actix_web::test;

    #[actix_web::test]
    async fn test_delete_twice_is_404_the_second_time() {
        let store = InMemoryUsers::with_users(vec![sample_user(1)]);
        let app = init_app!(
            TestAppStateBuilder::default().with_users(store.clone()).build(),
            delete_user_handler
        );

        let first = test::TestRequest::delete()
            .uri("/api/users/1")
            .insert_header(("Authorization", bearer_for(1, Role::Member)))
            .to_request();
        let resp = test::call_service(&app, first).await;
        assert_eq!(resp.status(), 200);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], true);
        assert!(body["data"].is_null());
        assert_eq!(body["message"], "User deleted successfully");
        assert!(store.user(1).unwrap().is_deleted());

        let second = test::TestRequest::delete()
            .uri("/api/users/1")
            .insert_header(("Authorization", bearer_for(1, Role::Member)))
            .to_request();
        let resp = test::call_service(&app, second).await;
        assert_eq!(resp.status(), 404);
    }

    #[actix_web::test]
    async fn test_delete_logs_event_once_and_actor_separately() {
        let (logs, _guard) = capture_logs();
        let store = InMemoryUsers::with_users(vec![sample_user(1)]);
        let app = init_app!(
            TestAppStateBuilder::default().with_users(store).build(),
            delete_user_handler
        );

        let req = test::TestRequest::delete()
            .uri("/api/users/1")
            .insert_header(("Authorization", bearer_for(1, Role::Member)))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 200);
        assert_eq!(logs.count("User soft-deleted"), 1);
        assert_eq!(logs.count("Deletion performed by actor"), 1);
    }

    #[actix_web::test]
    async fn test_admin_deletes_other_user() {
        let store = InMemoryUsers::with_users(vec![
            sample_user(1),
            user_with(2, "Jane Roe", "jane@example.com"),
        ]);
        let app = init_app!(
            TestAppStateBuilder::default().with_users(store.clone()).build(),
            delete_user_handler
        );

        let req = test::TestRequest::delete()
            .uri("/api/users/2")
            .insert_header(("Authorization", bearer_for(1, Role::Admin)))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 200);
        assert!(store.user(2).unwrap().is_deleted());
        assert!(!store.user(1).unwrap().is_deleted());
    }

    #[actix_web::test]
    async fn test_member_cannot_delete_other_user() {
        let store = InMemoryUsers::with_users(vec![
            sample_user(1),
            user_with(2, "Jane Roe", "jane@example.com"),
        ]);
        let app = init_app!(
            TestAppStateBuilder::default().with_users(store.clone()).build(),
            delete_user_handler
        );

        let req = test::TestRequest::delete()
            .uri("/api/users/2")
            .insert_header(("Authorization", bearer_for(1, Role::Member)))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 403);
        assert!(!store.user(2).unwrap().is_deleted());
    }

    #[actix_web::test]
    async fn test_member_delete_with_non_numeric_id_is_404() {
        let store = InMemoryUsers::with_users(vec![sample_user(1)]);
        let app = init_app!(
            TestAppStateBuilder::default().with_users(store.clone()).build(),
            delete_user_handler
        );

        let req = test::TestRequest::delete()
            .uri("/api/users/abc")
            .insert_header(("Authorization", bearer_for(1, Role::Member)))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 404);
        assert!(!store.user(1).unwrap().is_deleted());
    }

    #[actix_web::test]
    async fn test_anonymous_delete_is_401() {
        let app = init_app!(TestAppStateBuilder::default().build(), delete_user_handler);

        let req = test::TestRequest::delete().uri("/api/users/1").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 401);
    }

    #[actix_web::test]
    async fn test_repository_failure_is_500() {
        let store = InMemoryUsers::with_users(vec![sample_user(1)]);
        store.fail_with("db down");
        let app = init_app!(
            TestAppStateBuilder::default().with_users(store).build(),
            delete_user_handler
        );

        let req = test::TestRequest::delete()
            .uri("/api/users/1")
            .insert_header(("Authorization", bearer_for(1, Role::Admin)))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 500);
    }
}
