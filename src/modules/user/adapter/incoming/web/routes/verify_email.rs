use actix_web::{get, web, Responder};
use tracing::error;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::user::adapter::incoming::web::dto::UserResponse;
use crate::modules::user::application::ports::incoming::use_cases::VerifyEmailError;
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Confirm an email address
///
/// The token comes from the link in the verification email. Verifying an
/// already verified address succeeds without changing the timestamp.
#[utoipa::path(
    get,
    path = "/api/auth/email-verification/{token}",
    tag = "auth",
    params(("token" = String, Path, description = "Verification token")),
    responses(
        (status = 200, description = "Email verified", body = inline(SuccessResponse<UserResponse>)),
        (status = 400, description = "Invalid or expired token", body = ErrorResponse),
        (status = 404, description = "User no longer exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[get("/api/auth/email-verification/{token}")]
pub async fn verify_email_handler(
    token: web::Path<String>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.user.verify_email.execute(&token).await {
        Ok(user) => ApiResponse::success(UserResponse::from(user), "Email verified successfully"),
        Err(VerifyEmailError::InvalidToken) => {
            ApiResponse::bad_request("Invalid or expired verification token.")
        }
        Err(VerifyEmailError::UserNotFound) => ApiResponse::not_found("User not found."),
        Err(e) => {
            error!(error = %e, "Email verification failed");
            ApiResponse::internal_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::application::domain::Role;
    use crate::auth::application::ports::outgoing::token_provider::TokenProvider;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::auth_helper::{bearer_for, create_test_jwt_service};
    use crate::tests::support::fixtures::{deleted_user, sample_user};
    use crate::tests::support::in_memory_users::InMemoryUsers;
    use crate::tests::support::init_app;
    use actix_web::test;

    fn verification_token(user_id: i64) -> String {
        create_test_jwt_service()
            .generate_verification_token(user_id)
            .unwrap()
    }

    async fn verify(token: &str, store: InMemoryUsers) -> (u16, serde_json::Value) {
        let app = init_app!(
            TestAppStateBuilder::default().with_users(store).build(),
            verify_email_handler
        );

        let req = test::TestRequest::get()
            .uri(&format!("/api/auth/email-verification/{}", token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        let status = resp.status().as_u16();
        (status, test::read_body_json(resp).await)
    }

    #[actix_web::test]
    async fn test_valid_token_marks_user_verified() {
        let store = InMemoryUsers::with_users(vec![sample_user(1)]);

        let (status, body) = verify(&verification_token(1), store.clone()).await;

        assert_eq!(status, 200);
        assert_eq!(body["message"], "Email verified successfully");
        assert!(body["data"]["email_verified_at"].is_string());
        assert!(store.user(1).unwrap().email_verified_at.is_some());
    }

    #[actix_web::test]
    async fn test_access_token_is_rejected() {
        let store = InMemoryUsers::with_users(vec![sample_user(1)]);
        let access = bearer_for(1, Role::Member);
        let raw = access.trim_start_matches("Bearer ");

        let (status, body) = verify(raw, store.clone()).await;

        assert_eq!(status, 400);
        assert_eq!(body["success"], false);
        assert!(store.user(1).unwrap().email_verified_at.is_none());
    }

    #[actix_web::test]
    async fn test_garbage_token_is_400() {
        let (status, _) = verify("not-a-token", InMemoryUsers::default()).await;
        assert_eq!(status, 400);
    }

    #[actix_web::test]
    async fn test_deleted_user_is_404() {
        let store = InMemoryUsers::with_users(vec![deleted_user(1)]);

        let (status, body) = verify(&verification_token(1), store).await;

        assert_eq!(status, 404);
        assert_eq!(body["message"], "User not found.");
    }
}
