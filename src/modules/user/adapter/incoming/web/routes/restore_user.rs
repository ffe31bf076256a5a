use actix_web::{post, web, Responder};
use tracing::{error, warn};

use crate::api::schemas::{ErrorResponse, SuccessResponse, ValidationErrorResponse};
use crate::auth::adapter::incoming::web::middleware::CapabilityGate;
use crate::auth::application::domain::Capability;
use crate::modules::user::adapter::incoming::web::dto::UserResponse;
use crate::modules::user::application::ports::incoming::use_cases::RestoreUserError;
use crate::modules::user::application::validation::EMAIL_TAKEN;
use crate::shared::api::ApiResponse;
use crate::shared::validation::FieldErrors;
use crate::AppState;

/// Restore a soft-deleted user
///
/// Restoring a user that is not deleted returns it unchanged.
#[utoipa::path(
    post,
    path = "/api/users/{id}/restore",
    tag = "users",
    params(("id" = i64, Path, description = "User id")),
    security(("BearerAuth" = [])),
    responses(
        (status = 200, description = "User restored", body = inline(SuccessResponse<UserResponse>)),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Missing capability", body = ErrorResponse),
        (status = 404, description = "No such user", body = ErrorResponse),
        (status = 422, description = "Email now held by another active user", body = ValidationErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post(
    "/api/users/{id}/restore",
    wrap = "CapabilityGate::new(Capability::RestoreUsers)"
)]
pub async fn restore_user_handler(
    path: web::Path<i64>,
    data: web::Data<AppState>,
) -> impl Responder {
    let id = path.into_inner();

    match data.user.restore.execute(id).await {
        Ok(user) => ApiResponse::success(UserResponse::from(user), "User restored successfully"),
        Err(RestoreUserError::NotFound) => ApiResponse::not_found("User not found."),
        Err(RestoreUserError::EmailConflict) => {
            warn!(user_id = id, "Restore blocked by active email holder");
            ApiResponse::validation_failed(FieldErrors::single("email", EMAIL_TAKEN))
        }
        Err(e) => {
            error!(user_id = id, error = %e, "User restore failed");
            ApiResponse::internal_error()
        }
    }
}
