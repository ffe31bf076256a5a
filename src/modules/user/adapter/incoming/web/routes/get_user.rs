use actix_web::{get, web, Responder};
use tracing::error;

use crate::api::schemas::{ErrorResponse, SuccessResponse, ValidationErrorResponse};
use crate::auth::adapter::incoming::web::middleware::CapabilityGate;
use crate::auth::application::domain::Capability;
use crate::modules::user::adapter::incoming::web::dto::{GetUserQuery, UserDetailsResponse};
use crate::modules::user::application::ports::incoming::use_cases::GetUserError;
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Get a user with profile and posts
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User id"), GetUserQuery),
    security(("BearerAuth" = [])),
    responses(
        (status = 200, description = "User found", body = inline(SuccessResponse<UserDetailsResponse>)),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Missing capability", body = ErrorResponse),
        (status = 404, description = "No such user", body = ErrorResponse),
        (status = 422, description = "Invalid flag", body = ValidationErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[get("/api/users/{id}", wrap = "CapabilityGate::new(Capability::ViewUsers)")]
pub async fn get_user_handler(
    path: web::Path<i64>,
    query: web::Query<GetUserQuery>,
    data: web::Data<AppState>,
) -> impl Responder {
    let include_deleted = match query.include_deleted() {
        Ok(flag) => flag,
        Err(errors) => return ApiResponse::validation_failed(errors),
    };

    match data.user.get.execute(path.into_inner(), include_deleted).await {
        Ok(details) => ApiResponse::success(
            UserDetailsResponse::from(details),
            "User retrieved successfully",
        ),
        Err(GetUserError::NotFound) => ApiResponse::not_found("User not found."),
        Err(e) => {
            error!(error = %e, "Failed to load user");
            ApiResponse::internal_error()
        }
    }
}
