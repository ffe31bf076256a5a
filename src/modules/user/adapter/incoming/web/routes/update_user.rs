use actix_web::{patch, put, web, HttpResponse, Responder};
use tracing::error;

use crate::api::schemas::{ErrorResponse, SuccessResponse, ValidationErrorResponse};
use crate::auth::adapter::incoming::web::middleware::CapabilityGate;
use crate::auth::application::domain::Capability;
use crate::modules::user::adapter::incoming::web::dto::{UpdateUserRequest, UserDetailsResponse};
use crate::modules::user::application::ports::incoming::use_cases::UpdateUserError;
use crate::shared::api::ApiResponse;
use crate::AppState;

async fn update_user(id: i64, req: UpdateUserRequest, data: &AppState) -> HttpResponse {
    match data.user.update.execute(id, req.into()).await {
        Ok(details) => ApiResponse::success(
            UserDetailsResponse::from(details),
            "User updated successfully",
        ),
        Err(UpdateUserError::NotFound) => ApiResponse::not_found("User not found."),
        Err(UpdateUserError::Validation(errors)) => ApiResponse::validation_failed(errors),
        Err(e) => {
            error!(user_id = id, error = %e, "User update failed");
            ApiResponse::internal_error()
        }
    }
}

/// Update a user
///
/// Partial semantics: only the fields present in the body change.
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User id")),
    request_body = UpdateUserRequest,
    security(("BearerAuth" = [])),
    responses(
        (status = 200, description = "User updated", body = inline(SuccessResponse<UserDetailsResponse>)),
        (status = 400, description = "Malformed JSON body", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Missing capability", body = ErrorResponse),
        (status = 404, description = "No such user", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ValidationErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[put("/api/users/{id}", wrap = "CapabilityGate::new(Capability::UpdateUsers)")]
pub async fn put_user_handler(
    path: web::Path<i64>,
    req: web::Json<UpdateUserRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    update_user(path.into_inner(), req.into_inner(), &data).await
}

/// Update a user (PATCH alias)
#[utoipa::path(
    patch,
    path = "/api/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User id")),
    request_body = UpdateUserRequest,
    security(("BearerAuth" = [])),
    responses(
        (status = 200, description = "User updated", body = inline(SuccessResponse<UserDetailsResponse>)),
        (status = 404, description = "No such user", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ValidationErrorResponse),
    )
)]
#[patch("/api/users/{id}", wrap = "CapabilityGate::new(Capability::UpdateUsers)")]
pub async fn patch_user_handler(
    path: web::Path<i64>,
    req: web::Json<UpdateUserRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    update_user(path.into_inner(), req.into_inner(), &data).await
}
