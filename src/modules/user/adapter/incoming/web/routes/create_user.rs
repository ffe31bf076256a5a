use actix_web::{post, web, Responder};
use tracing::error;

use crate::api::schemas::{ErrorResponse, SuccessResponse, ValidationErrorResponse};
use crate::auth::adapter::incoming::web::middleware::CapabilityGate;
use crate::auth::application::domain::Capability;
use crate::modules::user::adapter::incoming::web::dto::{CreateUserRequest, UserResponse};
use crate::modules::user::application::ports::incoming::use_cases::CreateUserError;
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Create a user
///
/// A verification email is sent in the background once the user is stored.
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "users",
    request_body = CreateUserRequest,
    security((), ("BearerAuth" = [])),
    responses(
        (
            status = 201,
            description = "User created",
            body = inline(SuccessResponse<UserResponse>),
            example = json!({
                "success": true,
                "data": {
                    "id": 1,
                    "name": "John Doe",
                    "email": "john@example.com",
                    "email_verified_at": null,
                    "role": "member",
                    "created_at": "2025-01-15T10:00:00Z",
                    "updated_at": "2025-01-15T10:00:00Z",
                    "deleted_at": null
                },
                "message": "User created successfully"
            })
        ),
        (status = 400, description = "Malformed JSON body", body = ErrorResponse),
        (status = 401, description = "Authentication required when open registration is off", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ValidationErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/users", wrap = "CapabilityGate::new(Capability::CreateUsers)")]
pub async fn create_user_handler(
    req: web::Json<CreateUserRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.user.create.execute(req.into_inner().into()).await {
        Ok(user) => ApiResponse::created(UserResponse::from(user), "User created successfully"),
        Err(CreateUserError::Validation(errors)) => ApiResponse::validation_failed(errors),
        Err(e) => {
            error!(error = %e, "User creation failed");
            ApiResponse::internal_error()
        }
    }
}
