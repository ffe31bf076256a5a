use crate::api::schemas::{ErrorResponse, SuccessResponse, ValidationErrorResponse};
use crate::auth::application::use_cases::{LoginError, LoginRequest, LoginRequestError};
use crate::modules::user::adapter::incoming::web::dto::UserResponse;
use crate::shared::api::ApiResponse;
use crate::shared::validation::FieldErrors;
use crate::AppState;
use actix_web::{post, web, Responder};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use utoipa::ToSchema;

/// Login request from client
#[derive(Deserialize, ToSchema)]
pub struct LoginRequestDto {
    /// Email address
    #[schema(example = "john@example.com")]
    #[serde(default)]
    pub email: String,

    /// Password
    #[schema(example = "secret123")]
    #[serde(default)]
    pub password: String,
}

#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    access_token: String,

    #[schema(example = "Bearer")]
    token_type: String,

    /// Token lifetime in seconds
    #[schema(example = 3600)]
    expires_in: i64,

    user: UserResponse,
}

fn login_field_errors(err: LoginRequestError) -> FieldErrors {
    match err {
        LoginRequestError::EmptyEmail => FieldErrors::single("email", "The email field is required."),
        LoginRequestError::InvalidEmailFormat => {
            FieldErrors::single("email", "The email must be a valid email address.")
        }
        LoginRequestError::EmptyPassword => {
            FieldErrors::single("password", "The password field is required.")
        }
    }
}

/// User login
///
/// Exchanges email and password for a bearer access token. Soft-deleted
/// accounts cannot log in.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = LoginRequestDto,
    responses(
        (status = 200, description = "Login successful", body = inline(SuccessResponse<LoginResponse>)),
        (
            status = 401,
            description = "Invalid credentials",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "data": null,
                "message": "Invalid email or password."
            })
        ),
        (status = 422, description = "Missing or malformed fields", body = ValidationErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/auth/login")]
pub async fn login_user_handler(
    req: web::Json<LoginRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let dto = req.into_inner();

    let request = match LoginRequest::new(dto.email, dto.password) {
        Ok(req) => req,
        Err(e) => return ApiResponse::validation_failed(login_field_errors(e)),
    };

    match data.login_user_use_case.execute(request).await {
        Ok(output) => {
            info!(user_id = output.user.id, "Login succeeded");

            ApiResponse::success(
                LoginResponse {
                    access_token: output.access_token,
                    token_type: output.token_type.to_string(),
                    expires_in: output.expires_in,
                    user: output.user.into(),
                },
                "Login successful",
            )
        }

        Err(LoginError::InvalidCredentials) => {
            warn!("Login failed: invalid credentials");
            ApiResponse::unauthorized("Invalid email or password.")
        }

        Err(e) => {
            error!(error = %e, "Login failed");
            ApiResponse::internal_error()
        }
    }
}
