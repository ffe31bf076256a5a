use crate::api::schemas::{ErrorResponse, ValidationErrorResponse};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

use crate::auth::adapter::incoming::web::routes::{LoginRequestDto, LoginResponse};
use crate::modules::user::adapter::incoming::web::dto::{
    CreateUserRequest, PageLinks, PageMeta, PostResponse, ProfileResponse, UpdateProfileRequest,
    UpdateUserRequest, UserDetailsResponse, UserPageResponse, UserResponse,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Users API",
        version = "1.0.0",
        description = "User accounts with profiles, soft deletion and capability checks",
    ),
    paths(
        // Auth endpoints
        crate::auth::adapter::incoming::web::routes::login_user_handler,
        crate::modules::user::adapter::incoming::web::routes::verify_email_handler,

        // User endpoints
        crate::modules::user::adapter::incoming::web::routes::list_users_handler,
        crate::modules::user::adapter::incoming::web::routes::create_user_handler,
        crate::modules::user::adapter::incoming::web::routes::get_user_handler,
        crate::modules::user::adapter::incoming::web::routes::put_user_handler,
        crate::modules::user::adapter::incoming::web::routes::patch_user_handler,
        crate::modules::user::adapter::incoming::web::routes::delete_user_handler,
        crate::modules::user::adapter::incoming::web::routes::restore_user_handler,
    ),
    components(
        schemas(
            ErrorResponse,
            ValidationErrorResponse,
            LoginRequestDto,
            LoginResponse,
            CreateUserRequest,
            UpdateUserRequest,
            UpdateProfileRequest,
            UserResponse,
            ProfileResponse,
            PostResponse,
            UserDetailsResponse,
            UserPageResponse,
            PageLinks,
            PageMeta,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Authentication endpoints"),
        (name = "users", description = "User management endpoints"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "BearerAuth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Access token from POST /api/auth/login"))
                        .build(),
                ),
            )
        }
    }
}
