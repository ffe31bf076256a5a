use actix_web::{dev::Payload, web, Error as ActixError, FromRequest, HttpMessage, HttpRequest, HttpResponse};
use std::{
    future::{ready, Ready},
    sync::Arc,
};

use crate::auth::application::domain::Principal;
use crate::auth::application::ports::outgoing::token_provider::{TokenProvider, ACCESS_TOKEN};
use crate::shared::api::ApiResponse;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CredentialError {
    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Invalid token type")]
    WrongTokenType,

    #[error("Token carries no role")]
    MissingRole,
}

/// Resolves the caller from the `Authorization` header.
///
/// `Ok(None)` means no bearer token was sent. A token that is present but
/// unusable is always an error, even on routes that allow anonymous callers.
pub fn resolve_principal(
    req: &HttpRequest,
    token_provider: &dyn TokenProvider,
) -> Result<Option<Principal>, CredentialError> {
    let Some(token) = extract_token_from_header(req) else {
        return Ok(None);
    };

    let claims = token_provider
        .verify_token(&token)
        .map_err(|_| CredentialError::InvalidToken)?;

    if claims.token_type != ACCESS_TOKEN {
        return Err(CredentialError::WrongTokenType);
    }

    let role = claims.role.ok_or(CredentialError::MissingRole)?;

    Ok(Some(Principal::new(claims.sub, role)))
}

fn extract_token_from_header(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get("Authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.trim().to_string())
}

pub(crate) fn token_provider_from(
    req: &HttpRequest,
) -> Option<&web::Data<Arc<dyn TokenProvider + Send + Sync>>> {
    req.app_data::<web::Data<Arc<dyn TokenProvider + Send + Sync>>>()
}

fn create_api_error(response: HttpResponse) -> ActixError {
    actix_web::error::InternalError::from_response("", response).into()
}

/// The authenticated caller.
///
/// Reuses the principal stored by the capability gate when the route is
/// wrapped, and decodes the bearer token otherwise.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser {
    pub principal: Principal,
}

impl FromRequest for AuthenticatedUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        if let Some(principal) = req.extensions().get::<Principal>().copied() {
            return ready(Ok(AuthenticatedUser { principal }));
        }

        let Some(token_provider) = token_provider_from(req) else {
            tracing::error!("Token provider is not registered as app data");
            return ready(Err(create_api_error(ApiResponse::internal_error())));
        };

        match resolve_principal(req, token_provider.get_ref().as_ref()) {
            Ok(Some(principal)) => ready(Ok(AuthenticatedUser { principal })),
            Ok(None) => ready(Err(create_api_error(ApiResponse::unauthorized(
                "Unauthenticated.",
            )))),
            Err(e) => ready(Err(create_api_error(ApiResponse::unauthorized(
                &e.to_string(),
            )))),
        }
    }
}
