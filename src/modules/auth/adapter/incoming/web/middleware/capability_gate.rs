use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, HttpMessage, HttpResponse,
};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};
use tracing::{error, warn};

use crate::auth::adapter::incoming::web::extractors::auth::{resolve_principal, token_provider_from};
use crate::auth::application::access_policy::{AccessDenied, AccessPolicy};
use crate::auth::application::domain::{Capability, Principal};
use crate::shared::api::ApiResponse;

/// Route-level authorization.
///
/// Wraps a single route and evaluates [`AccessPolicy`] for one capability
/// before the handler runs. The `{id}` path segment, when present, is the
/// target of the action; an authenticated caller naming a non-numeric id
/// gets 404. On success the resolved [`Principal`] is stored in
/// the request extensions.
///
/// ```ignore
/// #[get("/api/users", wrap = "CapabilityGate::new(Capability::ViewUsers)")]
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CapabilityGate {
    capability: Capability,
}

impl CapabilityGate {
    pub fn new(capability: Capability) -> Self {
        Self { capability }
    }
}

impl<S, B> Transform<S, ServiceRequest> for CapabilityGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = CapabilityGateMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(CapabilityGateMiddleware {
            service,
            capability: self.capability,
        }))
    }
}

pub struct CapabilityGateMiddleware<S> {
    service: S,
    capability: Capability,
}

impl<S, B> Service<ServiceRequest> for CapabilityGateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        match authorize(&req, self.capability) {
            Ok(principal) => {
                if let Some(principal) = principal {
                    req.extensions_mut().insert(principal);
                }

                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            }
            Err(response) => {
                let (http_req, _payload) = req.into_parts();
                let res = ServiceResponse::new(http_req, response).map_into_right_body();
                Box::pin(async move { Ok(res) })
            }
        }
    }
}

fn authorize(req: &ServiceRequest, capability: Capability) -> Result<Option<Principal>, HttpResponse> {
    let Some(policy) = req.app_data::<web::Data<AccessPolicy>>() else {
        error!("Access policy is not registered as app data");
        return Err(ApiResponse::internal_error());
    };

    let Some(token_provider) = token_provider_from(req.request()) else {
        error!("Token provider is not registered as app data");
        return Err(ApiResponse::internal_error());
    };

    let principal = resolve_principal(req.request(), token_provider.get_ref().as_ref())
        .map_err(|e| {
            warn!(path = %req.path(), error = %e, "Rejected credentials");
            ApiResponse::unauthorized(&e.to_string())
        })?;

    // A non-numeric `{id}` names no user at all.
    let target = match req.match_info().get("id").map(str::parse::<i64>) {
        None => None,
        Some(Ok(id)) => Some(id),
        Some(Err(_)) if principal.is_some() => {
            return Err(ApiResponse::not_found("User not found."));
        }
        Some(Err(_)) => return Err(ApiResponse::unauthorized("Unauthenticated.")),
    };

    match policy.authorize(principal.as_ref(), capability, target) {
        Ok(()) => Ok(principal),
        Err(AccessDenied::Unauthenticated) => Err(ApiResponse::unauthorized("Unauthenticated.")),
        Err(AccessDenied::Forbidden(capability)) => {
            warn!(
                user_id = principal.map(|p| p.user_id),
                capability = %capability,
                target_id = target,
                "Capability denied"
            );
            Err(ApiResponse::forbidden("This action is unauthorized."))
        }
    }
}
