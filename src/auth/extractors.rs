use std::future::{ready, Ready};

use actix_web::{http::header::AUTHORIZATION, FromRequest, HttpRequest};

use crate::{
    auth::{CallerIdentity, Claims, JwtService},
    errors::{AppError, AppResult},
};

fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
}

fn validate_bearer(req: &HttpRequest) -> AppResult<Claims> {
    let token = bearer_token(req)
        .ok_or_else(|| AppError::Unauthorized("Missing authorization header".to_string()))?;

    let jwt_service = req
        .app_data::<actix_web::web::Data<JwtService>>()
        .ok_or_else(|| AppError::InternalError("JWT service not configured".to_string()))?;

    jwt_service
        .validate_token(token)
        .map_err(|_| AppError::Unauthorized("Invalid or expired token".to_string()))
}

/// Extractor for routes that require a signed-in caller.
pub struct AuthenticatedUser(pub Claims);

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        ready(validate_bearer(req).map(AuthenticatedUser))
    }
}

/// Optional-authentication extractor for the quiz submission route. A missing
/// bearer token and an invalid one both collapse to `Guest`; invalid tokens
/// are logged and ignored rather than rejected.
pub struct MaybeAuthenticated(pub CallerIdentity);

impl FromRequest for MaybeAuthenticated {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        if bearer_token(req).is_none() {
            return ready(Ok(MaybeAuthenticated(CallerIdentity::Guest)));
        }

        let identity = match validate_bearer(req) {
            Ok(claims) => CallerIdentity::Authenticated(claims.sub),
            Err(AppError::InternalError(msg)) => {
                return ready(Err(AppError::InternalError(msg)));
            }
            Err(_) => {
                log::warn!("Optional auth: invalid token provided, proceeding as guest");
                CallerIdentity::Guest
            }
        };

        ready(Ok(MaybeAuthenticated(identity)))
    }
}
