use actix_web::{post, web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::{
        request::{
            ChangePasswordRequest, ForgotPasswordRequest, LoginRequest, RefreshTokenRequest,
            RegisterRequest, ResetPasswordRequest,
        },
        response::MessageResponse,
    },
};

#[post("/api/auth/register")]
pub async fn register(
    state: web::Data<AppState>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let user = state.auth_service.register(request).await?;
    Ok(HttpResponse::Created().json(user))
}

#[post("/api/auth/login")]
pub async fn login(
    state: web::Data<AppState>,
    request: web::Json<LoginRequest>,
    http_request: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let client_ip = http_request
        .connection_info()
        .realip_remote_addr()
        .map(|ip| ip.to_string());

    let response = state.auth_service.login(request, client_ip).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/api/auth/refresh")]
pub async fn refresh_token(
    state: web::Data<AppState>,
    request: web::Json<RefreshTokenRequest>,
    http_request: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let client_ip = http_request
        .connection_info()
        .realip_remote_addr()
        .map(|ip| ip.to_string());

    let response = state
        .auth_service
        .refresh_session(&request.refresh_token, client_ip)
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/api/auth/change-password")]
pub async fn change_password(
    state: web::Data<AppState>,
    request: web::Json<ChangePasswordRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    state.auth_service.change_password(&auth.0.sub, request).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Password changed")))
}

#[post("/api/auth/forgot-password")]
pub async fn forgot_password(
    state: web::Data<AppState>,
    request: web::Json<ForgotPasswordRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let message = state.auth_service.forgot_password(request).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new(&message)))
}

#[post("/api/auth/reset-password")]
pub async fn reset_password(
    state: web::Data<AppState>,
    request: web::Json<ResetPasswordRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    state.auth_service.reset_password(request).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Password reset success")))
}
