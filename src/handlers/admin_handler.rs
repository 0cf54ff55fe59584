use actix_web::{delete, get, post, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    auth::{require_admin, AuthenticatedUser},
    errors::AppError,
    models::dto::request::CreateMediaRequest,
};

#[post("/api/admin/media")]
pub async fn create_media(
    state: web::Data<AppState>,
    request: web::Json<CreateMediaRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;
    let request = request.into_inner();
    request.validate()?;

    let media = state
        .admin_service
        .create_media(request, Some(auth.0.sub))
        .await?;
    Ok(HttpResponse::Created().json(media))
}

#[get("/api/admin/media")]
pub async fn list_media(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;
    let items = state.admin_service.list_media().await?;
    Ok(HttpResponse::Ok().json(items))
}

#[delete("/api/admin/media/{id}")]
pub async fn delete_media(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;
    state.admin_service.delete_media(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[get("/api/admin/subscriptions")]
pub async fn list_subscriptions(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;
    let items = state.admin_service.list_subscriptions().await?;
    Ok(HttpResponse::Ok().json(items))
}
