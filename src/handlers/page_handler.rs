use actix_web::{get, put, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    auth::{require_admin, AuthenticatedUser},
    errors::AppError,
    models::dto::request::{LangQuery, UpsertPageRequest},
};

#[get("/api/pages/{slug}")]
pub async fn get_page(
    state: web::Data<AppState>,
    slug: web::Path<String>,
    query: web::Query<LangQuery>,
) -> Result<HttpResponse, AppError> {
    let page = state.page_service.get_page(&slug, query.lang.as_deref()).await?;
    Ok(HttpResponse::Ok().json(page))
}

#[put("/api/admin/pages")]
pub async fn upsert_page(
    state: web::Data<AppState>,
    request: web::Json<UpsertPageRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;
    let request = request.into_inner();
    request.validate()?;

    let page = state.page_service.upsert_page(request).await?;
    Ok(HttpResponse::Ok().json(page))
}
