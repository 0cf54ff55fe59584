use actix_web::{delete, get, post, put, web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    auth::{require_admin, AuthenticatedUser},
    errors::AppError,
    models::dto::request::{
        ArticleListQuery, CreateArticleRequest, CreateCategoryRequest, CreateSubcategoryRequest,
        UpdateArticleRequest, UpdateCategoryRequest,
    },
};

/// Language resolution mirrors the web client: explicit query parameter
/// first, then the x-bb-lang header, then English.
fn lang_from_request(req: &HttpRequest, query_lang: Option<&str>) -> String {
    if let Some(lang) = query_lang {
        return lang.to_string();
    }
    req.headers()
        .get("x-bb-lang")
        .and_then(|h| h.to_str().ok())
        .unwrap_or("en")
        .to_string()
}

/* ----- Public ----- */

#[get("/api/currentaffairs/categories")]
pub async fn get_categories(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let categories = state.content_service.get_categories().await?;
    Ok(HttpResponse::Ok().json(categories))
}

#[get("/api/currentaffairs/categories-with-subs")]
pub async fn get_categories_with_subs(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let directory = state.content_service.get_categories_with_subs().await?;
    Ok(HttpResponse::Ok().json(directory))
}

#[get("/api/currentaffairs/{category_key}")]
pub async fn get_category_landing(
    state: web::Data<AppState>,
    category_key: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let landing = state.content_service.category_landing(&category_key).await?;
    Ok(HttpResponse::Ok().json(landing))
}

#[get("/api/currentaffairs/{category_key}/{sub_id}")]
pub async fn get_articles_list(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    query: web::Query<ArticleListQuery>,
    http_request: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let (category_key, sub_id) = path.into_inner();
    let mut query = query.into_inner();
    query.lang = Some(lang_from_request(&http_request, query.lang.as_deref()));

    let response = state
        .content_service
        .list_articles(&category_key, &sub_id, &query)
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/api/currentaffairs/{category_key}/{sub_id}/{article_id}")]
pub async fn get_article_detail(
    state: web::Data<AppState>,
    path: web::Path<(String, String, String)>,
    query: web::Query<crate::models::dto::request::LangQuery>,
) -> Result<HttpResponse, AppError> {
    let (category_key, sub_id, article_id) = path.into_inner();

    let response = state
        .content_service
        .article_detail(&category_key, &sub_id, &article_id, query.lang.as_deref())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

/* ----- Admin ----- */

#[post("/api/admin/currentaffairs/category")]
pub async fn create_category(
    state: web::Data<AppState>,
    request: web::Json<CreateCategoryRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;
    let request = request.into_inner();
    request.validate()?;

    let category = state.content_service.create_category(request).await?;
    Ok(HttpResponse::Created().json(category))
}

#[put("/api/admin/currentaffairs/category/{id}")]
pub async fn update_category(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<UpdateCategoryRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;
    let request = request.into_inner();
    request.validate()?;

    let category = state.content_service.update_category(&id, request).await?;
    Ok(HttpResponse::Ok().json(category))
}

#[delete("/api/admin/currentaffairs/category/{id}")]
pub async fn delete_category(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;
    state.content_service.delete_category(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[post("/api/admin/currentaffairs/{category_key}/subcategory")]
pub async fn create_subcategory(
    state: web::Data<AppState>,
    category_key: web::Path<String>,
    request: web::Json<CreateSubcategoryRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;
    let request = request.into_inner();
    request.validate()?;

    let subcategory = state
        .content_service
        .create_subcategory(&category_key, request)
        .await?;
    Ok(HttpResponse::Created().json(subcategory))
}

#[put("/api/admin/currentaffairs/subcategory/{id}")]
pub async fn update_subcategory(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<UpdateCategoryRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;
    let request = request.into_inner();
    request.validate()?;

    let subcategory = state.content_service.update_subcategory(&id, request).await?;
    Ok(HttpResponse::Ok().json(subcategory))
}

#[delete("/api/admin/currentaffairs/subcategory/{id}")]
pub async fn delete_subcategory(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;
    state.content_service.delete_subcategory(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[post("/api/admin/currentaffairs/{category_key}/{sub_id}/content")]
pub async fn create_content(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    request: web::Json<CreateArticleRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;
    let (category_key, sub_id) = path.into_inner();
    let request = request.into_inner();
    request.validate()?;

    let article = state
        .content_service
        .create_article(&category_key, &sub_id, request)
        .await?;
    Ok(HttpResponse::Created().json(article))
}

#[put("/api/admin/currentaffairs/content/{id}")]
pub async fn update_content(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<UpdateArticleRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;
    let request = request.into_inner();
    request.validate()?;

    let article = state.content_service.update_article(&id, request).await?;
    Ok(HttpResponse::Ok().json(article))
}

#[delete("/api/admin/currentaffairs/content/{id}")]
pub async fn delete_content(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;
    state.content_service.delete_article(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}
